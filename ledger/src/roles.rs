//! # Role Directory
//!
//! Capability tags and the directory mapping them to account sets. The
//! directory is the sole authorization gate in GRIT: every privileged
//! operation asks [`RoleDirectory::has_role`] for exactly the tag it names,
//! and nothing else. Tags are independent — holding Manager does not imply
//! Member, and there is no hierarchy to climb.
//!
//! Grant and revoke are themselves privileged (Manager-only), and both
//! reject the null identity.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::account::{is_null, AccountId};
use crate::error::LedgerError;

/// A capability tag. Possession of a tag grants access to the operations
/// that name it — nothing more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Runs the gym: grants roles, pauses the ledger, pays staff, rewards
    /// referrals, creates challenges, administers the sale.
    Manager,
    /// Employed by the gym; eligible for `pay_staff` transfers.
    Staff,
    /// A paying member; may purchase memberships, register for challenges
    /// and training sessions.
    Member,
    /// Runs training sessions.
    Trainer,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Manager => write!(f, "Manager"),
            Role::Staff => write!(f, "Staff"),
            Role::Member => write!(f, "Member"),
            Role::Trainer => write!(f, "Trainer"),
        }
    }
}

/// Maps each role tag to the set of accounts holding it.
///
/// Membership is many-to-many: an account may hold any combination of tags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleDirectory {
    grants: HashMap<Role, HashSet<AccountId>>,
}

impl RoleDirectory {
    /// Creates an empty directory. Useful for tests; production state starts
    /// from [`bootstrap`](Self::bootstrap) so that someone can grant roles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory with `founder` holding the Manager tag.
    ///
    /// Without a founding Manager no role could ever be granted, since
    /// grant itself is Manager-only.
    pub fn bootstrap(founder: impl Into<AccountId>) -> Self {
        let mut dir = Self::default();
        let founder = founder.into();
        dir.grants.entry(Role::Manager).or_default().insert(founder);
        dir
    }

    /// Returns `true` if `account` holds `role`.
    pub fn has_role(&self, account: &str, role: Role) -> bool {
        self.grants
            .get(&role)
            .map(|set| set.contains(account))
            .unwrap_or(false)
    }

    /// Fails with [`LedgerError::MissingRole`] unless `account` holds `role`.
    ///
    /// The check every privileged operation runs before touching state.
    pub fn require(&self, account: &str, role: Role) -> Result<(), LedgerError> {
        if self.has_role(account, role) {
            Ok(())
        } else {
            Err(LedgerError::MissingRole {
                account: account.to_string(),
                role,
            })
        }
    }

    /// Grants `role` to `account`. Caller must hold Manager.
    ///
    /// Granting an already-held role is a no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::MissingRole`] if `caller` is not a Manager.
    /// Returns [`LedgerError::NullAccount`] if `account` is the null identity.
    pub fn grant(
        &mut self,
        caller: &str,
        account: impl Into<AccountId>,
        role: Role,
    ) -> Result<(), LedgerError> {
        self.require(caller, Role::Manager)?;
        let account = account.into();
        if is_null(&account) {
            return Err(LedgerError::NullAccount);
        }
        self.grants.entry(role).or_default().insert(account.clone());
        tracing::info!(%account, %role, "role granted");
        Ok(())
    }

    /// Revokes `role` from `account`. Caller must hold Manager.
    ///
    /// Revoking a role the account does not hold is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::MissingRole`] if `caller` is not a Manager.
    /// Returns [`LedgerError::NullAccount`] if `account` is the null identity.
    pub fn revoke(&mut self, caller: &str, account: &str, role: Role) -> Result<(), LedgerError> {
        self.require(caller, Role::Manager)?;
        if is_null(account) {
            return Err(LedgerError::NullAccount);
        }
        if let Some(set) = self.grants.get_mut(&role) {
            set.remove(account);
        }
        tracing::info!(%account, %role, "role revoked");
        Ok(())
    }
}
