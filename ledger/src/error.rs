//! # Core Error Taxonomy
//!
//! Every failure in the workspace falls into one of three classes:
//!
//! - **Authorization** — the caller lacks the role tag the operation names,
//!   or an identity is malformed (null account).
//! - **Precondition** — the call is well-authorized but the state does not
//!   admit it (insufficient balance, overflow).
//! - **StateGate** — the global pause interlock is engaged.
//!
//! The class is queryable via [`LedgerError::class`] so callers can react to
//! the category without matching every variant. All errors are fail-fast:
//! the failing call performs no partial mutation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::roles::Role;

/// The three failure classes every error maps onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorClass {
    /// Missing role tag or malformed identity.
    Authorization,
    /// State does not admit the operation.
    Precondition,
    /// The global pause interlock is engaged.
    StateGate,
}

/// Errors raised by the core ledger and role directory.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The caller does not hold the role the operation requires.
    #[error("unauthorized: {account} does not hold the {role} role")]
    MissingRole {
        /// The account that attempted the operation.
        account: String,
        /// The role tag the operation requires.
        role: Role,
    },

    /// The null (empty) identity was named where a real account is required.
    #[error("null account identity is not a valid target")]
    NullAccount,

    /// The ledger is paused; balance-mutating operations are refused.
    #[error("ledger is paused")]
    Paused,

    /// The source account cannot cover the requested amount.
    #[error("insufficient balance: {account} has {balance}, needs {required}")]
    InsufficientBalance {
        /// The account being debited.
        account: String,
        /// Its current balance.
        balance: u64,
        /// The amount the operation needs.
        required: u64,
    },

    /// Minting this amount would overflow total supply.
    #[error("supply overflow: minting {amount} would exceed u64::MAX")]
    SupplyOverflow {
        /// The amount that was attempted.
        amount: u64,
    },

    /// Crediting this amount would overflow the recipient's balance.
    #[error("balance overflow: crediting {account} with {amount} would exceed u64::MAX")]
    BalanceOverflow {
        /// The account being credited.
        account: String,
        /// The amount that was attempted.
        amount: u64,
    },
}

impl LedgerError {
    /// The failure class this error belongs to.
    pub fn class(&self) -> ErrorClass {
        match self {
            LedgerError::MissingRole { .. } | LedgerError::NullAccount => {
                ErrorClass::Authorization
            }
            LedgerError::Paused => ErrorClass::StateGate,
            LedgerError::InsufficientBalance { .. }
            | LedgerError::SupplyOverflow { .. }
            | LedgerError::BalanceOverflow { .. } => ErrorClass::Precondition,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_are_assigned_per_taxonomy() {
        let auth = LedgerError::MissingRole {
            account: "alice".into(),
            role: Role::Manager,
        };
        assert_eq!(auth.class(), ErrorClass::Authorization);
        assert_eq!(LedgerError::NullAccount.class(), ErrorClass::Authorization);
        assert_eq!(LedgerError::Paused.class(), ErrorClass::StateGate);

        let precond = LedgerError::InsufficientBalance {
            account: "bob".into(),
            balance: 10,
            required: 50,
        };
        assert_eq!(precond.class(), ErrorClass::Precondition);
    }

    #[test]
    fn messages_carry_context() {
        let err = LedgerError::InsufficientBalance {
            account: "bob".into(),
            balance: 10,
            required: 50,
        };
        let msg = err.to_string();
        assert!(msg.contains("bob"));
        assert!(msg.contains("10"));
        assert!(msg.contains("50"));
    }
}
