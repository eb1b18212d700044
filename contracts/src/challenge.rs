//! # Challenges
//!
//! Managers post challenges with a reward; members register and, once a
//! manager-side process deems the challenge done, complete them for a
//! one-time mint. The protocol is a strict two-step: register fills the
//! account's single active-challenge slot, complete pays and clears it.
//! One slot per account — registering again overwrites whatever was there,
//! with no refund and no event for the discarded registration.
//!
//! Ids are assigned from a strictly increasing counter starting at 1, so
//! id 0 can never exist and doubles as the "not found" sentinel.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use grit_ledger::{AccountId, Event, EventLog, Ledger, Role, RoleDirectory};

use crate::error::GymError;

/// A posted challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    /// Unique id, > 0, monotonically assigned.
    pub id: u64,
    /// Human-readable name.
    pub name: String,
    /// Amount minted to a member on completion.
    pub reward: u64,
}

/// Challenge records plus each account's single active-challenge slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChallengeBoard {
    challenges: HashMap<u64, Challenge>,
    /// Active registration per account. Absent means no active challenge.
    active: HashMap<AccountId, u64>,
    /// Last assigned id. Strictly increasing; doubles as the record count.
    count: u64,
}

impl ChallengeBoard {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of challenges ever created.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// The challenge `account` is currently registered for, if any.
    pub fn active_challenge(&self, account: &str) -> Option<u64> {
        self.active.get(account).copied().filter(|&id| id != 0)
    }

    /// Looks up a challenge record.
    ///
    /// # Errors
    ///
    /// Returns [`GymError::ChallengeNotFound`] for an unknown id.
    pub fn details(&self, id: u64) -> Result<&Challenge, GymError> {
        self.challenges.get(&id).ok_or(GymError::ChallengeNotFound(id))
    }

    /// Posts a new challenge. Caller must hold Manager. Returns the id.
    pub fn create(
        &mut self,
        roles: &RoleDirectory,
        events: &mut EventLog,
        caller: &str,
        name: impl Into<String>,
        reward: u64,
    ) -> Result<u64, GymError> {
        roles.require(caller, Role::Manager)?;

        let id = self.count + 1;
        let name = name.into();
        self.challenges.insert(
            id,
            Challenge {
                id,
                name: name.clone(),
                reward,
            },
        );
        self.count = id;

        tracing::info!(id, name = %name, reward, "challenge created");
        events.record(Event::ChallengeCreated { id, name, reward });
        Ok(id)
    }

    /// Registers `caller` for challenge `id`, filling their active slot.
    ///
    /// Overwrites any prior registration — at most one concurrent challenge
    /// per account. The displaced registration is simply gone.
    ///
    /// # Errors
    ///
    /// Returns an authorization error if `caller` lacks the Member tag and
    /// [`GymError::ChallengeNotFound`] for an unknown id.
    pub fn register(
        &mut self,
        roles: &RoleDirectory,
        events: &mut EventLog,
        caller: &str,
        id: u64,
    ) -> Result<(), GymError> {
        roles.require(caller, Role::Member)?;
        if !self.challenges.contains_key(&id) {
            return Err(GymError::ChallengeNotFound(id));
        }

        self.active.insert(caller.to_string(), id);

        tracing::info!(account = %caller, id, "challenge registration");
        events.record(Event::ChallengeRegistered {
            account: caller.to_string(),
            id,
        });
        Ok(())
    }

    /// Completes `caller`'s active challenge: mints its reward and clears
    /// the slot. Each registration pays at most once.
    ///
    /// # Errors
    ///
    /// Returns an authorization error if `caller` lacks the Member tag,
    /// [`GymError::NoActiveChallenge`] if the slot is empty, and a
    /// state-gate error while paused. The slot stays filled if the mint
    /// is refused.
    pub fn complete(
        &mut self,
        roles: &RoleDirectory,
        ledger: &mut Ledger,
        events: &mut EventLog,
        caller: &str,
    ) -> Result<u64, GymError> {
        roles.require(caller, Role::Member)?;
        let id = self
            .active_challenge(caller)
            .ok_or_else(|| GymError::NoActiveChallenge(caller.to_string()))?;
        let reward = self.details(id)?.reward;

        // Mint first: if it is refused, the registration survives and the
        // member can retry once the gate clears.
        ledger.mint(caller, reward)?;
        self.active.remove(caller);

        tracing::info!(account = %caller, id, reward, "challenge completed");
        events.record(Event::ChallengeCompleted {
            account: caller.to_string(),
            id,
            reward,
        });
        Ok(reward)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grit_ledger::ErrorClass;

    fn setup() -> (RoleDirectory, Ledger, EventLog, ChallengeBoard) {
        let mut roles = RoleDirectory::bootstrap("boss");
        roles.grant("boss", "alice", Role::Member).unwrap();
        (roles, Ledger::new(), EventLog::new(), ChallengeBoard::new())
    }

    #[test]
    fn ids_are_monotonic_from_one() {
        let (roles, _ledger, mut events, mut board) = setup();
        let a = board.create(&roles, &mut events, "boss", "Pushup month", 100).unwrap();
        let b = board.create(&roles, &mut events, "boss", "5k row", 150).unwrap();
        assert_eq!(a, 1);
        assert_eq!(b, 2);
        assert_eq!(board.count(), 2);
    }

    #[test]
    fn non_manager_cannot_create() {
        let (roles, _ledger, mut events, mut board) = setup();
        let err = board.create(&roles, &mut events, "alice", "Nope", 10).unwrap_err();
        assert_eq!(err.class(), ErrorClass::Authorization);
        assert_eq!(board.count(), 0);
    }

    #[test]
    fn register_then_complete_pays_exactly_once() {
        let (roles, mut ledger, mut events, mut board) = setup();
        board.create(&roles, &mut events, "boss", "Pushup month", 100).unwrap();

        board.register(&roles, &mut events, "alice", 1).unwrap();
        assert_eq!(board.active_challenge("alice"), Some(1));

        let reward = board.complete(&roles, &mut ledger, &mut events, "alice").unwrap();
        assert_eq!(reward, 100);
        assert_eq!(ledger.balance_of("alice"), 100);
        assert_eq!(board.active_challenge("alice"), None);

        // Second completion without a fresh registration fails, no delta.
        let err = board.complete(&roles, &mut ledger, &mut events, "alice").unwrap_err();
        assert_eq!(err.class(), ErrorClass::Precondition);
        assert_eq!(ledger.balance_of("alice"), 100);
    }

    #[test]
    fn register_unknown_challenge_rejected() {
        let (roles, _ledger, mut events, mut board) = setup();
        let err = board.register(&roles, &mut events, "alice", 42).unwrap_err();
        assert_eq!(err.class(), ErrorClass::Precondition);
        assert_eq!(board.active_challenge("alice"), None);
    }

    #[test]
    fn reregistration_overwrites_prior_slot() {
        let (roles, mut ledger, mut events, mut board) = setup();
        board.create(&roles, &mut events, "boss", "First", 100).unwrap();
        board.create(&roles, &mut events, "boss", "Second", 250).unwrap();

        board.register(&roles, &mut events, "alice", 1).unwrap();
        board.register(&roles, &mut events, "alice", 2).unwrap();
        assert_eq!(board.active_challenge("alice"), Some(2));

        // Completion pays the overwriting challenge; the first is gone.
        let reward = board.complete(&roles, &mut ledger, &mut events, "alice").unwrap();
        assert_eq!(reward, 250);
        assert!(board.complete(&roles, &mut ledger, &mut events, "alice").is_err());
    }

    #[test]
    fn paused_mint_keeps_registration_alive() {
        let (roles, mut ledger, mut events, mut board) = setup();
        board.create(&roles, &mut events, "boss", "Plank hour", 75).unwrap();
        board.register(&roles, &mut events, "alice", 1).unwrap();

        ledger.pause();
        let err = board.complete(&roles, &mut ledger, &mut events, "alice").unwrap_err();
        assert_eq!(err.class(), ErrorClass::StateGate);
        // Slot intact; completion succeeds after unpause.
        assert_eq!(board.active_challenge("alice"), Some(1));

        ledger.unpause();
        assert_eq!(board.complete(&roles, &mut ledger, &mut events, "alice").unwrap(), 75);
    }

    #[test]
    fn details_returns_name_and_reward() {
        let (roles, _ledger, mut events, mut board) = setup();
        board.create(&roles, &mut events, "boss", "Deadlift derby", 300).unwrap();
        let challenge = board.details(1).unwrap();
        assert_eq!(challenge.name, "Deadlift derby");
        assert_eq!(challenge.reward, 300);
        assert!(board.details(0).is_err());
        assert!(board.details(2).is_err());
    }
}
