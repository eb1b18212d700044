//! # Balance Ledger
//!
//! The single fungible balance store backing every GRIT program. Balances
//! live in a private map; the four primitives — [`mint`](Ledger::mint),
//! [`burn`](Ledger::burn), [`transfer`](Ledger::transfer),
//! [`balance_of`](Ledger::balance_of) — are the only way any balance can
//! change. Higher-level operations compose these with their own state
//! updates; the primitive runs first, so a refused primitive leaves the
//! whole call untouched.
//!
//! ## Pause Interlock
//!
//! A single `paused` flag gates all three mutating primitives. While set,
//! every balance-mutating entry point across every program refuses to
//! proceed — an emergency halt that leaves stored balances untouched.
//! Engaging and releasing the flag is restricted to Managers at the
//! operation surface.
//!
//! ## Supply Accounting
//!
//! The ledger tracks cumulative `minted` and `burned` alongside
//! `total_supply`. The invariant `total_supply == minted - burned` holds at
//! every observation point; tests lean on it for conservation checks.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::account::{is_null, AccountId};
use crate::error::LedgerError;

/// The fungible account-balance store.
///
/// Balance storage is private by design: programs hold a reference to the
/// ledger and speak through the primitives, never through the map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    /// Account balances in the smallest balance unit.
    balances: HashMap<AccountId, u64>,
    /// Sum of all balances. Always `minted - burned`.
    total_supply: u64,
    /// Cumulative amount ever minted.
    minted: u64,
    /// Cumulative amount ever burned.
    burned: u64,
    /// The global emergency interlock.
    paused: bool,
}

impl Ledger {
    /// Creates an empty, unpaused ledger with zero supply.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the balance of `account`, or 0 if it has never held value.
    pub fn balance_of(&self, account: &str) -> u64 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Returns the current total supply.
    pub fn total_supply(&self) -> u64 {
        self.total_supply
    }

    /// Cumulative amount ever minted.
    pub fn minted_total(&self) -> u64 {
        self.minted
    }

    /// Cumulative amount ever burned.
    pub fn burned_total(&self) -> u64 {
        self.burned
    }

    /// Returns `true` while the pause interlock is engaged.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Engages the pause interlock. Idempotent.
    pub fn pause(&mut self) {
        self.paused = true;
        tracing::warn!("ledger paused");
    }

    /// Releases the pause interlock. Idempotent.
    pub fn unpause(&mut self) {
        self.paused = false;
        tracing::info!("ledger unpaused");
    }

    fn gate(&self) -> Result<(), LedgerError> {
        if self.paused {
            Err(LedgerError::Paused)
        } else {
            Ok(())
        }
    }

    /// Creates `amount` new units credited to `to`, increasing total supply.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Paused`] while the interlock is engaged.
    /// Returns [`LedgerError::NullAccount`] for the null recipient.
    /// Returns [`LedgerError::SupplyOverflow`] if total supply would
    /// overflow, or [`LedgerError::BalanceOverflow`] if the recipient's
    /// balance would.
    pub fn mint(&mut self, to: &str, amount: u64) -> Result<(), LedgerError> {
        self.gate()?;
        if is_null(to) {
            return Err(LedgerError::NullAccount);
        }

        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::SupplyOverflow { amount })?;
        let new_balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow {
                account: to.to_string(),
                amount,
            })?;

        self.total_supply = new_supply;
        self.minted = self.minted.saturating_add(amount);
        self.balances.insert(to.to_string(), new_balance);

        tracing::debug!(account = %to, amount, "minted");
        Ok(())
    }

    /// Destroys `amount` units held by `from`, decreasing total supply.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Paused`] while the interlock is engaged.
    /// Returns [`LedgerError::InsufficientBalance`] if `from` cannot cover
    /// the amount.
    pub fn burn(&mut self, from: &str, amount: u64) -> Result<(), LedgerError> {
        self.gate()?;

        let balance = self.balance_of(from);
        if balance < amount {
            return Err(LedgerError::InsufficientBalance {
                account: from.to_string(),
                balance,
                required: amount,
            });
        }

        self.balances.insert(from.to_string(), balance - amount);
        self.total_supply -= amount;
        self.burned = self.burned.saturating_add(amount);

        tracing::debug!(account = %from, amount, "burned");
        Ok(())
    }

    /// Moves `amount` units from `from` to `to`. Supply is unchanged.
    ///
    /// A transfer to self is permitted and leaves the balance as it was.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Paused`] while the interlock is engaged.
    /// Returns [`LedgerError::InsufficientBalance`] if `from` cannot cover
    /// the amount, or [`LedgerError::BalanceOverflow`] if the recipient's
    /// balance would overflow.
    pub fn transfer(&mut self, from: &str, to: &str, amount: u64) -> Result<(), LedgerError> {
        self.gate()?;

        let from_balance = self.balance_of(from);
        if from_balance < amount {
            return Err(LedgerError::InsufficientBalance {
                account: from.to_string(),
                balance: from_balance,
                required: amount,
            });
        }

        if from == to {
            return Ok(());
        }

        let to_balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow {
                account: to.to_string(),
                amount,
            })?;

        self.balances.insert(from.to_string(), from_balance - amount);
        self.balances.insert(to.to_string(), to_balance);

        tracing::debug!(from = %from, to = %to, amount, "transferred");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorClass;

    #[test]
    fn mint_increases_supply_and_balance() {
        let mut ledger = Ledger::new();
        ledger.mint("alice", 1_000).unwrap();
        assert_eq!(ledger.balance_of("alice"), 1_000);
        assert_eq!(ledger.total_supply(), 1_000);
        assert_eq!(ledger.minted_total(), 1_000);
    }

    #[test]
    fn mint_null_recipient_rejected() {
        let mut ledger = Ledger::new();
        let err = ledger.mint("", 100).unwrap_err();
        assert_eq!(err.class(), ErrorClass::Authorization);
        assert_eq!(ledger.total_supply(), 0);
    }

    #[test]
    fn burn_decreases_supply_and_balance() {
        let mut ledger = Ledger::new();
        ledger.mint("alice", 1_000).unwrap();
        ledger.burn("alice", 400).unwrap();
        assert_eq!(ledger.balance_of("alice"), 600);
        assert_eq!(ledger.total_supply(), 600);
        assert_eq!(ledger.burned_total(), 400);
    }

    #[test]
    fn burn_more_than_balance_rejected() {
        let mut ledger = Ledger::new();
        ledger.mint("alice", 100).unwrap();
        let err = ledger.burn("alice", 200).unwrap_err();
        assert_eq!(err.class(), ErrorClass::Precondition);
        // No partial mutation.
        assert_eq!(ledger.balance_of("alice"), 100);
        assert_eq!(ledger.total_supply(), 100);
    }

    #[test]
    fn transfer_moves_value_without_changing_supply() {
        let mut ledger = Ledger::new();
        ledger.mint("alice", 500).unwrap();
        ledger.transfer("alice", "bob", 200).unwrap();
        assert_eq!(ledger.balance_of("alice"), 300);
        assert_eq!(ledger.balance_of("bob"), 200);
        assert_eq!(ledger.total_supply(), 500);
    }

    #[test]
    fn transfer_insufficient_rejected() {
        let mut ledger = Ledger::new();
        ledger.mint("alice", 100).unwrap();
        assert!(ledger.transfer("alice", "bob", 101).is_err());
        assert_eq!(ledger.balance_of("alice"), 100);
        assert_eq!(ledger.balance_of("bob"), 0);
    }

    #[test]
    fn transfer_to_self_is_noop() {
        let mut ledger = Ledger::new();
        ledger.mint("alice", 100).unwrap();
        ledger.transfer("alice", "alice", 60).unwrap();
        assert_eq!(ledger.balance_of("alice"), 100);
        assert_eq!(ledger.total_supply(), 100);
    }

    #[test]
    fn pause_gates_all_mutating_primitives() {
        let mut ledger = Ledger::new();
        ledger.mint("alice", 100).unwrap();
        ledger.pause();

        assert_eq!(ledger.mint("alice", 1).unwrap_err().class(), ErrorClass::StateGate);
        assert_eq!(ledger.burn("alice", 1).unwrap_err().class(), ErrorClass::StateGate);
        assert_eq!(
            ledger.transfer("alice", "bob", 1).unwrap_err().class(),
            ErrorClass::StateGate
        );
        // Reads are unaffected.
        assert_eq!(ledger.balance_of("alice"), 100);

        ledger.unpause();
        ledger.mint("alice", 1).unwrap();
        assert_eq!(ledger.balance_of("alice"), 101);
    }

    #[test]
    fn supply_equals_minted_minus_burned() {
        let mut ledger = Ledger::new();
        ledger.mint("a", 1_000).unwrap();
        ledger.mint("b", 250).unwrap();
        ledger.burn("a", 300).unwrap();
        ledger.transfer("a", "b", 100).unwrap();
        ledger.burn("b", 50).unwrap();

        assert_eq!(
            ledger.total_supply(),
            ledger.minted_total() - ledger.burned_total()
        );
        assert_eq!(
            ledger.total_supply(),
            ledger.balance_of("a") + ledger.balance_of("b")
        );
    }

    #[test]
    fn mint_overflow_rejected() {
        let mut ledger = Ledger::new();
        ledger.mint("alice", u64::MAX).unwrap();
        let err = ledger.mint("bob", 1).unwrap_err();
        assert_eq!(err.class(), ErrorClass::Precondition);
        assert_eq!(ledger.balance_of("bob"), 0);
    }

    #[test]
    fn ledger_serialization_roundtrip() {
        let mut ledger = Ledger::new();
        ledger.mint("alice", 750).unwrap();
        ledger.burn("alice", 50).unwrap();

        let json = serde_json::to_string(&ledger).unwrap();
        let restored: Ledger = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.balance_of("alice"), 700);
        assert_eq!(restored.total_supply(), 700);
        assert_eq!(restored.burned_total(), 50);
    }
}
