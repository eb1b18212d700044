//! # Program Errors
//!
//! Program-level failures on top of the core [`LedgerError`] set. Core
//! errors flow through unchanged via `#[from]`; the `class()` method keeps
//! the whole surface classifiable as authorization / precondition /
//! state-gate, so callers can branch on the category without enumerating
//! variants.

use thiserror::Error;

use grit_ledger::{ErrorClass, LedgerError};

/// Errors raised by the lifecycle programs.
#[derive(Debug, Error)]
pub enum GymError {
    /// A core ledger or role-directory failure.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The referenced challenge does not exist.
    #[error("challenge not found: {0}")]
    ChallengeNotFound(u64),

    /// The referenced training session does not exist.
    #[error("training session not found: {0}")]
    SessionNotFound(u64),

    /// The account has no active challenge registration to complete.
    #[error("no active challenge registration for {0}")]
    NoActiveChallenge(String),

    /// The referrer's membership has lapsed; no reward is paid.
    #[error("membership lapsed for {0}")]
    MembershipLapsed(String),

    /// A training session must be scheduled strictly in the future.
    #[error("session date {date} is not later than now ({now})")]
    SessionNotInFuture {
        /// The rejected session date.
        date: chrono::DateTime<chrono::Utc>,
        /// The injected current time.
        now: chrono::DateTime<chrono::Utc>,
    },

    /// A price must be strictly positive.
    #[error("invalid price: {0}")]
    InvalidPrice(u64),

    /// A payment or transfer amount must be strictly positive.
    #[error("invalid amount: {0}")]
    InvalidAmount(u64),

    /// Withdraw was called with nothing collected.
    #[error("nothing to withdraw")]
    NothingToWithdraw,

    /// `pay_staff` names a recipient without the Staff tag.
    #[error("recipient {0} does not hold the Staff role")]
    NotStaff(String),
}

impl GymError {
    /// The failure class this error belongs to.
    pub fn class(&self) -> ErrorClass {
        match self {
            GymError::Ledger(inner) => inner.class(),
            // Naming a non-Staff recipient is an authorization failure on
            // the recipient side, per the staffing rules.
            GymError::NotStaff(_) => ErrorClass::Authorization,
            GymError::ChallengeNotFound(_)
            | GymError::SessionNotFound(_)
            | GymError::NoActiveChallenge(_)
            | GymError::MembershipLapsed(_)
            | GymError::SessionNotInFuture { .. }
            | GymError::InvalidPrice(_)
            | GymError::InvalidAmount(_)
            | GymError::NothingToWithdraw => ErrorClass::Precondition,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_errors_keep_their_class() {
        let err: GymError = LedgerError::Paused.into();
        assert_eq!(err.class(), ErrorClass::StateGate);

        let err: GymError = LedgerError::NullAccount.into();
        assert_eq!(err.class(), ErrorClass::Authorization);
    }

    #[test]
    fn program_errors_are_preconditions() {
        assert_eq!(
            GymError::ChallengeNotFound(7).class(),
            ErrorClass::Precondition
        );
        assert_eq!(
            GymError::NoActiveChallenge("alice".into()).class(),
            ErrorClass::Precondition
        );
        assert_eq!(GymError::NothingToWithdraw.class(), ErrorClass::Precondition);
    }
}
