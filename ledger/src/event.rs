//! # Notification Events
//!
//! Every state-changing operation ends by recording exactly one notification
//! in the append-only [`EventLog`]. Events are observable side effects, not
//! queryable state: programs never read the log back to make decisions, and
//! nothing in it is load-bearing for the ledger's invariants.
//!
//! Recording also emits a `tracing` event, so a subscriber installed by the
//! embedding application sees the same stream.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::account::AccountId;

/// A notification emitted by a completed operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A membership was purchased or extended.
    MembershipPurchased {
        /// The purchasing member.
        account: AccountId,
        /// Tier name ("Monthly", "Quarterly", "Annual").
        tier: String,
        /// Duration added to the member's expiry, in seconds.
        duration_secs: u64,
    },
    /// A referral reward was minted to a referrer.
    ReferralRewarded {
        /// The referrer who was credited.
        referrer: AccountId,
        /// The reward amount.
        amount: u64,
    },
    /// A staff member was paid.
    StaffPaid {
        /// The paying manager.
        from: AccountId,
        /// The staff account credited.
        staff: AccountId,
        /// The amount transferred.
        amount: u64,
    },
    /// A challenge was created.
    ChallengeCreated {
        /// The new challenge id.
        id: u64,
        /// Challenge name.
        name: String,
        /// Reward paid on completion.
        reward: u64,
    },
    /// An account registered for a challenge.
    ChallengeRegistered {
        /// The registering member.
        account: AccountId,
        /// The challenge id.
        id: u64,
    },
    /// An account completed its active challenge.
    ChallengeCompleted {
        /// The completing member.
        account: AccountId,
        /// The completed challenge id.
        id: u64,
        /// The reward minted.
        reward: u64,
    },
    /// A training session was created.
    SessionCreated {
        /// The new session id.
        id: u64,
        /// Session name.
        name: String,
        /// When the session takes place.
        date: DateTime<Utc>,
        /// Booking cost in balance units.
        cost: u64,
        /// The trainer who created it.
        trainer: AccountId,
    },
    /// An account booked a training session.
    SessionRegistered {
        /// The booking member.
        account: AccountId,
        /// The session id.
        id: u64,
    },
    /// The sale issued tokens against an incoming payment.
    TokensSold {
        /// The buyer credited with tokens.
        buyer: AccountId,
        /// The payment amount received, in payment units.
        payment: u64,
        /// The exact number of tokens issued.
        tokens: u64,
    },
    /// Collected sale payments were withdrawn.
    FundsWithdrawn {
        /// The manager who withdrew.
        to: AccountId,
        /// The amount withdrawn, in payment units.
        amount: u64,
    },
    /// The ledger was paused.
    Paused,
    /// The ledger was unpaused.
    Unpaused,
}

/// Append-only log of emitted notifications.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event to the log.
    pub fn record(&mut self, event: Event) {
        tracing::info!(?event, "notification");
        self.events.push(event);
    }

    /// All events recorded so far, oldest first.
    pub fn as_slice(&self) -> &[Event] {
        &self.events
    }

    /// The most recently recorded event, if any.
    pub fn last(&self) -> Option<&Event> {
        self.events.last()
    }

    /// Number of events recorded.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// `true` if nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
