//! # Training Sessions
//!
//! Trainers schedule sessions; members pay to attend. Booking burns the
//! session cost from the member and appends them to the session's ordered
//! participant list. The list is append-only and does not dedupe: booking
//! the same session twice is two seats and two burns, which is how repeat
//! bookings are recorded.
//!
//! Session ids follow the same monotonic-counter scheme as challenges:
//! ids start at 1 and 0 means "not found".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use grit_ledger::{AccountId, Event, EventLog, Ledger, Role, RoleDirectory};

use crate::error::GymError;

/// A scheduled training session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingSession {
    /// Unique id, > 0, monotonically assigned.
    pub id: u64,
    /// Human-readable name.
    pub name: String,
    /// When the session takes place. Strictly future at creation.
    pub date: DateTime<Utc>,
    /// Booking cost in balance units, burned per registration.
    pub cost: u64,
    /// The trainer who created the session.
    pub trainer: AccountId,
    /// Ordered, append-only participant list. Duplicates permitted.
    pub participants: Vec<AccountId>,
}

/// The session schedule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingSchedule {
    sessions: HashMap<u64, TrainingSession>,
    /// Last assigned id. Strictly increasing.
    count: u64,
}

impl TrainingSchedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions ever created.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Looks up a session record.
    ///
    /// # Errors
    ///
    /// Returns [`GymError::SessionNotFound`] for an unknown id.
    pub fn session(&self, id: u64) -> Result<&TrainingSession, GymError> {
        self.sessions.get(&id).ok_or(GymError::SessionNotFound(id))
    }

    /// Schedules a new session. Caller must hold Trainer; `date` must be
    /// strictly later than `now`. Returns the id.
    pub fn create(
        &mut self,
        roles: &RoleDirectory,
        events: &mut EventLog,
        caller: &str,
        name: impl Into<String>,
        date: DateTime<Utc>,
        cost: u64,
        now: DateTime<Utc>,
    ) -> Result<u64, GymError> {
        roles.require(caller, Role::Trainer)?;
        if date <= now {
            return Err(GymError::SessionNotInFuture { date, now });
        }

        let id = self.count + 1;
        let name = name.into();
        self.sessions.insert(
            id,
            TrainingSession {
                id,
                name: name.clone(),
                date,
                cost,
                trainer: caller.to_string(),
                participants: Vec::new(),
            },
        );
        self.count = id;

        tracing::info!(id, name = %name, %date, cost, trainer = %caller, "session created");
        events.record(Event::SessionCreated {
            id,
            name,
            date,
            cost,
            trainer: caller.to_string(),
        });
        Ok(id)
    }

    /// Books `caller` into session `id`: burns the cost and appends them to
    /// the participant list. Not deduplicated — a repeat booking burns and
    /// appends again.
    ///
    /// # Errors
    ///
    /// Returns an authorization error if `caller` lacks the Member tag,
    /// [`GymError::SessionNotFound`] for an unknown id, a precondition
    /// error if the caller cannot cover the cost, and a state-gate error
    /// while paused. The list is untouched if the burn is refused.
    pub fn register(
        &mut self,
        roles: &RoleDirectory,
        ledger: &mut Ledger,
        events: &mut EventLog,
        caller: &str,
        id: u64,
    ) -> Result<(), GymError> {
        roles.require(caller, Role::Member)?;
        let cost = self.session(id)?.cost;

        ledger.burn(caller, cost)?;
        // Burn landed; the seat is part of the same indivisible call.
        self.sessions
            .get_mut(&id)
            .expect("session existed above")
            .participants
            .push(caller.to_string());

        tracing::info!(account = %caller, id, cost, "session booked");
        events.record(Event::SessionRegistered {
            account: caller.to_string(),
            id,
        });
        Ok(())
    }

    /// Ids and names for all sessions, ordered by id.
    pub fn list(&self) -> Vec<(u64, String)> {
        (1..=self.count)
            .filter_map(|id| self.sessions.get(&id))
            .map(|s| (s.id, s.name.clone()))
            .collect()
    }
}
