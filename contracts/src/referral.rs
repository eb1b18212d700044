//! # Referral Rewards
//!
//! Managers reward members who bring in new business. The reward is a fixed
//! mint to the referrer, allowed only while the referrer's own membership is
//! active — a lapsed referrer gets nothing, and the whole call is rejected
//! rather than partially credited.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use grit_ledger::config::REFERRAL_REWARD;
use grit_ledger::{AccountId, Event, EventLog, Ledger, Role, RoleDirectory};

use crate::error::GymError;
use crate::membership::MembershipProgram;

/// Mints fixed referral rewards and tracks how much each referrer has
/// accrued over time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferralProgram {
    /// Amount minted per successful referral.
    reward: u64,
    /// Cumulative bonus minted per referrer.
    accrued: HashMap<AccountId, u64>,
}

impl ReferralProgram {
    /// Creates the program with the standard reward amount.
    pub fn new() -> Self {
        Self::with_reward(REFERRAL_REWARD)
    }

    /// Creates the program with a custom reward amount.
    pub fn with_reward(reward: u64) -> Self {
        Self {
            reward,
            accrued: HashMap::new(),
        }
    }

    /// The fixed amount minted per referral.
    pub fn reward_amount(&self) -> u64 {
        self.reward
    }

    /// Total bonus ever minted to `referrer`.
    pub fn accrued_bonus(&self, referrer: &str) -> u64 {
        self.accrued.get(referrer).copied().unwrap_or(0)
    }

    /// Mints the referral reward to `referrer`. Caller must hold Manager;
    /// the referrer's membership must still be active at `now`.
    ///
    /// # Errors
    ///
    /// Returns an authorization error if `caller` is not a Manager, a
    /// precondition error if the referrer's membership has lapsed, and a
    /// state-gate error while paused. Nothing is credited on failure.
    pub fn reward(
        &mut self,
        roles: &RoleDirectory,
        membership: &MembershipProgram,
        ledger: &mut Ledger,
        events: &mut EventLog,
        caller: &str,
        referrer: &str,
        now: DateTime<Utc>,
    ) -> Result<(), GymError> {
        roles.require(caller, Role::Manager)?;
        if membership.remaining_time(referrer, now) == 0 {
            return Err(GymError::MembershipLapsed(referrer.to_string()));
        }

        ledger.mint(referrer, self.reward)?;
        let total = self.accrued.entry(referrer.to_string()).or_insert(0);
        *total = total.saturating_add(self.reward);

        tracing::info!(referrer = %referrer, amount = self.reward, "referral rewarded");
        events.record(Event::ReferralRewarded {
            referrer: referrer.to_string(),
            amount: self.reward,
        });
        Ok(())
    }
}

impl Default for ReferralProgram {
    fn default() -> Self {
        Self::new()
    }
}
