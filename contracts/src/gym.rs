//! # The Gym Facade
//!
//! One struct owning the whole deployment: role directory, balance ledger,
//! event log, and every lifecycle program. Its methods are the public
//! operation surface — callers never reach the programs or the ledger
//! directly, so every mutation funnels through the same gates.
//!
//! Each operation runs in a fixed shape: role and pause gates first, then
//! the ledger mutation, then the operation's own bookkeeping, then one
//! notification. `&mut self` serializes calls, so a call either completes
//! or leaves no trace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use grit_ledger::config::SALE_ACCOUNT;
use grit_ledger::{Event, EventLog, Ledger, Role, RoleDirectory};

use crate::challenge::{Challenge, ChallengeBoard};
use crate::error::GymError;
use crate::membership::{MembershipProgram, MembershipTier, PriceTable};
use crate::referral::ReferralProgram;
use crate::sale::TokenSale;
use crate::training::{TrainingSchedule, TrainingSession};

/// A complete GRIT deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gym {
    roles: RoleDirectory,
    ledger: Ledger,
    events: EventLog,
    membership: MembershipProgram,
    referral: ReferralProgram,
    challenges: ChallengeBoard,
    training: TrainingSchedule,
    sale: TokenSale,
}

impl Gym {
    /// Creates a gym with `founder` as the first Manager, the standard
    /// price table, and the sale posted at the default price.
    pub fn new(founder: impl Into<String>) -> Self {
        Self {
            roles: RoleDirectory::bootstrap(founder),
            ledger: Ledger::new(),
            events: EventLog::new(),
            membership: MembershipProgram::new(PriceTable::standard()),
            referral: ReferralProgram::new(),
            challenges: ChallengeBoard::new(),
            training: TrainingSchedule::new(),
            sale: TokenSale::at_default_price(SALE_ACCOUNT),
        }
    }

    // -----------------------------------------------------------------------
    // Role Directory
    // -----------------------------------------------------------------------

    /// Grants `role` to `account`. Caller must hold Manager.
    pub fn grant_role(&mut self, caller: &str, account: &str, role: Role) -> Result<(), GymError> {
        self.roles.grant(caller, account, role).map_err(Into::into)
    }

    /// Revokes `role` from `account`. Caller must hold Manager.
    pub fn revoke_role(&mut self, caller: &str, account: &str, role: Role) -> Result<(), GymError> {
        self.roles.revoke(caller, account, role).map_err(Into::into)
    }

    /// Returns `true` if `account` holds `role`.
    pub fn has_role(&self, account: &str, role: Role) -> bool {
        self.roles.has_role(account, role)
    }

    // -----------------------------------------------------------------------
    // Ledger / Admin
    // -----------------------------------------------------------------------

    /// Engages the pause interlock. Caller must hold Manager.
    pub fn pause(&mut self, caller: &str) -> Result<(), GymError> {
        self.roles.require(caller, Role::Manager)?;
        self.ledger.pause();
        self.events.record(Event::Paused);
        Ok(())
    }

    /// Releases the pause interlock. Caller must hold Manager.
    pub fn unpause(&mut self, caller: &str) -> Result<(), GymError> {
        self.roles.require(caller, Role::Manager)?;
        self.ledger.unpause();
        self.events.record(Event::Unpaused);
        Ok(())
    }

    /// Direct issuance outside the sale path — provisioning the sale
    /// inventory, seeding member balances. Caller must hold Manager.
    pub fn mint(&mut self, caller: &str, to: &str, amount: u64) -> Result<(), GymError> {
        self.roles.require(caller, Role::Manager)?;
        self.ledger.mint(to, amount).map_err(Into::into)
    }

    /// Balance of `account`. Never fails.
    pub fn balance_of(&self, account: &str) -> u64 {
        self.ledger.balance_of(account)
    }

    /// Current total supply.
    pub fn total_supply(&self) -> u64 {
        self.ledger.total_supply()
    }

    /// `true` while the pause interlock is engaged.
    pub fn is_paused(&self) -> bool {
        self.ledger.is_paused()
    }

    /// The notifications emitted so far, oldest first.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    // -----------------------------------------------------------------------
    // Membership
    // -----------------------------------------------------------------------

    /// Purchases (or extends) a membership. Caller must hold Member.
    /// Returns the new expiry.
    pub fn purchase_membership(
        &mut self,
        caller: &str,
        tier: MembershipTier,
        now: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, GymError> {
        self.membership
            .purchase(&self.roles, &mut self.ledger, &mut self.events, caller, tier, now)
    }

    /// Seconds of membership left for `account` at `now`. Never fails.
    pub fn remaining_time(&self, account: &str, now: DateTime<Utc>) -> u64 {
        self.membership.remaining_time(account, now)
    }

    // -----------------------------------------------------------------------
    // Staffing
    // -----------------------------------------------------------------------

    /// Pays `staff` from the calling Manager's own balance. The recipient
    /// must actually hold the Staff tag.
    pub fn pay_staff(&mut self, caller: &str, staff: &str, amount: u64) -> Result<(), GymError> {
        self.roles.require(caller, Role::Manager)?;
        if !self.roles.has_role(staff, Role::Staff) {
            return Err(GymError::NotStaff(staff.to_string()));
        }

        self.ledger.transfer(caller, staff, amount)?;

        tracing::info!(from = %caller, staff = %staff, amount, "staff paid");
        self.events.record(Event::StaffPaid {
            from: caller.to_string(),
            staff: staff.to_string(),
            amount,
        });
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Referral
    // -----------------------------------------------------------------------

    /// Mints the fixed referral reward to `referrer`. Caller must hold
    /// Manager; the referrer's membership must be active at `now`.
    pub fn reward_referral(
        &mut self,
        caller: &str,
        referrer: &str,
        now: DateTime<Utc>,
    ) -> Result<(), GymError> {
        self.referral.reward(
            &self.roles,
            &self.membership,
            &mut self.ledger,
            &mut self.events,
            caller,
            referrer,
            now,
        )
    }

    /// Total referral bonus ever minted to `account`.
    pub fn referral_bonus(&self, account: &str) -> u64 {
        self.referral.accrued_bonus(account)
    }

    // -----------------------------------------------------------------------
    // Challenges
    // -----------------------------------------------------------------------

    /// Posts a challenge. Caller must hold Manager. Returns the id.
    pub fn create_challenge(
        &mut self,
        caller: &str,
        name: impl Into<String>,
        reward: u64,
    ) -> Result<u64, GymError> {
        self.challenges.create(&self.roles, &mut self.events, caller, name, reward)
    }

    /// Registers the caller for challenge `id`. Caller must hold Member.
    pub fn register_for_challenge(&mut self, caller: &str, id: u64) -> Result<(), GymError> {
        self.challenges.register(&self.roles, &mut self.events, caller, id)
    }

    /// Completes the caller's active challenge, minting its reward.
    /// Returns the reward paid.
    pub fn complete_challenge(&mut self, caller: &str) -> Result<u64, GymError> {
        self.challenges
            .complete(&self.roles, &mut self.ledger, &mut self.events, caller)
    }

    /// The record for challenge `id`.
    pub fn challenge_details(&self, id: u64) -> Result<&Challenge, GymError> {
        self.challenges.details(id)
    }

    /// The challenge `account` is currently registered for, if any.
    pub fn active_challenge(&self, account: &str) -> Option<u64> {
        self.challenges.active_challenge(account)
    }

    // -----------------------------------------------------------------------
    // Training Sessions
    // -----------------------------------------------------------------------

    /// Schedules a session. Caller must hold Trainer; `date` must be
    /// strictly later than `now`. Returns the id.
    pub fn create_training_session(
        &mut self,
        caller: &str,
        name: impl Into<String>,
        date: DateTime<Utc>,
        cost: u64,
        now: DateTime<Utc>,
    ) -> Result<u64, GymError> {
        self.training
            .create(&self.roles, &mut self.events, caller, name, date, cost, now)
    }

    /// Books the caller into session `id`, burning its cost.
    pub fn register_for_training_session(&mut self, caller: &str, id: u64) -> Result<(), GymError> {
        self.training
            .register(&self.roles, &mut self.ledger, &mut self.events, caller, id)
    }

    /// Ids and names of all sessions, ordered by id.
    pub fn list_training_sessions(&self) -> Vec<(u64, String)> {
        self.training.list()
    }

    /// The full record for session `id`.
    pub fn training_session(&self, id: u64) -> Result<&TrainingSession, GymError> {
        self.training.session(id)
    }

    // -----------------------------------------------------------------------
    // Token Sale
    // -----------------------------------------------------------------------

    /// Sells tokens to `buyer` against `payment_amount` payment units at
    /// the posted price. Open to any caller. Returns the tokens issued.
    pub fn sell(&mut self, buyer: &str, payment_amount: u64) -> Result<u64, GymError> {
        self.sale
            .sell(&mut self.ledger, &mut self.events, buyer, payment_amount)
    }

    /// Withdraws the collected payment tally. Caller must hold Manager.
    pub fn withdraw(&mut self, caller: &str) -> Result<u64, GymError> {
        self.sale.withdraw(&self.roles, &mut self.events, caller)
    }

    /// Reposts the sale price. Caller must hold Manager.
    pub fn set_sale_price(&mut self, caller: &str, new_price: u64) -> Result<(), GymError> {
        self.sale.set_price(&self.roles, caller, new_price)
    }

    /// The current posted sale price.
    pub fn sale_price(&self) -> u64 {
        self.sale.token_price()
    }

    /// Cumulative tokens issued by the sale.
    pub fn sale_total_issued(&self) -> u64 {
        self.sale.total_issued()
    }
}
