//! # Membership Lifecycle
//!
//! Members buy time. A purchase burns the tier price from the buyer and
//! pushes their expiry forward: if the current expiry is still in the
//! future, the tier duration is **added on top** of it, so renewing early
//! never destroys paid-for days. Only after a lapse does the clock restart
//! from the purchase time.
//!
//! The price table is fixed at construction. Expiry timestamps only ever
//! move forward.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use grit_ledger::config;
use grit_ledger::{AccountId, Event, EventLog, Ledger, Role, RoleDirectory};

use crate::error::GymError;

// ---------------------------------------------------------------------------
// Tiers
// ---------------------------------------------------------------------------

/// The membership tiers on offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MembershipTier {
    /// 30 days.
    Monthly,
    /// 90 days.
    Quarterly,
    /// 365 days.
    Annual,
}

impl std::fmt::Display for MembershipTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MembershipTier::Monthly => write!(f, "Monthly"),
            MembershipTier::Quarterly => write!(f, "Quarterly"),
            MembershipTier::Annual => write!(f, "Annual"),
        }
    }
}

/// Price and duration for one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierTerms {
    /// Price in balance units, burned on purchase.
    pub price: u64,
    /// Membership duration in seconds.
    pub duration_secs: u64,
}

/// The fixed tier → (price, duration) mapping. Immutable after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceTable {
    monthly: TierTerms,
    quarterly: TierTerms,
    annual: TierTerms,
}

impl PriceTable {
    /// The standard table from the protocol constants.
    pub fn standard() -> Self {
        Self {
            monthly: TierTerms {
                price: config::MONTHLY_PRICE,
                duration_secs: config::MONTHLY_DURATION_SECS,
            },
            quarterly: TierTerms {
                price: config::QUARTERLY_PRICE,
                duration_secs: config::QUARTERLY_DURATION_SECS,
            },
            annual: TierTerms {
                price: config::ANNUAL_PRICE,
                duration_secs: config::ANNUAL_DURATION_SECS,
            },
        }
    }

    /// Terms for the given tier.
    pub fn terms(&self, tier: MembershipTier) -> TierTerms {
        match tier {
            MembershipTier::Monthly => self.monthly,
            MembershipTier::Quarterly => self.quarterly,
            MembershipTier::Annual => self.annual,
        }
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        Self::standard()
    }
}

// ---------------------------------------------------------------------------
// Program
// ---------------------------------------------------------------------------

/// Per-account membership expiry tracking plus the price table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipProgram {
    table: PriceTable,
    /// Expiry per account. Absent means never purchased.
    expiries: HashMap<AccountId, DateTime<Utc>>,
}

impl MembershipProgram {
    /// Creates the program with the given price table.
    pub fn new(table: PriceTable) -> Self {
        Self {
            table,
            expiries: HashMap::new(),
        }
    }

    /// The table this program sells from.
    pub fn price_table(&self) -> &PriceTable {
        &self.table
    }

    /// Purchases (or extends) a membership for `caller` at `tier`.
    ///
    /// Burns the tier price, then advances the expiry: stacking on top of a
    /// still-active membership, restarting from `now` after a lapse.
    /// Returns the new expiry.
    ///
    /// # Errors
    ///
    /// Returns an authorization error if `caller` lacks the Member tag, a
    /// state-gate error while paused, and a precondition error if the
    /// caller cannot cover the price. On any error the expiry is unchanged.
    pub fn purchase(
        &mut self,
        roles: &RoleDirectory,
        ledger: &mut Ledger,
        events: &mut EventLog,
        caller: &str,
        tier: MembershipTier,
        now: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, GymError> {
        roles.require(caller, Role::Member)?;
        let terms = self.table.terms(tier);

        // The burn is the only fallible step; expiry moves after it lands.
        ledger.burn(caller, terms.price)?;

        let duration = Duration::seconds(terms.duration_secs as i64);
        let new_expiry = match self.expiries.get(caller) {
            Some(&expiry) if expiry > now => expiry + duration,
            _ => now + duration,
        };
        self.expiries.insert(caller.to_string(), new_expiry);

        tracing::info!(account = %caller, %tier, %new_expiry, "membership purchased");
        events.record(Event::MembershipPurchased {
            account: caller.to_string(),
            tier: tier.to_string(),
            duration_secs: terms.duration_secs,
        });
        Ok(new_expiry)
    }

    /// The stored expiry for `account`, if it ever purchased.
    pub fn expiry_of(&self, account: &str) -> Option<DateTime<Utc>> {
        self.expiries.get(account).copied()
    }

    /// Seconds of membership left at `now`: `max(0, expiry - now)`.
    ///
    /// Pure read; never fails. Accounts that never purchased have 0.
    pub fn remaining_time(&self, account: &str, now: DateTime<Utc>) -> u64 {
        match self.expiries.get(account) {
            Some(&expiry) if expiry > now => (expiry - now).num_seconds() as u64,
            _ => 0,
        }
    }
}

impl Default for MembershipProgram {
    fn default() -> Self {
        Self::new(PriceTable::standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use grit_ledger::ErrorClass;

    fn setup(balance: u64) -> (RoleDirectory, Ledger, EventLog, MembershipProgram) {
        let mut roles = RoleDirectory::bootstrap("boss");
        roles.grant("boss", "alice", Role::Member).unwrap();
        let mut ledger = Ledger::new();
        ledger.mint("alice", balance).unwrap();
        (roles, ledger, EventLog::new(), MembershipProgram::default())
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn purchase_burns_price_and_sets_expiry() {
        let (roles, mut ledger, mut events, mut program) = setup(200);
        let now = t0();

        let expiry = program
            .purchase(&roles, &mut ledger, &mut events, "alice", MembershipTier::Monthly, now)
            .unwrap();

        assert_eq!(ledger.balance_of("alice"), 150);
        assert_eq!(expiry, now + Duration::seconds(config::MONTHLY_DURATION_SECS as i64));
        assert_eq!(program.remaining_time("alice", now), config::MONTHLY_DURATION_SECS);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn early_renewal_stacks_on_existing_expiry() {
        let (roles, mut ledger, mut events, mut program) = setup(200);
        let now = t0();

        program
            .purchase(&roles, &mut ledger, &mut events, "alice", MembershipTier::Monthly, now)
            .unwrap();
        // Renew ten days in, well before the first expiry.
        let later = now + Duration::days(10);
        let expiry = program
            .purchase(&roles, &mut ledger, &mut events, "alice", MembershipTier::Monthly, later)
            .unwrap();

        // 60 days from the first purchase, not 30 from the second.
        assert_eq!(expiry, now + Duration::days(60));
    }

    #[test]
    fn purchase_after_lapse_restarts_from_now() {
        let (roles, mut ledger, mut events, mut program) = setup(200);
        let now = t0();

        program
            .purchase(&roles, &mut ledger, &mut events, "alice", MembershipTier::Monthly, now)
            .unwrap();
        // Come back 45 days later — 15 days lapsed.
        let later = now + Duration::days(45);
        let expiry = program
            .purchase(&roles, &mut ledger, &mut events, "alice", MembershipTier::Monthly, later)
            .unwrap();

        assert_eq!(expiry, later + Duration::days(30));
    }

    #[test]
    fn expiry_never_decreases_across_purchases() {
        let (roles, mut ledger, mut events, mut program) = setup(1_000);
        let mut now = t0();

        for _ in 0..4 {
            let before = program.remaining_time("alice", now);
            program
                .purchase(&roles, &mut ledger, &mut events, "alice", MembershipTier::Monthly, now)
                .unwrap();
            let after = program.remaining_time("alice", now);
            assert!(after >= before);
            now += Duration::days(7);
        }
    }

    #[test]
    fn non_member_cannot_purchase() {
        let (roles, mut ledger, mut events, mut program) = setup(200);
        let err = program
            .purchase(&roles, &mut ledger, &mut events, "boss", MembershipTier::Monthly, t0())
            .unwrap_err();
        assert_eq!(err.class(), ErrorClass::Authorization);
        assert_eq!(program.remaining_time("boss", t0()), 0);
    }

    #[test]
    fn insufficient_balance_leaves_expiry_unchanged() {
        let (roles, mut ledger, mut events, mut program) = setup(10);
        let err = program
            .purchase(&roles, &mut ledger, &mut events, "alice", MembershipTier::Monthly, t0())
            .unwrap_err();
        assert_eq!(err.class(), ErrorClass::Precondition);
        assert_eq!(ledger.balance_of("alice"), 10);
        assert!(program.expiry_of("alice").is_none());
    }

    #[test]
    fn remaining_time_is_zero_after_expiry() {
        let (roles, mut ledger, mut events, mut program) = setup(200);
        let now = t0();
        program
            .purchase(&roles, &mut ledger, &mut events, "alice", MembershipTier::Monthly, now)
            .unwrap();

        let long_after = now + Duration::days(31);
        assert_eq!(program.remaining_time("alice", long_after), 0);
    }

    #[test]
    fn tiers_have_distinct_terms() {
        let table = PriceTable::standard();
        assert_eq!(table.terms(MembershipTier::Monthly).price, config::MONTHLY_PRICE);
        assert_eq!(table.terms(MembershipTier::Quarterly).price, config::QUARTERLY_PRICE);
        assert_eq!(table.terms(MembershipTier::Annual).price, config::ANNUAL_PRICE);
        assert!(
            table.terms(MembershipTier::Annual).duration_secs
                > table.terms(MembershipTier::Monthly).duration_secs
        );
    }

    #[test]
    fn program_serialization_roundtrip() {
        let (roles, mut ledger, mut events, mut program) = setup(200);
        let now = t0();
        program
            .purchase(&roles, &mut ledger, &mut events, "alice", MembershipTier::Annual, now)
            .unwrap();

        let json = serde_json::to_string(&program).unwrap();
        let restored: MembershipProgram = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.expiry_of("alice"), program.expiry_of("alice"));
    }
}
