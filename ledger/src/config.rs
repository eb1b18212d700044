//! # Protocol Constants
//!
//! Every tunable number in GRIT lives here. If you're hardcoding a price
//! or a duration somewhere else, you're doing it wrong.
//!
//! Amounts are in the smallest balance unit; durations are in seconds.

// ---------------------------------------------------------------------------
// Membership Tiers
// ---------------------------------------------------------------------------

/// Price of a Monthly membership.
pub const MONTHLY_PRICE: u64 = 50;

/// Duration of a Monthly membership: 30 days.
pub const MONTHLY_DURATION_SECS: u64 = 30 * 24 * 60 * 60;

/// Price of a Quarterly membership.
pub const QUARTERLY_PRICE: u64 = 135;

/// Duration of a Quarterly membership: 90 days.
pub const QUARTERLY_DURATION_SECS: u64 = 90 * 24 * 60 * 60;

/// Price of an Annual membership.
pub const ANNUAL_PRICE: u64 = 480;

/// Duration of an Annual membership: 365 days.
pub const ANNUAL_DURATION_SECS: u64 = 365 * 24 * 60 * 60;

// ---------------------------------------------------------------------------
// Incentives
// ---------------------------------------------------------------------------

/// Fixed amount minted to a referrer per successful referral.
pub const REFERRAL_REWARD: u64 = 25;

// ---------------------------------------------------------------------------
// Token Sale
// ---------------------------------------------------------------------------

/// Default sale price: payment units per token. Managers can change it at
/// runtime via the sale's `set_price`.
pub const DEFAULT_TOKEN_PRICE: u64 = 100;

/// The reserved ledger identity holding the sale's pre-funded inventory.
/// Managers provision it via direct mints.
pub const SALE_ACCOUNT: &str = "gym.sale";
