//! # GRIT Lifecycle Programs
//!
//! The programs that make the ledger a gym. Each one reads the role
//! directory, mutates the balance ledger through its four primitives, keeps
//! its own auxiliary records, and emits one notification per completed call:
//!
//! - **Membership** — tiered purchases that burn balance and stack expiry
//!   time, so early renewers never lose paid-for days.
//! - **Referral** — manager-triggered rewards minted to active members.
//! - **Challenge** — a strict register-then-complete protocol with one
//!   active challenge per account and at most one payout per registration.
//! - **Training** — trainer-created sessions with paid, non-exclusive
//!   booking.
//! - **Sale** — public token issuance at a posted price, drawn from a
//!   pre-funded sale account. Never mints.
//! - **Gym** — the facade that owns all of the above and exposes the public
//!   operation surface.
//!
//! ## Design Principles
//!
//! 1. Role and pause gates run before the first mutation — a refused call
//!    leaves no partial state.
//! 2. The only fallible ledger primitive in any operation runs before that
//!    operation's own bookkeeping, so the two halves land together or not
//!    at all.
//! 3. Time is an explicit `now` argument, never a wall-clock read. Tests
//!    drive the clock.
//! 4. Every public type is serializable (serde) for wire transport and
//!    persistent storage.

pub mod challenge;
pub mod error;
pub mod gym;
pub mod membership;
pub mod referral;
pub mod sale;
pub mod training;

pub use error::GymError;
pub use gym::Gym;
pub use membership::MembershipTier;
