// Copyright (c) 2026 GRIT Labs. MIT License.
// See LICENSE for details.

//! # GRIT Core Ledger
//!
//! The accounting heart of GRIT: one fungible balance per account, used as
//! the unit of account for everything a gym does — memberships are burned,
//! staff are paid by transfer, referrals and challenge wins are minted, and
//! the public sale issues balance at a posted price.
//!
//! This crate owns the state that every program touches and nothing else:
//!
//! - **account** — account identity and the null-identity rule.
//! - **roles** — capability tags (Manager, Staff, Member, Trainer) and the
//!   directory that is the *sole* authorization gate.
//! - **ledger** — the balance store. Exactly four ways to move value:
//!   `mint`, `burn`, `transfer`, `balance_of`. Nothing else compiles.
//! - **event** — the append-only notification log.
//! - **error** — one error taxonomy for the whole workspace, classed as
//!   authorization / precondition / state-gate failures.
//! - **config** — every tunable number, in one place.
//!
//! ## Design Philosophy
//!
//! 1. If it touches balances, it goes through the four primitives.
//! 2. All balance arithmetic is checked — wrapping math and money do not mix.
//! 3. Every failed call leaves state exactly as it found it.
//! 4. Every public type is serializable (serde) for wire transport and
//!    persistent storage.

pub mod account;
pub mod config;
pub mod error;
pub mod event;
pub mod ledger;
pub mod roles;

pub use account::AccountId;
pub use error::{ErrorClass, LedgerError};
pub use event::{Event, EventLog};
pub use ledger::Ledger;
pub use roles::{Role, RoleDirectory};
