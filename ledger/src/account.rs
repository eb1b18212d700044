//! # Account Identity
//!
//! Accounts are opaque string identities, assigned off-ledger (front desk,
//! key fob, whatever the deployment uses). The ledger never interprets them
//! beyond equality — with one exception: the empty string is the null
//! identity and is never a valid target for grants or mints.

/// Opaque account identity. The empty string is the null identity.
pub type AccountId = String;

/// Returns `true` if `account` is the null identity.
///
/// Grants, revokes, and mints reject the null identity so that value and
/// capabilities can never be parked on an address nobody controls.
pub fn is_null(account: &str) -> bool {
    account.is_empty()
}
