//! # Token Sale Gateway
//!
//! Converts incoming payment into ledger balance at a posted price. The
//! sale never mints: it sells down a pre-funded balance held by its own
//! sale account inside the ledger, so issuance can never outrun what the
//! managers provisioned.
//!
//! Pricing is integer: `tokens = payment / price`, remainder discarded.
//! The remainder stays inside the recorded payment — nothing is refunded.
//! Collected payment is an external-unit tally only; fund custody is the
//! embedding application's problem.

use serde::{Deserialize, Serialize};

use grit_ledger::config::DEFAULT_TOKEN_PRICE;
use grit_ledger::{AccountId, Event, EventLog, Ledger, Role, RoleDirectory};

use crate::error::GymError;

/// The public sale position: price, issuance tally, and collected payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenSale {
    /// The ledger account holding the pre-funded sale inventory.
    sale_account: AccountId,
    /// Payment units per token.
    token_price: u64,
    /// Cumulative tokens ever issued by this sale.
    total_issued: u64,
    /// Payment units collected since the last withdrawal.
    collected: u64,
}

impl TokenSale {
    /// Creates a sale selling from `sale_account` at `token_price`.
    ///
    /// # Errors
    ///
    /// Returns [`GymError::InvalidPrice`] if `token_price` is zero.
    pub fn new(sale_account: impl Into<AccountId>, token_price: u64) -> Result<Self, GymError> {
        if token_price == 0 {
            return Err(GymError::InvalidPrice(token_price));
        }
        Ok(Self {
            sale_account: sale_account.into(),
            token_price,
            total_issued: 0,
            collected: 0,
        })
    }

    /// Creates a sale at the default posted price.
    pub fn at_default_price(sale_account: impl Into<AccountId>) -> Self {
        Self::new(sale_account, DEFAULT_TOKEN_PRICE).expect("default price is nonzero")
    }

    /// The account the sale issues from.
    pub fn sale_account(&self) -> &str {
        &self.sale_account
    }

    /// The current posted price in payment units per token.
    pub fn token_price(&self) -> u64 {
        self.token_price
    }

    /// Cumulative tokens ever issued.
    pub fn total_issued(&self) -> u64 {
        self.total_issued
    }

    /// Payment units collected and not yet withdrawn.
    pub fn collected(&self) -> u64 {
        self.collected
    }

    /// Sells tokens to `buyer` against `payment_amount` payment units.
    ///
    /// Open to any caller. Issues `payment_amount / token_price` tokens
    /// (integer division) by transferring them from the sale account.
    /// Returns the number of tokens issued.
    ///
    /// # Errors
    ///
    /// Returns [`GymError::InvalidAmount`] for a zero payment, a
    /// precondition error if the sale account cannot cover the issuance,
    /// and a state-gate error while paused. Nothing is recorded on failure.
    pub fn sell(
        &mut self,
        ledger: &mut Ledger,
        events: &mut EventLog,
        buyer: &str,
        payment_amount: u64,
    ) -> Result<u64, GymError> {
        if payment_amount == 0 {
            return Err(GymError::InvalidAmount(payment_amount));
        }

        let tokens = payment_amount / self.token_price;
        ledger.transfer(&self.sale_account, buyer, tokens)?;

        self.total_issued = self.total_issued.saturating_add(tokens);
        self.collected = self.collected.saturating_add(payment_amount);

        tracing::info!(buyer = %buyer, payment = payment_amount, tokens, "tokens sold");
        events.record(Event::TokensSold {
            buyer: buyer.to_string(),
            payment: payment_amount,
            tokens,
        });
        Ok(tokens)
    }

    /// Withdraws the collected payment tally. Caller must hold Manager.
    /// Returns the amount withdrawn.
    ///
    /// # Errors
    ///
    /// Returns an authorization error for non-Managers and
    /// [`GymError::NothingToWithdraw`] when nothing has been collected.
    pub fn withdraw(
        &mut self,
        roles: &RoleDirectory,
        events: &mut EventLog,
        caller: &str,
    ) -> Result<u64, GymError> {
        roles.require(caller, Role::Manager)?;
        if self.collected == 0 {
            return Err(GymError::NothingToWithdraw);
        }

        let amount = self.collected;
        self.collected = 0;

        tracing::info!(to = %caller, amount, "sale funds withdrawn");
        events.record(Event::FundsWithdrawn {
            to: caller.to_string(),
            amount,
        });
        Ok(amount)
    }

    /// Reposts the price. Caller must hold Manager; the price must be
    /// strictly positive.
    pub fn set_price(
        &mut self,
        roles: &RoleDirectory,
        caller: &str,
        new_price: u64,
    ) -> Result<(), GymError> {
        roles.require(caller, Role::Manager)?;
        if new_price == 0 {
            return Err(GymError::InvalidPrice(new_price));
        }
        self.token_price = new_price;
        tracing::info!(new_price, "sale price updated");
        Ok(())
    }
}
