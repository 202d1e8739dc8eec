//! In-memory account balances.

use std::collections::BTreeMap;

use curate_types::{Amount, Identity};
use serde::{Deserialize, Serialize};

use crate::{Ledger, LedgerError};

/// Account balances keyed by identity.
///
/// Ordered so its serialized form (and therefore any digest over it) is
/// independent of insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheet {
    balances: BTreeMap<Identity, Amount>,
}

impl BalanceSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` to `account` out of thin air (genesis funding, faucets, tests).
    pub fn credit(&mut self, account: &Identity, amount: Amount) -> Result<Amount, LedgerError> {
        let current = self.balance(account);
        let updated = current
            .checked_add(amount)
            .ok_or_else(|| LedgerError::Overflow(account.to_string()))?;
        self.balances.insert(account.clone(), updated);
        tracing::debug!(account = %account, amount = %amount, balance = %updated, "credited");
        Ok(updated)
    }

    /// Sum of every balance. Transfers never change it.
    pub fn total_supply(&self) -> u128 {
        self.balances
            .values()
            .fold(0u128, |acc, a| acc.saturating_add(a.raw()))
    }

    pub fn accounts(&self) -> impl Iterator<Item = (&Identity, &Amount)> {
        self.balances.iter()
    }

    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }
}

impl Ledger for BalanceSheet {
    fn balance(&self, account: &Identity) -> Amount {
        self.balances.get(account).copied().unwrap_or(Amount::ZERO)
    }

    fn transfer(
        &mut self,
        from: &Identity,
        to: &Identity,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        if amount.is_zero() || from == to {
            return Ok(());
        }
        let available = self.balance(from);
        let debited = available
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::InsufficientFunds {
                account: from.to_string(),
                needed: amount.raw(),
                available: available.raw(),
            })?;
        let credited = self
            .balance(to)
            .checked_add(amount)
            .ok_or_else(|| LedgerError::Overflow(to.to_string()))?;

        self.balances.insert(from.clone(), debited);
        self.balances.insert(to.clone(), credited);
        Ok(())
    }
}
