//! Nullable ledger: real balances, recorded transfers, injectable failures.

use curate_ledger::{BalanceSheet, Ledger, LedgerError};
use curate_types::{Amount, Identity};

/// One transfer the core performed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferRecord {
    pub from: Identity,
    pub to: Identity,
    pub amount: Amount,
}

/// A ledger for tests.
///
/// Balances behave like [`BalanceSheet`]. Every successful transfer is
/// recorded, and the next transfer can be forced to fail.
#[derive(Default)]
pub struct NullLedger {
    balances: BalanceSheet,
    transfers: Vec<TransferRecord>,
    next_failure: Option<LedgerError>,
}

impl NullLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given balances.
    pub fn with_balances<'a>(balances: impl IntoIterator<Item = (&'a str, u128)>) -> Self {
        let mut ledger = Self::new();
        for (who, amount) in balances {
            ledger.fund(&Identity::new(who), amount);
        }
        ledger
    }

    /// Credit an account. Panics on overflow, which only a broken test can cause.
    pub fn fund(&mut self, account: &Identity, amount: u128) {
        self.balances
            .credit(account, Amount::new(amount))
            .expect("test funding overflowed");
    }

    /// Make the next `transfer` fail with `error` and leave balances untouched.
    pub fn fail_next_transfer(&mut self, error: LedgerError) {
        self.next_failure = Some(error);
    }

    /// Successful transfers, oldest first.
    pub fn transfers(&self) -> &[TransferRecord] {
        &self.transfers
    }

    pub fn total_supply(&self) -> u128 {
        self.balances.total_supply()
    }

    /// Clear the transfer record and any pending failure.
    pub fn reset(&mut self) {
        self.transfers.clear();
        self.next_failure = None;
    }
}

impl Ledger for NullLedger {
    fn balance(&self, account: &Identity) -> Amount {
        self.balances.balance(account)
    }

    fn transfer(
        &mut self,
        from: &Identity,
        to: &Identity,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        if let Some(error) = self.next_failure.take() {
            return Err(error);
        }
        self.balances.transfer(from, to, amount)?;
        self.transfers.push(TransferRecord {
            from: from.clone(),
            to: to.clone(),
            amount,
        });
        Ok(())
    }
}
