//! Ledger adapter.
//!
//! The native currency lives outside the curation core. The core only needs two
//! capabilities from it: read an account balance and move an amount between two
//! accounts. [`Ledger`] is that seam; [`BalanceSheet`] is a self-contained
//! in-memory implementation used by the daemon.

pub mod balance_sheet;
pub mod error;

pub use balance_sheet::BalanceSheet;
pub use error::LedgerError;

use curate_types::{Amount, Identity};

/// Balance and transfer primitive of the surrounding ledger.
pub trait Ledger {
    /// Spendable balance of `account`. Unknown accounts hold zero.
    fn balance(&self, account: &Identity) -> Amount;

    /// Move `amount` from `from` to `to`.
    ///
    /// Must be all-or-nothing: on error neither balance changes.
    fn transfer(&mut self, from: &Identity, to: &Identity, amount: Amount)
        -> Result<(), LedgerError>;
}
