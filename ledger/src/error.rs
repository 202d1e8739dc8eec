use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("insufficient funds in {account}: need {needed}, have {available}")]
    InsufficientFunds {
        account: String,
        needed: u128,
        available: u128,
    },

    #[error("balance overflow crediting {0}")]
    Overflow(String),

    #[error("ledger unavailable: {0}")]
    Unavailable(String),
}
