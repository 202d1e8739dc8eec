use std::path::PathBuf;

use curate_ledger::LedgerError;
use curate_store::StoreError;
use curate_types::CurationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("config error: {0}")]
    Config(String),

    #[error("no world at {0}; run `curate-daemon init` first")]
    NotInitialized(PathBuf),

    #[error("a world already exists at {0}; pass --force to overwrite")]
    AlreadyInitialized(PathBuf),

    #[error("snapshot error: {0}")]
    Store(#[from] StoreError),

    #[error("funding failed: {0}")]
    Funding(#[from] LedgerError),

    #[error("call log line {line}: {reason}")]
    CallLog { line: usize, reason: String },

    #[error(transparent)]
    Curation(#[from] CurationError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
