//! Nullable infrastructure for deterministic testing.
//!
//! Inspired by the "A-frame architecture" pattern from RsNano.
//! The external dependencies of the curation core (the ledger and the snapshot
//! store) sit behind traits. This crate provides test-friendly implementations
//! that:
//! - Behave deterministically
//! - Record what the core asked of them
//! - Can be told to fail on demand
//! - Never touch the filesystem
//!
//! Usage: swap real implementations for nullables in tests.

pub mod ledger;
pub mod store;

pub use ledger::{NullLedger, TransferRecord};
pub use store::NullStateStore;
