//! Fundamental types for the curation protocol.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! identities, amounts, content ids and hashes, vote directions, protocol parameters,
//! the stable error codes and the state root digest.

pub mod amount;
pub mod content;
pub mod error;
pub mod hash;
pub mod identity;
pub mod params;
pub mod vote;

pub use amount::Amount;
pub use content::{ContentHash, ContentId, ContentStatus};
pub use error::{CurationError, ErrorCode};
pub use hash::StateRoot;
pub use identity::Identity;
pub use params::CurationParams;
pub use vote::VoteDirection;
