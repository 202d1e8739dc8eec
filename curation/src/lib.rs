//! Curation core: the deterministic state machine behind the protocol.
//!
//! Authors escrow a stake to submit content, curators vote on it once each, and
//! a distribution closes the item out: 60% of the stake goes back to the author
//! and the remainder is retained by the protocol treasury.
//!
//! Every mutating operation is a single atomic transition over an explicit
//! [`CurationState`] plus an injected [`curate_ledger::Ledger`]. All checks run
//! before the first effect, so a failed call leaves no trace in either.
//!
//! - [`content`]: content records, id issuance, stake escrow
//! - [`voting`]: one-vote-per-curator presence set and reputation
//! - [`rewards`]: stake split and payout
//! - [`engine`]: facade that applies [`Call`]s and produces [`Receipt`]s

pub mod call;
pub mod content;
pub mod engine;
pub mod events;
pub mod rewards;
pub mod state;
pub mod voting;

pub use call::{Call, Receipt};
pub use content::{ContentBook, ContentRecord};
pub use engine::CurationEngine;
pub use events::{CurationEvent, EventLog, SequencedEvent};
pub use rewards::RewardSplit;
pub use state::CurationState;
pub use voting::{CuratorStats, VotingLedger};
