//! Protocol parameters fixed or defaulted at deployment.

use serde::{Deserialize, Serialize};

/// Deployment-time protocol parameters.
///
/// `min_stake` here is only the initial value; afterwards it is owned by the
/// governance registry and changed through `set_min_stake`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurationParams {
    /// Initial minimum stake (raw units) required to submit content.
    pub initial_min_stake: u128,

    /// Author's share of a distributed stake, in basis points.
    pub author_share_bps: u32,
}

impl CurationParams {
    /// Author receives 60% of the stake on distribution.
    pub const AUTHOR_SHARE_BPS: u32 = 6000;

    /// Default initial minimum stake.
    pub const DEFAULT_MIN_STAKE: u128 = 100;

    pub fn with_min_stake(initial_min_stake: u128) -> Self {
        Self {
            initial_min_stake,
            ..Self::default()
        }
    }
}

impl Default for CurationParams {
    fn default() -> Self {
        Self {
            initial_min_stake: Self::DEFAULT_MIN_STAKE,
            author_share_bps: Self::AUTHOR_SHARE_BPS,
        }
    }
}
