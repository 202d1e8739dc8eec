//! Reward engine: closes out a voted content item and pays out its stake.
//!
//! The author receives `floor(stake * 60%)`. The remainder stays in the escrow
//! account and is credited to the protocol treasury, so exactly `stake` leaves
//! the item's escrow and nothing is ever paid twice.

use curate_ledger::Ledger;
use curate_types::{Amount, ContentId, ContentStatus, CurationError, Identity};
use serde::{Deserialize, Serialize};

use crate::content::ContentRecord;
use crate::events::CurationEvent;
use crate::state::CurationState;

/// How a stake is divided on distribution. `author + protocol == stake`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardSplit {
    pub author: Amount,
    pub protocol: Amount,
}

impl RewardSplit {
    /// Split `stake`, truncating the author's share.
    pub fn compute(stake: Amount, author_share_bps: u32) -> Self {
        let author = stake.share_bps(author_share_bps);
        Self {
            author,
            // share_bps never exceeds its input
            protocol: stake.saturating_sub(author),
        }
    }

    pub fn total(&self) -> Option<Amount> {
        self.author.checked_add(self.protocol)
    }
}

/// Check that `content` can be distributed and compute its split.
///
/// Content with no votes, or already rewarded, is invalid for distribution.
pub fn plan(content: &ContentRecord, author_share_bps: u32) -> Result<RewardSplit, CurationError> {
    if !content.has_votes() {
        return Err(CurationError::NoVotes(content.id));
    }
    if content.status != ContentStatus::Active {
        return Err(CurationError::AlreadyRewarded(content.id));
    }
    Ok(RewardSplit::compute(content.stake_amount, author_share_bps))
}

impl CurationState {
    /// Pay out the stake of `content_id` and mark it rewarded.
    ///
    /// Anyone may trigger distribution; `caller` is only recorded. A shortfall in
    /// the escrow account is an invariant violation, not a caller error.
    pub fn distribute_rewards<L: Ledger>(
        &mut self,
        ledger: &mut L,
        caller: &Identity,
        content_id: ContentId,
    ) -> Result<RewardSplit, CurationError> {
        let content = self.contents.get(content_id)?;
        let split = plan(content, self.author_share_bps)?;
        let stake = content.stake_amount;
        let author = content.author.clone();

        if split.total() != Some(stake) {
            return Err(CurationError::Invariant(format!(
                "split of content {content_id} does not sum to its stake"
            )));
        }
        let escrowed = self.escrowed.checked_sub(stake).ok_or_else(|| {
            CurationError::Invariant(format!("escrow total below stake of content {content_id}"))
        })?;
        let treasury = self
            .treasury
            .checked_add(split.protocol)
            .ok_or_else(|| CurationError::Invariant("treasury overflow".into()))?;
        let held = ledger.balance(&self.escrow_account);
        if held < split.author {
            return Err(CurationError::Invariant(format!(
                "escrow account holds {held}, payout needs {}",
                split.author
            )));
        }

        ledger
            .transfer(&self.escrow_account, &author, split.author)
            .map_err(|e| CurationError::Ledger(e.to_string()))?;

        self.contents.get_mut(content_id)?.status = ContentStatus::Rewarded;
        self.escrowed = escrowed;
        self.treasury = treasury;
        self.events.append(CurationEvent::RewardsDistributed {
            content_id,
            caller: caller.clone(),
            author,
            author_reward: split.author,
            protocol_share: split.protocol,
        });
        Ok(split)
    }
}
