//! Voting ledger: the `(content, voter)` presence set and curator reputation.

use std::collections::{BTreeMap, BTreeSet};

use curate_types::{ContentId, CurationError, Identity, VoteDirection};
use serde::{Deserialize, Serialize};

use crate::events::CurationEvent;
use crate::state::CurationState;

/// Per-curator engagement counters. Absent curators read as all zeros.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuratorStats {
    pub total_votes: u64,
    pub reputation: u64,
}

impl CuratorStats {
    /// Stats after one more vote, or `None` on counter overflow.
    ///
    /// Both directions earn the same reputation.
    fn after_vote(self) -> Option<Self> {
        Some(Self {
            total_votes: self.total_votes.checked_add(1)?,
            reputation: self.reputation.checked_add(1)?,
        })
    }
}

/// Who voted on what, and how much each curator has voted.
///
/// Vote records are a pure presence set: creation is permanent and nothing
/// about the vote beyond its existence is kept here.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotingLedger {
    votes: BTreeSet<(ContentId, Identity)>,
    curators: BTreeMap<Identity, CuratorStats>,
}

impl VotingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_voted(&self, content_id: ContentId, voter: &Identity) -> bool {
        // Tuple keys force an owned lookup key.
        self.votes.contains(&(content_id, voter.clone()))
    }

    pub fn curator_stats(&self, voter: &Identity) -> CuratorStats {
        self.curators.get(voter).copied().unwrap_or_default()
    }

    pub fn vote_count(&self) -> usize {
        self.votes.len()
    }

    pub fn curator_count(&self) -> usize {
        self.curators.len()
    }

    /// Voters on `content_id`, in identity order.
    pub fn voters_of(&self, content_id: ContentId) -> impl Iterator<Item = &Identity> {
        self.votes
            .range((content_id, Identity::new(""))..)
            .take_while(move |(id, _)| *id == content_id)
            .map(|(_, voter)| voter)
    }
}

impl CurationState {
    /// Record `voter`'s vote on `content_id`.
    ///
    /// Checked in order: the content exists, the voter has not voted on it, and
    /// it is still active.
    pub fn vote_on_content(
        &mut self,
        voter: &Identity,
        content_id: ContentId,
        direction: VoteDirection,
    ) -> Result<(), CurationError> {
        let content = self.contents.get(content_id)?;
        if self.voting.has_voted(content_id, voter) {
            return Err(CurationError::AlreadyVoted {
                content_id,
                voter: voter.clone(),
            });
        }
        if !content.status.is_active() {
            return Err(CurationError::AlreadyRewarded(content_id));
        }

        let (upvotes, downvotes) = match direction {
            VoteDirection::Upvote => (content.upvotes.checked_add(1), Some(content.downvotes)),
            VoteDirection::Downvote => (Some(content.upvotes), content.downvotes.checked_add(1)),
        };
        let (Some(upvotes), Some(downvotes)) = (upvotes, downvotes) else {
            return Err(CurationError::Invariant(format!(
                "vote tally overflow on content {content_id}"
            )));
        };
        let stats = self
            .voting
            .curator_stats(voter)
            .after_vote()
            .ok_or_else(|| CurationError::Invariant(format!("curator stats overflow for {voter}")))?;

        let content = self.contents.get_mut(content_id)?;
        content.upvotes = upvotes;
        content.downvotes = downvotes;
        self.voting.votes.insert((content_id, voter.clone()));
        self.voting.curators.insert(voter.clone(), stats);
        self.events.append(CurationEvent::VoteCast {
            content_id,
            voter: voter.clone(),
            direction,
        });
        Ok(())
    }

    /// Curator stats for `voter`, zeroed if they never voted.
    pub fn curator_stats(&self, voter: &Identity) -> CuratorStats {
        self.voting.curator_stats(voter)
    }

    pub fn has_voted(&self, content_id: ContentId, voter: &Identity) -> bool {
        self.voting.has_voted(content_id, voter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curate_ledger::{BalanceSheet, Ledger};
    use curate_types::{Amount, ContentHash, CurationParams, ErrorCode};

    fn id(s: &str) -> Identity {
        Identity::new(s)
    }

    /// State with content 1 submitted by user1.
    fn setup() -> (CurationState, BalanceSheet) {
        let mut state =
            CurationState::new(id("deployer"), id("escrow"), &CurationParams::default());
        let mut ledger = BalanceSheet::new();
        ledger.credit(&id("user1"), Amount::new(1000)).unwrap();
        state
            .submit_content(&mut ledger, &id("user1"), ContentHash::new(b"test-content-hash".to_vec()))
            .unwrap();
        (state, ledger)
    }

    #[test]
    fn upvote_updates_tally_and_reputation() {
        let (mut state, _) = setup();
        state
            .vote_on_content(&id("user2"), ContentId::new(1), VoteDirection::Upvote)
            .unwrap();

        let content = state.content(ContentId::new(1)).unwrap();
        assert_eq!(content.upvotes, 1);
        assert_eq!(content.downvotes, 0);

        let stats = state.curator_stats(&id("user2"));
        assert_eq!(stats.total_votes, 1);
        assert_eq!(stats.reputation, 1);
        assert!(state.has_voted(ContentId::new(1), &id("user2")));
    }

    #[test]
    fn downvote_earns_the_same_reputation() {
        let (mut state, _) = setup();
        state
            .vote_on_content(&id("user2"), ContentId::new(1), VoteDirection::Downvote)
            .unwrap();
        assert_eq!(state.content(ContentId::new(1)).unwrap().downvotes, 1);
        assert_eq!(state.curator_stats(&id("user2")).reputation, 1);
    }

    #[test]
    fn double_vote_is_rejected_and_counts_unchanged() {
        let (mut state, _) = setup();
        state
            .vote_on_content(&id("user2"), ContentId::new(1), VoteDirection::Upvote)
            .unwrap();
        let before = state.clone();

        for direction in [VoteDirection::Upvote, VoteDirection::Downvote] {
            let err = state
                .vote_on_content(&id("user2"), ContentId::new(1), direction)
                .unwrap_err();
            assert_eq!(err.code(), Some(ErrorCode::AlreadyVoted));
        }
        assert_eq!(state, before);
    }

    #[test]
    fn vote_on_missing_content_is_not_found() {
        let (mut state, _) = setup();
        let err = state
            .vote_on_content(&id("user2"), ContentId::new(999), VoteDirection::Upvote)
            .unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::ContentNotFound));
        assert_eq!(state.curator_stats(&id("user2")), CuratorStats::default());
    }

    #[test]
    fn many_voters_accumulate() {
        let (mut state, _) = setup();
        for voter in ["user2", "user3", "user4"] {
            state
                .vote_on_content(&id(voter), ContentId::new(1), VoteDirection::Upvote)
                .unwrap();
        }
        assert_eq!(state.content(ContentId::new(1)).unwrap().upvotes, 3);
        let voters: Vec<_> = state.voting().voters_of(ContentId::new(1)).collect();
        assert_eq!(voters, vec![&id("user2"), &id("user3"), &id("user4")]);
    }

    #[test]
    fn reputation_counts_distinct_votes_across_content() {
        let (mut state, mut ledger) = setup();
        for _ in 0..3 {
            state
                .submit_content(&mut ledger, &id("user1"), ContentHash::new(vec![1]))
                .unwrap();
        }
        for raw in 1..=4 {
            state
                .vote_on_content(&id("curator"), ContentId::new(raw), VoteDirection::Upvote)
                .unwrap();
        }
        let stats = state.curator_stats(&id("curator"));
        assert_eq!(stats.total_votes, 4);
        assert_eq!(stats.reputation, 4);
        assert_eq!(ledger.balance(&id("user1")), Amount::new(600));
    }

    #[test]
    fn authors_may_vote_on_their_own_content() {
        let (mut state, _) = setup();
        state
            .vote_on_content(&id("user1"), ContentId::new(1), VoteDirection::Upvote)
            .unwrap();
        assert_eq!(state.curator_stats(&id("user1")).total_votes, 1);
    }

    #[test]
    fn unknown_curator_reads_as_zero() {
        let (state, _) = setup();
        assert_eq!(state.curator_stats(&id("ghost")), CuratorStats::default());
    }
}
