//! Append-only record of successful transitions.

use curate_types::{Amount, ContentId, Identity, VoteDirection};
use serde::{Deserialize, Serialize};

/// One successful state transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurationEvent {
    ContentSubmitted {
        content_id: ContentId,
        author: Identity,
        stake: Amount,
    },
    VoteCast {
        content_id: ContentId,
        voter: Identity,
        direction: VoteDirection,
    },
    RewardsDistributed {
        content_id: ContentId,
        caller: Identity,
        author: Identity,
        author_reward: Amount,
        protocol_share: Amount,
    },
    MinStakeChanged {
        owner: Identity,
        previous: Amount,
        min_stake: Amount,
    },
}

/// An event with its position in the log. Sequences start at 1.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencedEvent {
    pub sequence: u64,
    pub event: CurationEvent,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    entries: Vec<SequencedEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(&mut self, event: CurationEvent) -> u64 {
        let sequence = self.entries.len() as u64 + 1;
        self.entries.push(SequencedEvent { sequence, event });
        sequence
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&SequencedEvent> {
        self.entries.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SequencedEvent> {
        self.entries.iter()
    }

    /// Events with `sequence > after`.
    pub fn since(&self, after: u64) -> &[SequencedEvent] {
        let start = (after as usize).min(self.entries.len());
        &self.entries[start..]
    }
}
