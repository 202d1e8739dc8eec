//! Content store: records, sequential ids and stake escrow on submission.

use std::collections::BTreeMap;

use curate_ledger::{Ledger, LedgerError};
use curate_types::{Amount, ContentHash, ContentId, ContentStatus, CurationError, Identity};
use serde::{Deserialize, Serialize};

use crate::events::CurationEvent;
use crate::state::CurationState;

/// A submitted content item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub id: ContentId,
    pub author: Identity,
    pub content_hash: ContentHash,
    pub upvotes: u64,
    pub downvotes: u64,
    /// Escrowed at submission; never changes afterwards.
    pub stake_amount: Amount,
    pub status: ContentStatus,
}

impl ContentRecord {
    pub fn total_votes(&self) -> u64 {
        self.upvotes.saturating_add(self.downvotes)
    }

    pub fn has_votes(&self) -> bool {
        self.upvotes > 0 || self.downvotes > 0
    }
}

/// Every content record, keyed by id, plus the id counter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBook {
    records: BTreeMap<ContentId, ContentRecord>,
    /// The id the next successful submission receives.
    next_id: ContentId,
}

impl ContentBook {
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: ContentId::FIRST,
        }
    }

    pub fn get(&self, id: ContentId) -> Result<&ContentRecord, CurationError> {
        self.records
            .get(&id)
            .ok_or(CurationError::ContentNotFound(id))
    }

    pub(crate) fn get_mut(&mut self, id: ContentId) -> Result<&mut ContentRecord, CurationError> {
        self.records
            .get_mut(&id)
            .ok_or(CurationError::ContentNotFound(id))
    }

    pub fn contains(&self, id: ContentId) -> bool {
        self.records.contains_key(&id)
    }

    /// The id the next successful submission will receive.
    pub fn peek_next_id(&self) -> ContentId {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContentRecord> {
        self.records.values()
    }

    /// Content authored by `author`, in id order.
    pub fn by_author<'a>(&'a self, author: &'a Identity) -> impl Iterator<Item = &'a ContentRecord> {
        self.records.values().filter(move |r| &r.author == author)
    }

    /// Insert a record under the current counter value and advance the counter.
    ///
    /// `following` must be `next_id.next()`, computed by the caller during its
    /// checks, so this step cannot fail.
    fn commit(&mut self, record: ContentRecord, following: ContentId) {
        debug_assert_eq!(record.id, self.next_id);
        self.records.insert(record.id, record);
        self.next_id = following;
    }
}

impl Default for ContentBook {
    fn default() -> Self {
        Self::new()
    }
}

impl CurationState {
    /// Escrow the current minimum stake from `author` and record new content.
    ///
    /// Fails with `InsufficientStake` if the author cannot cover the stake; in that
    /// case no id is consumed and nothing is transferred. The escrow account
    /// itself cannot author content, since its stake would never leave it.
    pub fn submit_content<L: Ledger>(
        &mut self,
        ledger: &mut L,
        author: &Identity,
        content_hash: ContentHash,
    ) -> Result<ContentId, CurationError> {
        if *author == self.escrow_account {
            return Err(CurationError::EscrowAuthor(author.clone()));
        }
        let stake = self.governance.min_stake();
        let available = ledger.balance(author);
        if available < stake {
            return Err(CurationError::InsufficientStake {
                needed: stake.raw(),
                available: available.raw(),
            });
        }

        let id = self.contents.peek_next_id();
        let following = id
            .next()
            .ok_or_else(|| CurationError::Invariant("content id space exhausted".into()))?;
        let escrowed = self
            .escrowed
            .checked_add(stake)
            .ok_or_else(|| CurationError::Invariant("escrow total overflow".into()))?;

        ledger
            .transfer(author, &self.escrow_account, stake)
            .map_err(|e| match e {
                LedgerError::InsufficientFunds {
                    needed, available, ..
                } => CurationError::InsufficientStake { needed, available },
                other => CurationError::Ledger(other.to_string()),
            })?;

        self.contents.commit(
            ContentRecord {
                id,
                author: author.clone(),
                content_hash,
                upvotes: 0,
                downvotes: 0,
                stake_amount: stake,
                status: ContentStatus::Active,
            },
            following,
        );
        self.escrowed = escrowed;
        self.events.append(CurationEvent::ContentSubmitted {
            content_id: id,
            author: author.clone(),
            stake,
        });
        Ok(id)
    }

    /// Read a content record.
    pub fn content(&self, id: ContentId) -> Result<&ContentRecord, CurationError> {
        self.contents.get(id)
    }
}
