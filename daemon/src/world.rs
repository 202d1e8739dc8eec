//! The persisted world: curation state plus the balance sheet it settles
//! against, loaded from and saved to a single snapshot file.

use std::collections::BTreeMap;
use std::io::BufRead;

use curate_curation::{Call, ContentRecord, CurationEngine, CurationState, Receipt};
use curate_ledger::BalanceSheet;
use curate_store::{load_snapshot, save_snapshot, FileStore};
use curate_types::{Amount, ContentStatus, Identity, StateRoot};
use serde::Serialize;

use crate::{DaemonConfig, DaemonError};

/// An engine bound to the snapshot file it was loaded from.
///
/// Nothing is written until [`World::save`]; a process that applies a call and
/// exits without saving leaves the file untouched.
pub struct World {
    engine: CurationEngine<BalanceSheet>,
    store: FileStore,
}

impl World {
    /// Deploy a fresh world and write its first snapshot.
    pub fn init(config: &DaemonConfig, force: bool) -> Result<Self, DaemonError> {
        let store = FileStore::new(&config.state_path);
        if !force && store.path().exists() {
            return Err(DaemonError::AlreadyInitialized(config.state_path.clone()));
        }
        let engine = CurationEngine::new(
            Identity::new(config.owner.as_str()),
            Identity::new(config.escrow_account.as_str()),
            &config.params(),
            BalanceSheet::new(),
        );
        let world = Self { engine, store };
        world.save()?;
        tracing::info!(
            path = %config.state_path.display(),
            owner = %config.owner,
            min_stake = config.initial_min_stake,
            "world initialised"
        );
        Ok(world)
    }

    /// Load the world saved at `config.state_path`.
    pub fn open(config: &DaemonConfig) -> Result<Self, DaemonError> {
        let store = FileStore::new(&config.state_path);
        let (state, ledger): (CurationState, BalanceSheet) = load_snapshot(&store)?
            .ok_or_else(|| DaemonError::NotInitialized(config.state_path.clone()))?;
        Ok(Self {
            engine: CurationEngine::from_parts(state, ledger),
            store,
        })
    }

    pub fn save(&self) -> Result<(), DaemonError> {
        save_snapshot(&self.store, &(self.engine.state(), self.engine.ledger()))?;
        Ok(())
    }

    pub fn engine(&self) -> &CurationEngine<BalanceSheet> {
        &self.engine
    }

    /// Mint `amount` into `account`. Stands in for deposits from outside the protocol.
    pub fn fund(&mut self, account: &Identity, amount: Amount) -> Result<Amount, DaemonError> {
        let balance = self.engine.ledger_mut().credit(account, amount)?;
        tracing::info!(account = %account, amount = %amount, balance = %balance, "account funded");
        Ok(balance)
    }

    /// Apply one call. Only successful calls change the world, so only they are saved.
    pub fn apply_and_save(&mut self, call: &Call) -> Result<Receipt, DaemonError> {
        let receipt = self.engine.apply(call);
        if receipt.success {
            self.save()?;
        }
        Ok(receipt)
    }

    /// Apply every call in a JSON-lines log, then save once.
    ///
    /// Blank lines and lines starting with `#` are skipped. A line that fails to
    /// parse aborts the replay before anything is saved.
    pub fn replay(&mut self, log: impl BufRead) -> Result<ReplayReport, DaemonError> {
        let mut calls = Vec::new();
        for (index, line) in log.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let call: Call = serde_json::from_str(trimmed).map_err(|e| DaemonError::CallLog {
                line: index + 1,
                reason: e.to_string(),
            })?;
            calls.push(call);
        }

        let receipts = self.engine.apply_all(&calls);
        self.save()?;

        let accepted = receipts.iter().filter(|r| r.success).count();
        let state_root = self.engine.state_root()?;
        tracing::info!(
            calls = receipts.len(),
            accepted,
            rejected = receipts.len() - accepted,
            state_root = %state_root,
            "call log replayed"
        );
        Ok(ReplayReport {
            receipts,
            stats: self.engine.stats().snapshot(),
            state_root,
        })
    }
}

/// Result of [`World::replay`].
#[derive(Debug)]
pub struct ReplayReport {
    pub receipts: Vec<Receipt>,
    pub stats: BTreeMap<&'static str, u64>,
    pub state_root: StateRoot,
}

/// Content record as printed by the CLI, with the hash in hex.
#[derive(Debug, Serialize)]
pub struct ContentView {
    pub id: u64,
    pub author: String,
    pub content_hash: String,
    pub upvotes: u64,
    pub downvotes: u64,
    pub stake_amount: String,
    pub status: ContentStatus,
}

impl From<&ContentRecord> for ContentView {
    fn from(record: &ContentRecord) -> Self {
        Self {
            id: record.id.raw(),
            author: record.author.to_string(),
            content_hash: record.content_hash.to_hex(),
            upvotes: record.upvotes,
            downvotes: record.downvotes,
            stake_amount: record.stake_amount.to_string(),
            status: record.status,
        }
    }
}
