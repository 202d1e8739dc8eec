//! The explicit state container every operation reads and writes.

use curate_governance::GovernanceRegistry;
use curate_ledger::Ledger;
use curate_types::{Amount, CurationError, CurationParams, Identity, StateRoot};
use serde::{Deserialize, Serialize};

use crate::content::ContentBook;
use crate::events::{CurationEvent, EventLog};
use crate::voting::VotingLedger;

/// All persisted curation state.
///
/// There is no process-wide state: independent instances never share anything,
/// and everything that influences a transition is in here or in the ledger the
/// caller passes in. Maps are ordered so the bincode encoding, and therefore
/// [`CurationState::state_root`], depends only on the history of applied calls.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurationState {
    pub(crate) governance: GovernanceRegistry,
    pub(crate) contents: ContentBook,
    pub(crate) voting: VotingLedger,
    /// Ledger account that holds escrowed stake and the treasury.
    pub(crate) escrow_account: Identity,
    /// Stake held for content that is still active.
    pub(crate) escrowed: Amount,
    /// Protocol shares retained from distributions.
    pub(crate) treasury: Amount,
    pub(crate) author_share_bps: u32,
    pub(crate) events: EventLog,
}

impl CurationState {
    /// Fresh deployment: no content, no votes, `owner` controls governance.
    pub fn new(owner: Identity, escrow_account: Identity, params: &CurationParams) -> Self {
        Self {
            governance: GovernanceRegistry::new(owner, Amount::new(params.initial_min_stake)),
            contents: ContentBook::new(),
            voting: VotingLedger::new(),
            escrow_account,
            escrowed: Amount::ZERO,
            treasury: Amount::ZERO,
            author_share_bps: params.author_share_bps,
            events: EventLog::new(),
        }
    }

    /// Change the minimum stake. Only the owner may call this.
    pub fn set_min_stake(
        &mut self,
        caller: &Identity,
        new_value: Amount,
    ) -> Result<(), CurationError> {
        let previous = self.governance.set_min_stake(caller, new_value)?;
        self.events.append(CurationEvent::MinStakeChanged {
            owner: caller.clone(),
            previous,
            min_stake: new_value,
        });
        Ok(())
    }

    pub fn min_stake(&self) -> Amount {
        self.governance.min_stake()
    }

    pub fn owner(&self) -> &Identity {
        self.governance.owner()
    }

    pub fn governance(&self) -> &GovernanceRegistry {
        &self.governance
    }

    pub fn contents(&self) -> &ContentBook {
        &self.contents
    }

    pub fn voting(&self) -> &VotingLedger {
        &self.voting
    }

    pub fn escrow_account(&self) -> &Identity {
        &self.escrow_account
    }

    pub fn escrowed(&self) -> Amount {
        self.escrowed
    }

    pub fn treasury(&self) -> Amount {
        self.treasury
    }

    pub fn author_share_bps(&self) -> u32 {
        self.author_share_bps
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Everything the engine is accountable for in the escrow account.
    pub fn held(&self) -> Option<Amount> {
        self.escrowed.checked_add(self.treasury)
    }

    /// Whether the escrow account covers every stake and the treasury.
    ///
    /// Outside deposits to the escrow account are tolerated, so this is `>=`.
    pub fn is_conserved<L: Ledger>(&self, ledger: &L) -> bool {
        match self.held() {
            Some(held) => ledger.balance(&self.escrow_account) >= held,
            None => false,
        }
    }

    /// Blake2b-256 over the canonical encoding of the whole state.
    pub fn state_root(&self) -> Result<StateRoot, CurationError> {
        StateRoot::of(self).map_err(|e| CurationError::Invariant(format!("encode state: {e}")))
    }
}
