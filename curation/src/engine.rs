//! Engine facade: owns a state container and a ledger and applies calls.

use curate_ledger::Ledger;
use curate_types::{
    Amount, ContentHash, ContentId, CurationError, CurationParams, Identity, StateRoot,
    VoteDirection,
};
use curate_utils::StatsCounter;

use crate::call::{Call, DecodedCall, Receipt};
use crate::content::ContentRecord;
use crate::rewards::RewardSplit;
use crate::state::CurationState;
use crate::voting::CuratorStats;

const SUBMIT_ACCEPTED: &str = "submit_content.accepted";
const SUBMIT_REJECTED: &str = "submit_content.rejected";
const VOTE_ACCEPTED: &str = "vote_on_content.accepted";
const VOTE_REJECTED: &str = "vote_on_content.rejected";
const DISTRIBUTE_ACCEPTED: &str = "distribute_rewards.accepted";
const DISTRIBUTE_REJECTED: &str = "distribute_rewards.rejected";
const SET_MIN_STAKE_ACCEPTED: &str = "set_min_stake.accepted";
const SET_MIN_STAKE_REJECTED: &str = "set_min_stake.rejected";

const COUNTERS: &[&str] = &[
    SUBMIT_ACCEPTED,
    SUBMIT_REJECTED,
    VOTE_ACCEPTED,
    VOTE_REJECTED,
    DISTRIBUTE_ACCEPTED,
    DISTRIBUTE_REJECTED,
    SET_MIN_STAKE_ACCEPTED,
    SET_MIN_STAKE_REJECTED,
];

/// The curation state machine bound to a ledger.
///
/// Calls are applied one at a time through `&mut self`; each either commits in
/// full or returns an error with state and ledger untouched. The typed methods
/// trust the identities they are given; [`CurationEngine::apply`] also rejects
/// malformed senders arriving from a call log.
pub struct CurationEngine<L: Ledger> {
    state: CurationState,
    ledger: L,
    stats: StatsCounter,
}

impl<L: Ledger> CurationEngine<L> {
    /// Deploy a fresh engine.
    pub fn new(owner: Identity, escrow_account: Identity, params: &CurationParams, ledger: L) -> Self {
        Self::from_parts(CurationState::new(owner, escrow_account, params), ledger)
    }

    /// Resume from previously persisted state.
    pub fn from_parts(state: CurationState, ledger: L) -> Self {
        Self {
            state,
            ledger,
            stats: StatsCounter::new(COUNTERS),
        }
    }

    pub fn into_parts(self) -> (CurationState, L) {
        (self.state, self.ledger)
    }

    pub fn state(&self) -> &CurationState {
        &self.state
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Direct ledger access, for funding accounts outside the curation flow.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    pub fn stats(&self) -> &StatsCounter {
        &self.stats
    }

    // ── Mutating operations ──────────────────────────────────────────────

    pub fn submit_content(
        &mut self,
        author: &Identity,
        content_hash: ContentHash,
    ) -> Result<ContentId, CurationError> {
        let result = self
            .state
            .submit_content(&mut self.ledger, author, content_hash);
        match &result {
            Ok(id) => tracing::info!(
                content_id = %id,
                author = %author,
                stake = %self.state.content(*id).map(|c| c.stake_amount).unwrap_or_default(),
                "content submitted"
            ),
            Err(e) => log_rejection("submit_content", author, e),
        }
        self.count(&result, SUBMIT_ACCEPTED, SUBMIT_REJECTED);
        result
    }

    pub fn vote_on_content(
        &mut self,
        voter: &Identity,
        content_id: ContentId,
        direction: VoteDirection,
    ) -> Result<(), CurationError> {
        let result = self.state.vote_on_content(voter, content_id, direction);
        match &result {
            Ok(()) => tracing::info!(
                content_id = %content_id,
                voter = %voter,
                direction = %direction,
                "vote cast"
            ),
            Err(e) => log_rejection("vote_on_content", voter, e),
        }
        self.count(&result, VOTE_ACCEPTED, VOTE_REJECTED);
        result
    }

    pub fn distribute_rewards(
        &mut self,
        caller: &Identity,
        content_id: ContentId,
    ) -> Result<RewardSplit, CurationError> {
        let result = self
            .state
            .distribute_rewards(&mut self.ledger, caller, content_id);
        match &result {
            Ok(split) => tracing::info!(
                content_id = %content_id,
                author_reward = %split.author,
                protocol_share = %split.protocol,
                treasury = %self.state.treasury(),
                "rewards distributed"
            ),
            Err(e) => log_rejection("distribute_rewards", caller, e),
        }
        self.count(&result, DISTRIBUTE_ACCEPTED, DISTRIBUTE_REJECTED);
        result
    }

    pub fn set_min_stake(&mut self, caller: &Identity, new_value: Amount) -> Result<(), CurationError> {
        let result = self.state.set_min_stake(caller, new_value);
        if let Err(e) = &result {
            log_rejection("set_min_stake", caller, e);
        }
        self.count(&result, SET_MIN_STAKE_ACCEPTED, SET_MIN_STAKE_REJECTED);
        result
    }

    /// Decode and apply one wire call.
    pub fn apply(&mut self, call: &Call) -> Receipt {
        let sender = call.sender();
        let decoded = match call.decode() {
            Ok(decoded) => decoded,
            Err(e) => {
                log_rejection(call.op_name(), sender, &e);
                let rejected = match call {
                    Call::SubmitContent { .. } => SUBMIT_REJECTED,
                    Call::VoteOnContent { .. } => VOTE_REJECTED,
                    Call::DistributeRewards { .. } => DISTRIBUTE_REJECTED,
                    Call::SetMinStake { .. } => SET_MIN_STAKE_REJECTED,
                };
                self.stats.increment(rejected);
                return Receipt::err(&e);
            }
        };
        let result = match decoded {
            DecodedCall::Submit(hash) => self.submit_content(sender, hash).map(|id| Some(id.raw())),
            DecodedCall::Vote(id, direction) => {
                self.vote_on_content(sender, id, direction).map(|()| None)
            }
            DecodedCall::Distribute(id) => self.distribute_rewards(sender, id).map(|_| None),
            DecodedCall::SetMinStake(value) => self.set_min_stake(sender, value).map(|()| None),
        };
        match result {
            Ok(Some(value)) => Receipt::ok_value(value),
            Ok(None) => Receipt::ok(),
            Err(e) => Receipt::err(&e),
        }
    }

    /// Apply calls in order, collecting one receipt per call.
    pub fn apply_all<'a>(&mut self, calls: impl IntoIterator<Item = &'a Call>) -> Vec<Receipt> {
        calls.into_iter().map(|call| self.apply(call)).collect()
    }

    // ── Reads ────────────────────────────────────────────────────────────

    pub fn get_content(&self, content_id: ContentId) -> Result<&ContentRecord, CurationError> {
        self.state.content(content_id)
    }

    pub fn get_curator_stats(&self, voter: &Identity) -> CuratorStats {
        self.state.curator_stats(voter)
    }

    pub fn get_min_stake(&self) -> Amount {
        self.state.min_stake()
    }

    pub fn has_voted(&self, content_id: ContentId, voter: &Identity) -> bool {
        self.state.has_voted(content_id, voter)
    }

    pub fn owner(&self) -> &Identity {
        self.state.owner()
    }

    pub fn treasury(&self) -> Amount {
        self.state.treasury()
    }

    pub fn escrowed(&self) -> Amount {
        self.state.escrowed()
    }

    pub fn is_conserved(&self) -> bool {
        self.state.is_conserved(&self.ledger)
    }

    pub fn state_root(&self) -> Result<StateRoot, CurationError> {
        self.state.state_root()
    }

    fn count<T>(&self, result: &Result<T, CurationError>, accepted: &str, rejected: &str) {
        self.stats
            .increment(if result.is_ok() { accepted } else { rejected });
    }
}

fn log_rejection(op: &str, caller: &Identity, error: &CurationError) {
    match error.code() {
        Some(code) => tracing::debug!(
            op = op,
            caller = %caller,
            code = code.as_u32(),
            error = %error,
            "call rejected"
        ),
        None => tracing::warn!(op = op, caller = %caller, error = %error, "call faulted"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curate_ledger::BalanceSheet;

    fn id(s: &str) -> Identity {
        Identity::new(s)
    }

    fn engine() -> CurationEngine<BalanceSheet> {
        let mut ledger = BalanceSheet::new();
        ledger.credit(&id("user1"), Amount::new(1000)).unwrap();
        CurationEngine::new(id("deployer"), id("escrow"), &CurationParams::default(), ledger)
    }

    #[test]
    fn apply_returns_new_id_for_submission() {
        let mut engine = engine();
        let receipt = engine.apply(&Call::submit("user1", &ContentHash::new(b"x".to_vec())));
        assert_eq!(receipt, Receipt::ok_value(1));
        assert_eq!(engine.stats().get(SUBMIT_ACCEPTED), 1);
    }

    #[test]
    fn apply_maps_failures_to_codes() {
        let mut engine = engine();
        let receipts = engine.apply_all(&[
            Call::set_min_stake("user1", 200),
            Call::vote("user2", 999, VoteDirection::Upvote),
            Call::submit("user2", &ContentHash::new(b"x".to_vec())),
            Call::distribute("user2", 1),
        ]);
        let codes: Vec<_> = receipts.iter().map(|r| r.error).collect();
        assert_eq!(codes, vec![Some(100), Some(104), Some(103), Some(104)]);
        assert_eq!(engine.stats().get(SET_MIN_STAKE_REJECTED), 1);
        assert_eq!(engine.stats().get(VOTE_REJECTED), 1);
    }

    #[test]
    fn malformed_calls_are_rejected_before_touching_state() {
        let mut engine = engine();
        let root = engine.state_root().unwrap();
        let receipt = engine.apply(&Call::VoteOnContent {
            sender: id("user2"),
            content_id: 1,
            direction: "abstain".into(),
        });
        assert_eq!(receipt.error, Some(101));
        assert_eq!(engine.state_root().unwrap(), root);
        assert_eq!(engine.stats().get(VOTE_REJECTED), 1);
    }

    #[test]
    fn escrow_account_submission_is_rejected_and_conserves() {
        let mut engine = engine();
        engine.apply(&Call::submit("user1", &ContentHash::new(b"a".to_vec())));
        let receipt = engine.apply(&Call::submit("escrow", &ContentHash::new(b"b".to_vec())));

        assert_eq!(receipt.error, Some(101));
        assert_eq!(engine.escrowed(), Amount::new(100));
        assert!(engine.is_conserved());
        assert_eq!(engine.stats().get(SUBMIT_REJECTED), 1);
    }

    #[test]
    fn into_parts_and_back_preserves_state() {
        let mut engine = engine();
        engine
            .submit_content(&id("user1"), ContentHash::new(b"x".to_vec()))
            .unwrap();
        let root = engine.state_root().unwrap();
        let (state, ledger) = engine.into_parts();
        let resumed = CurationEngine::from_parts(state, ledger);
        assert_eq!(resumed.state_root().unwrap(), root);
        assert_eq!(resumed.get_content(ContentId::FIRST).unwrap().author, id("user1"));
    }
}
