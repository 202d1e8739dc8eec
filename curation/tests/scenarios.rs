//! End-to-end curation flows against a nullable ledger.

use curate_curation::CurationEngine;
use curate_nullables::NullLedger;
use curate_types::{
    Amount, ContentHash, ContentId, ContentStatus, CurationParams, ErrorCode, Identity,
    VoteDirection,
};

const DEPLOYER: &str = "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM";
const USER1: &str = "ST2CY5V39NHDPWSXMW9QDT3HC3GD6Q6XX4CFRK9AG";
const USER2: &str = "ST2JHG361ZXG51QTKY2NQCVBPPRRE2KZB1HR05NNC";
const USER3: &str = "ST2NEB84ASENDXKYGJPQW86YXQCEFEX2ZQPG87ND";
const ESCROW: &str = "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM.content-curation-dao";

fn id(s: &str) -> Identity {
    Identity::new(s)
}

fn hash(s: &str) -> ContentHash {
    ContentHash::new(s.as_bytes())
}

/// Fresh deployment where user1 holds 1000.
fn deploy() -> CurationEngine<NullLedger> {
    let ledger = NullLedger::with_balances([(USER1, 1000)]);
    CurationEngine::new(id(DEPLOYER), id(ESCROW), &CurationParams::default(), ledger)
}

fn code<T: std::fmt::Debug>(result: Result<T, curate_types::CurationError>) -> Option<u32> {
    result.unwrap_err().code().map(ErrorCode::as_u32)
}

#[test]
fn submit_vote_distribute_then_distribute_again() {
    let mut engine = deploy();

    let content_id = engine.submit_content(&id(USER1), hash("test-content-hash")).unwrap();
    assert_eq!(content_id, ContentId::new(1));
    assert_eq!(engine.ledger().balance_of(USER1), 900);

    engine
        .vote_on_content(&id(USER2), content_id, VoteDirection::Upvote)
        .unwrap();
    assert_eq!(engine.get_content(content_id).unwrap().upvotes, 1);
    assert_eq!(engine.get_curator_stats(&id(USER2)).reputation, 1);

    let before = engine.ledger().balance_of(USER1);
    engine.distribute_rewards(&id(USER3), content_id).unwrap();
    assert_eq!(engine.ledger().balance_of(USER1) - before, 60);
    assert_eq!(
        engine.get_content(content_id).unwrap().status,
        ContentStatus::Rewarded
    );

    assert_eq!(code(engine.distribute_rewards(&id(USER3), content_id)), Some(101));
    assert_eq!(engine.ledger().balance_of(USER1), 960);
    assert!(engine.is_conserved());
}

#[test]
fn failed_submission_does_not_consume_an_id() {
    let mut engine = deploy();
    assert_eq!(code(engine.submit_content(&id(USER2), hash("x"))), Some(103));
    assert_eq!(code(engine.submit_content(&id(USER2), hash("x"))), Some(103));

    let content_id = engine.submit_content(&id(USER1), hash("x")).unwrap();
    assert_eq!(content_id, ContentId::FIRST);
}

#[test]
fn nth_success_gets_id_n_despite_interleaved_failures() {
    let mut engine = deploy();
    for n in 1..=5u64 {
        let _ = engine.submit_content(&id(USER2), hash("broke"));
        let content_id = engine.submit_content(&id(USER1), hash("ok")).unwrap();
        assert_eq!(content_id, ContentId::new(n));
    }
    assert_eq!(engine.ledger().balance_of(USER1), 500);
    assert_eq!(engine.escrowed(), Amount::new(500));
}

#[test]
fn double_vote_fails_and_leaves_counts() {
    let mut engine = deploy();
    let content_id = engine.submit_content(&id(USER1), hash("h")).unwrap();
    engine
        .vote_on_content(&id(USER2), content_id, VoteDirection::Upvote)
        .unwrap();

    assert_eq!(
        code(engine.vote_on_content(&id(USER2), content_id, VoteDirection::Upvote)),
        Some(102)
    );
    let content = engine.get_content(content_id).unwrap();
    assert_eq!((content.upvotes, content.downvotes), (1, 0));
    assert_eq!(engine.get_curator_stats(&id(USER2)).total_votes, 1);
}

#[test]
fn downvote_is_recorded() {
    let mut engine = deploy();
    let content_id = engine.submit_content(&id(USER1), hash("h")).unwrap();
    engine
        .vote_on_content(&id(USER2), content_id, VoteDirection::Downvote)
        .unwrap();
    assert_eq!(engine.get_content(content_id).unwrap().downvotes, 1);
}

#[test]
fn no_reward_for_unvoted_content() {
    let mut engine = deploy();
    engine.submit_content(&id(USER1), hash("h")).unwrap();
    let second = engine.submit_content(&id(USER1), hash("h2")).unwrap();

    assert_eq!(code(engine.distribute_rewards(&id(USER1), second)), Some(101));
    assert_eq!(engine.get_content(second).unwrap().status, ContentStatus::Active);
    assert_eq!(engine.ledger().balance_of(USER1), 800);
}

#[test]
fn governance_gate() {
    let mut engine = deploy();
    assert_eq!(code(engine.set_min_stake(&id(USER1), Amount::new(200))), Some(100));
    assert_eq!(engine.get_min_stake(), Amount::new(100));

    engine.set_min_stake(&id(DEPLOYER), Amount::new(200)).unwrap();
    assert_eq!(engine.get_min_stake(), Amount::new(200));
}

#[test]
fn raised_stake_applies_to_later_submissions_only() {
    let mut engine = deploy();
    let first = engine.submit_content(&id(USER1), hash("a")).unwrap();
    engine.set_min_stake(&id(DEPLOYER), Amount::new(500)).unwrap();
    let second = engine.submit_content(&id(USER1), hash("b")).unwrap();

    assert_eq!(engine.get_content(first).unwrap().stake_amount, Amount::new(100));
    assert_eq!(engine.get_content(second).unwrap().stake_amount, Amount::new(500));
    assert_eq!(code(engine.submit_content(&id(USER1), hash("c"))), Some(103));

    engine
        .vote_on_content(&id(USER2), first, VoteDirection::Upvote)
        .unwrap();
    engine.distribute_rewards(&id(USER2), first).unwrap();
    assert_eq!(engine.ledger().balance_of(USER1), 460);
    assert_eq!(engine.treasury(), Amount::new(40));
    assert_eq!(engine.escrowed(), Amount::new(500));
}

#[test]
fn vote_on_missing_content() {
    let mut engine = deploy();
    assert_eq!(
        code(engine.vote_on_content(&id(USER2), ContentId::new(999), VoteDirection::Upvote)),
        Some(104)
    );
}

#[test]
fn heavy_voting_keeps_exact_counts() {
    let mut engine = deploy();
    let content_id = engine.submit_content(&id(USER1), hash("h")).unwrap();
    let voters: Vec<String> = (0..200).map(|n| format!("curator-{n:03}")).collect();
    for (n, voter) in voters.iter().enumerate() {
        let direction = if n % 4 == 0 {
            VoteDirection::Downvote
        } else {
            VoteDirection::Upvote
        };
        engine.vote_on_content(&id(voter), content_id, direction).unwrap();
    }
    let content = engine.get_content(content_id).unwrap();
    assert_eq!(content.upvotes, 150);
    assert_eq!(content.downvotes, 50);
    assert_eq!(engine.state().voting().vote_count(), 200);
    assert!(voters
        .iter()
        .all(|v| engine.get_curator_stats(&id(v)).reputation == 1));
}

#[test]
fn zero_min_stake_still_accounts_cleanly() {
    let mut engine = deploy();
    engine.set_min_stake(&id(DEPLOYER), Amount::ZERO).unwrap();
    let content_id = engine.submit_content(&id(USER2), hash("free")).unwrap();
    engine
        .vote_on_content(&id(USER3), content_id, VoteDirection::Upvote)
        .unwrap();
    let split = engine.distribute_rewards(&id(USER3), content_id).unwrap();
    assert!(split.author.is_zero());
    assert!(split.protocol.is_zero());
    assert!(engine.is_conserved());
}

#[test]
fn event_log_records_each_success_in_order() {
    let mut engine = deploy();
    let content_id = engine.submit_content(&id(USER1), hash("h")).unwrap();
    let _ = engine.vote_on_content(&id(USER2), ContentId::new(7), VoteDirection::Upvote);
    engine
        .vote_on_content(&id(USER2), content_id, VoteDirection::Upvote)
        .unwrap();
    engine.distribute_rewards(&id(USER2), content_id).unwrap();

    let sequences: Vec<u64> = engine.state().events().iter().map(|e| e.sequence).collect();
    assert_eq!(sequences, vec![1, 2, 3]);
}

trait BalanceOf {
    fn balance_of(&self, who: &str) -> u128;
}

impl BalanceOf for NullLedger {
    fn balance_of(&self, who: &str) -> u128 {
        use curate_ledger::Ledger;
        self.balance(&Identity::new(who)).raw()
    }
}
