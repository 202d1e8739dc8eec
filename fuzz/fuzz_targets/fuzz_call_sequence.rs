#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use curate_curation::{Call, CurationEngine};
use curate_ledger::{BalanceSheet, Ledger};
use curate_types::{Amount, ContentHash, CurationParams, Identity, VoteDirection};

const ESCROW: &str = "escrow";
const FUNDED: [&str; 4] = ["owner", "alice", "bob", "carol"];
const PRINCIPALS: [&str; 5] = ["owner", "alice", "bob", "carol", ESCROW];

#[derive(Arbitrary, Debug)]
enum Op {
    Submit { who: u8, hash: Vec<u8> },
    Vote { who: u8, content_id: u8, up: bool },
    Distribute { who: u8, content_id: u8 },
    SetMinStake { who: u8, value: u16, wide: Option<u128> },
}

fn principal(who: u8) -> &'static str {
    PRINCIPALS[who as usize % PRINCIPALS.len()]
}

impl Op {
    fn to_call(&self) -> Call {
        match self {
            Op::Submit { who, hash } => Call::submit(principal(*who), &ContentHash::new(hash.clone())),
            Op::Vote { who, content_id, up } => {
                let direction = if *up { VoteDirection::Upvote } else { VoteDirection::Downvote };
                Call::vote(principal(*who), u64::from(*content_id), direction)
            }
            Op::Distribute { who, content_id } => {
                Call::distribute(principal(*who), u64::from(*content_id))
            }
            Op::SetMinStake { who, value, wide } => {
                Call::set_min_stake(principal(*who), wide.unwrap_or(u128::from(*value)))
            }
        }
    }
}

// Any sequence of calls, sent through the JSON call-log encoding, keeps the
// escrow account exactly covering open stakes plus the treasury. Nothing is
// minted or burned and rejected calls change nothing.
fuzz_target!(|ops: Vec<Op>| {
    let mut ledger = BalanceSheet::new();
    for who in FUNDED {
        let _ = ledger.credit(&Identity::new(who), Amount::new(50_000));
    }
    let supply = ledger.total_supply();
    let escrow = Identity::new(ESCROW);
    let mut engine = CurationEngine::new(
        Identity::new("owner"),
        escrow.clone(),
        &CurationParams::default(),
        ledger,
    );

    for op in ops.iter().take(256) {
        let before = engine.state_root().expect("state encodes");
        let call = op.to_call();
        let line = serde_json::to_string(&call).expect("call encodes");
        let wire: Call = serde_json::from_str(&line).expect("encoded call decodes");
        assert_eq!(wire, call);
        let receipt = engine.apply(&wire);
        if !receipt.success {
            assert_eq!(engine.state_root().expect("state encodes"), before);
        }
        let held = engine.escrowed().checked_add(engine.treasury()).expect("held overflow");
        assert_eq!(engine.ledger().balance(&escrow), held);
        assert_eq!(engine.ledger().total_supply(), supply);
    }
});
