#![no_main]

use libfuzzer_sys::fuzz_target;

use curate_curation::{Call, CurationEngine};
use curate_nullables::NullLedger;
use curate_types::{CurationParams, Identity};

// Arbitrary call-log lines either fail to parse or produce a receipt; applying
// them never panics and never breaks conservation.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let mut engine = CurationEngine::new(
        Identity::new("owner"),
        Identity::new("escrow"),
        &CurationParams::default(),
        NullLedger::with_balances([("alice", 1_000), ("bob", 1_000)]),
    );
    for line in text.lines() {
        let Ok(call) = serde_json::from_str::<Call>(line) else {
            continue;
        };
        let receipt = engine.apply(&call);
        if receipt.success {
            assert!(receipt.error.is_none());
        }
        assert!(engine.is_conserved());
    }
});
