#![no_main]

use libfuzzer_sys::fuzz_target;

use curate_curation::CurationState;
use curate_ledger::BalanceSheet;
use curate_nullables::NullStateStore;
use curate_store::{load_snapshot, StateStore};

// Corrupt snapshot bytes must surface as errors, never panics.
fuzz_target!(|data: &[u8]| {
    let store = NullStateStore::new();
    if store.save(data).is_err() {
        return;
    }
    let _ = load_snapshot::<_, (CurationState, BalanceSheet)>(&store);
});
