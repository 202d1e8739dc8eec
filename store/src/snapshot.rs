//! Versioned bincode envelope around a persisted value.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{StateStore, StoreError};

/// Current envelope version. Bump when the persisted layout changes.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct Envelope<T> {
    version: u32,
    body: T,
}

/// Encode `value` and hand it to `store`.
pub fn save_snapshot<S, T>(store: &S, value: &T) -> Result<(), StoreError>
where
    S: StateStore + ?Sized,
    T: Serialize,
{
    let bytes = bincode::serialize(&Envelope {
        version: SNAPSHOT_VERSION,
        body: value,
    })
    .map_err(|e| StoreError::Serialization(e.to_string()))?;
    store.save(&bytes)
}

/// Load and decode the latest snapshot, if any.
pub fn load_snapshot<S, T>(store: &S) -> Result<Option<T>, StoreError>
where
    S: StateStore + ?Sized,
    T: DeserializeOwned,
{
    let Some(bytes) = store.load()? else {
        return Ok(None);
    };
    // Read the version first so a layout change reports cleanly instead of as garbage.
    let version: u32 = bincode::deserialize(&bytes)
        .map_err(|e| StoreError::Corruption(e.to_string()))?;
    if version != SNAPSHOT_VERSION {
        return Err(StoreError::UnsupportedVersion {
            found: version,
            expected: SNAPSHOT_VERSION,
        });
    }
    let envelope: Envelope<T> =
        bincode::deserialize(&bytes).map_err(|e| StoreError::Corruption(e.to_string()))?;
    Ok(Some(envelope.body))
}
