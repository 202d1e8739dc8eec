//! Nullable snapshot store: in-memory, thread-safe.

use std::sync::Mutex;

use curate_store::{StateStore, StoreError};

/// Keeps the latest snapshot in memory and counts saves.
#[derive(Default)]
pub struct NullStateStore {
    slot: Mutex<Option<Vec<u8>>>,
    saves: Mutex<u64>,
}

impl NullStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save_count(&self) -> u64 {
        *self.saves.lock().unwrap()
    }

    pub fn is_empty(&self) -> bool {
        self.slot.lock().unwrap().is_none()
    }
}

impl StateStore for NullStateStore {
    fn load(&self) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.slot.lock().unwrap().clone())
    }

    fn save(&self, bytes: &[u8]) -> Result<(), StoreError> {
        *self.slot.lock().unwrap() = Some(bytes.to_vec());
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holds_latest_bytes() {
        let store = NullStateStore::new();
        assert!(store.is_empty());
        store.save(&[1, 2]).unwrap();
        store.save(&[3]).unwrap();
        assert_eq!(store.load().unwrap(), Some(vec![3]));
        assert_eq!(store.save_count(), 2);
    }
}
