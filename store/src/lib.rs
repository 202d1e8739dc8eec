//! Snapshot persistence for the curation protocol.
//!
//! The rest of the workspace depends only on the [`StateStore`] trait, which
//! moves opaque bytes. [`snapshot`] adds a versioned bincode envelope on top,
//! and [`FileStore`] is the on-disk backend.

pub mod error;
pub mod file;
pub mod snapshot;

pub use error::StoreError;
pub use file::FileStore;
pub use snapshot::{load_snapshot, save_snapshot, SNAPSHOT_VERSION};

/// A single-slot byte store holding the latest snapshot.
pub trait StateStore {
    /// The stored bytes, or `None` if nothing has been saved yet.
    fn load(&self) -> Result<Option<Vec<u8>>, StoreError>;

    /// Replace the stored bytes. Must be atomic: readers see either the old
    /// or the new snapshot, never a torn one.
    fn save(&self, bytes: &[u8]) -> Result<(), StoreError>;
}
