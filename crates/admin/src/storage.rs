//! Single-slot persistence for the store snapshot.
//!
//! The whole [`StoreState`] is one JSON document in one named slot. Saving
//! overwrites the slot; loading an absent slot yields `None` so callers can
//! start with a fresh store. There is no history, no migration, and no
//! partial write.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;
use tracing::debug;

use crate::models::StoreState;

/// File name of the persisted snapshot slot.
pub const SNAPSHOT_FILE: &str = "marigold-state.json";

/// Errors from the persistence layer.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Storage seam for the single application snapshot.
pub trait StateStore: Send + Sync {
    /// Read the snapshot; `None` when the slot has never been written.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot exists but cannot be read or parsed.
    fn load(&self) -> Result<Option<StoreState>, StorageError>;

    /// Overwrite the slot with `state`.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be serialized or written.
    fn save(&self, state: &StoreState) -> Result<(), StorageError>;
}

/// A shared handle forwards to the underlying store, so a caller can keep
/// inspecting a slot it has handed off.
impl<S: StateStore + ?Sized> StateStore for Arc<S> {
    fn load(&self) -> Result<Option<StoreState>, StorageError> {
        S::load(self)
    }

    fn save(&self, state: &StoreState) -> Result<(), StorageError> {
        S::save(self, state)
    }
}

/// Snapshot slot backed by one JSON file under the data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store writing to `<data_dir>/marigold-state.json`.
    #[must_use]
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(SNAPSHOT_FILE),
        }
    }

    /// Store writing to an explicit file path.
    #[must_use]
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The slot's file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for FileStore {
    fn load(&self) -> Result<Option<StoreState>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, state: &StoreState) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        // Write to a sibling temp file, then rename over the slot, so an
        // interrupted save cannot leave a truncated snapshot behind.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(state)?)?;
        fs::rename(&tmp, &self.path)?;

        debug!(path = %self.path.display(), "snapshot written");
        Ok(())
    }
}

/// In-memory slot for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<MemorySlot>,
}

#[derive(Debug, Default)]
struct MemorySlot {
    state: Option<StoreState>,
    saves: u64,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times `save` has been called. Lets tests assert that every
    /// mutation persisted.
    #[must_use]
    pub fn save_count(&self) -> u64 {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).saves
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<Option<StoreState>, StorageError> {
        let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(slot.state.clone())
    }

    fn save(&self, state: &StoreState) -> Result<(), StorageError> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.state = Some(state.clone());
        slot.saves += 1;
        Ok(())
    }
}
