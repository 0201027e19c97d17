//! Clipboard collaborator seam.
//!
//! The storefront needs exactly one clipboard capability: writing text for
//! the share-order action. No read access. Embedders supply a backend for
//! their platform; [`MemoryClipboard`] serves tests and headless runs.

use std::sync::{Mutex, PoisonError};

use thiserror::Error;

/// Error from a clipboard backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("clipboard write failed: {0}")]
pub struct ClipboardError(pub String);

/// Write-only clipboard.
pub trait Clipboard: Send + Sync {
    /// Place `text` on the clipboard, replacing its previous contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing clipboard rejects the write.
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// In-memory clipboard that captures the last write.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    last: Mutex<Option<String>>,
}

impl MemoryClipboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The last text written, if any.
    #[must_use]
    pub fn last(&self) -> Option<String> {
        self.last
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut slot = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(text.to_string());
        Ok(())
    }
}
