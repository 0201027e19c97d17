//! Draft text fields that discard superseded generation results.
//!
//! Copy generation is fire-and-forget: the merchant keeps working while a
//! request is in flight, and may retrigger generation or move to another
//! form before the first completion lands. Each request gets an identity;
//! a completion only applies if it still carries the field's current one,
//! so a slow response can never clobber newer text.

use tracing::debug;
use uuid::Uuid;

/// A text field with at most one generation request in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyDraft {
    pending: Option<Uuid>,
    text: Option<String>,
}

impl CopyDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new generation request, superseding any in-flight one.
    /// Returns the identity the completion must present to apply.
    pub fn begin(&mut self) -> Uuid {
        let request = Uuid::new_v4();
        self.pending = Some(request);
        request
    }

    /// Apply a completion if `request` is still current.
    ///
    /// Returns `false` and leaves the text untouched for results of
    /// superseded or cancelled requests.
    pub fn apply(&mut self, request: Uuid, text: String) -> bool {
        if self.pending != Some(request) {
            debug!(%request, "discarding stale copy completion");
            return false;
        }
        self.pending = None;
        self.text = Some(text);
        true
    }

    /// Abandon the in-flight request, e.g. when the form closes.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Manual edit: set the text and drop any in-flight request so a late
    /// completion cannot overwrite what the merchant typed.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.pending = None;
        self.text = Some(text.into());
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}
