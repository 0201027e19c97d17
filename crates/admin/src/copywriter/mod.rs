//! Generated marketing copy for products and catalogs.
//!
//! Two calls: a short product description and a catalog introduction.
//! Both degrade to a fixed fallback string whenever the API is missing,
//! misconfigured, or failing; no error crosses the service boundary. The
//! [`CopyDraft`] holder pairs with the service so late completions from
//! superseded requests get discarded instead of applied.

mod client;
mod draft;
mod error;

pub use client::CopywriterClient;
pub use draft::CopyDraft;
pub use error::CopywriterError;

use tracing::{debug, instrument, warn};

use crate::config::CopywriterConfig;

/// Fallback product description when generation is unavailable or fails.
pub const FALLBACK_DESCRIPTION: &str = "A quality product, carefully selected for our store.";

/// Fallback catalog introduction when generation is unavailable or fails.
pub const FALLBACK_SUMMARY: &str = "A hand-picked collection of our favorite products.";

/// Copy generation service.
///
/// Built from optional configuration: without an API key every call
/// answers immediately with the fallback text, so the rest of the admin
/// never branches on whether generation is enabled.
#[derive(Clone)]
pub struct CopywriterService {
    client: Option<CopywriterClient>,
}

impl CopywriterService {
    #[must_use]
    pub const fn new(client: Option<CopywriterClient>) -> Self {
        Self { client }
    }

    /// Build from configuration. A missing or unusable copywriter block
    /// disables generation instead of failing startup.
    #[must_use]
    pub fn from_config(config: Option<&CopywriterConfig>) -> Self {
        let client = config.and_then(|config| match CopywriterClient::new(config) {
            Ok(client) => Some(client),
            Err(error) => {
                warn!(%error, "copywriter disabled: client construction failed");
                None
            }
        });
        if client.is_none() {
            debug!("copywriter not configured, using fallback copy");
        }
        Self { client }
    }

    /// Whether calls will actually reach the API.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    /// A marketing description for a product. Never fails.
    #[instrument(skip(self))]
    pub async fn generate_description(&self, product_name: &str, category: &str) -> String {
        let prompt = format!(
            "Write a short, upbeat product description (two sentences, no headings) \
             for \"{product_name}\" in the {category} category."
        );
        self.complete_or(&prompt, FALLBACK_DESCRIPTION).await
    }

    /// A storefront introduction for a catalog. Never fails.
    #[instrument(skip(self, product_names))]
    pub async fn generate_summary(&self, catalog_name: &str, product_names: &[String]) -> String {
        let prompt = format!(
            "Write a one-paragraph storefront introduction for a catalog called \
             \"{catalog_name}\" featuring: {}.",
            product_names.join(", ")
        );
        self.complete_or(&prompt, FALLBACK_SUMMARY).await
    }

    async fn complete_or(&self, prompt: &str, fallback: &str) -> String {
        let Some(client) = &self.client else {
            return fallback.to_string();
        };
        match client.complete(prompt).await {
            Ok(text) => text,
            Err(error) => {
                warn!(%error, "copy generation failed, using fallback");
                fallback.to_string()
            }
        }
    }
}
