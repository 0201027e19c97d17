//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `MARIGOLD_DATA_DIR` - Directory for the persisted store snapshot (default: `data`)
//! - `MARIGOLD_STORE_NAME` - Display name for a freshly created store (default: `Marigold Bazaar`)
//!
//! ## Optional (copywriter - enables generated product and catalog copy)
//! - `COPYWRITER_API_KEY` - Generative text API key; unset disables generation
//! - `COPYWRITER_MODEL` - Model ID (default: claude-sonnet-4-20250514)
//! - `COPYWRITER_ENDPOINT` - Messages endpoint URL (default: the hosted API)

use std::collections::HashMap;
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_STORE_NAME: &str = "Marigold Bazaar";
const DEFAULT_COPYWRITER_MODEL: &str = "claude-sonnet-4-20250514";
const DEFAULT_COPYWRITER_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "insert",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Directory holding the persisted snapshot slot.
    pub data_dir: PathBuf,
    /// Store display name used when no snapshot exists yet.
    pub store_name: String,
    /// Copywriter configuration; `None` disables generated copy (fallback
    /// text is used instead).
    pub copywriter: Option<CopywriterConfig>,
}

/// Generative text API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct CopywriterConfig {
    /// API key.
    pub api_key: SecretString,
    /// Model ID (e.g., claude-sonnet-4-20250514).
    pub model: String,
    /// Messages endpoint.
    pub endpoint: Url,
}

impl std::fmt::Debug for CopywriterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CopywriterConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable fails validation (malformed
    /// endpoint URL, placeholder or low-entropy API key).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            data_dir: PathBuf::from(get_env_or_default("MARIGOLD_DATA_DIR", DEFAULT_DATA_DIR)),
            store_name: get_env_or_default("MARIGOLD_STORE_NAME", DEFAULT_STORE_NAME),
            copywriter: CopywriterConfig::from_env()?,
        })
    }

    /// Returns a reference to the copywriter configuration, if available.
    ///
    /// Returns `None` if `COPYWRITER_API_KEY` was not set, which disables
    /// generated copy in favor of the fixed fallback text.
    #[must_use]
    pub const fn copywriter(&self) -> Option<&CopywriterConfig> {
        self.copywriter.as_ref()
    }
}

impl CopywriterConfig {
    /// Load copywriter configuration from environment.
    ///
    /// Returns `None` when `COPYWRITER_API_KEY` is not set.
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let Some(api_key) = get_optional_env("COPYWRITER_API_KEY") else {
            return Ok(None);
        };
        validate_secret_strength(&api_key, "COPYWRITER_API_KEY")?;

        let endpoint_raw = get_env_or_default("COPYWRITER_ENDPOINT", DEFAULT_COPYWRITER_ENDPOINT);
        let endpoint = Url::parse(&endpoint_raw).map_err(|e| {
            ConfigError::InvalidEnvVar("COPYWRITER_ENDPOINT".to_string(), e.to_string())
        })?;

        Ok(Some(Self {
            api_key: SecretString::from(api_key),
            model: get_env_or_default("COPYWRITER_MODEL", DEFAULT_COPYWRITER_MODEL),
            endpoint,
        }))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)]
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Real API keys are randomly generated and score well above this bar.
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}
