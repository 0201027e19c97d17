//! Application wiring: configuration, the store service, the copywriter.
//!
//! One [`AppState`] per running application. It is plainly owned (no inner
//! `Arc`, no locks): the embedding shell drives all state changes from a
//! single event loop and hands out `&`/`&mut` borrows to views, so shared
//! ownership would only blur who gets to mutate.

use thiserror::Error;
use tracing::instrument;

use crate::config::{AdminConfig, ConfigError};
use crate::copywriter::CopywriterService;
use crate::storage::FileStore;
use crate::store::{StoreError, StoreService};

/// Errors from application start-up.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Top-level application state.
pub struct AppState {
    config: AdminConfig,
    store: StoreService,
    copywriter: CopywriterService,
}

impl AppState {
    /// Load configuration from the environment and open the persisted
    /// store snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment fails validation or the
    /// snapshot cannot be read.
    #[instrument]
    pub fn init() -> Result<Self, InitError> {
        let config = AdminConfig::from_env()?;
        Self::with_config(config)
    }

    /// Build from an already-loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot under `config.data_dir` cannot be
    /// read or parsed.
    pub fn with_config(config: AdminConfig) -> Result<Self, InitError> {
        let store = StoreService::open(
            Box::new(FileStore::new(&config.data_dir)),
            &config.store_name,
        )?;
        let copywriter = CopywriterService::from_config(config.copywriter());
        Ok(Self {
            config,
            store,
            copywriter,
        })
    }

    /// The configuration this application booted with.
    #[must_use]
    pub const fn config(&self) -> &AdminConfig {
        &self.config
    }

    /// The store service, read side.
    #[must_use]
    pub const fn store(&self) -> &StoreService {
        &self.store
    }

    /// The store service, for mutations.
    pub const fn store_mut(&mut self) -> &mut StoreService {
        &mut self.store
    }

    /// The copywriter service.
    #[must_use]
    pub const fn copywriter(&self) -> &CopywriterService {
        &self.copywriter
    }
}
