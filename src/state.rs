use std::sync::Arc;

use anyhow::Context;

use crate::auth::{self, IdentityVerifier};
use crate::config::AppConfig;
use crate::store::{self, DocumentStore};

/// Shared per-process dependencies, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub verifier: Arc<dyn IdentityVerifier>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, verifier: Arc<dyn IdentityVerifier>, config: AppConfig) -> Self {
        Self {
            store,
            verifier,
            config: Arc::new(config),
        }
    }

    /// Connect the configured store and identity verifier.
    pub async fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let store = store::connect(&config.store)
            .await
            .context("failed to initialize document store")?;
        let verifier = auth::verifier_from_config(&config).context("failed to initialize identity verifier")?;
        Ok(Self::new(store, verifier, config))
    }
}
