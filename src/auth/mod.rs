pub mod firebase;
pub mod local;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{AppConfig, AuthProvider};
use crate::store::firestore::credentials::resolve_project_id;

pub use firebase::FirebaseVerifier;
pub use local::{generate_token, Claims, LocalJwtVerifier};

/// Caller identity established from a verified bearer token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub uid: String,
    /// Empty when the provider did not include one
    pub email: String,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing Authorization header")]
    MissingHeader,

    #[error("Malformed Authorization header")]
    MalformedHeader,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Could not fetch verification keys: {0}")]
    KeyFetch(String),

    #[error("Verifier configuration error: {0}")]
    Configuration(String),
}

#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Validate a raw bearer token and return who presented it.
    async fn verify(&self, token: &str) -> Result<Identity, AuthError>;
}

/// Build the verifier selected by `AUTH_PROVIDER`.
pub fn verifier_from_config(config: &AppConfig) -> Result<Arc<dyn IdentityVerifier>, AuthError> {
    match config.security.auth_provider {
        AuthProvider::Local => {
            if config.security.secret_key.is_empty() {
                return Err(AuthError::Configuration("SECRET_KEY is required for local auth".to_string()));
            }
            tracing::warn!("Using local HS256 tokens; do not use in production");
            Ok(Arc::new(LocalJwtVerifier::new(&config.security.secret_key)))
        }
        AuthProvider::Firebase => {
            let project_id =
                resolve_project_id(&config.store).map_err(|e| AuthError::Configuration(e.to_string()))?;
            tracing::info!("Verifying Firebase ID tokens for project '{}'", project_id);
            Ok(Arc::new(FirebaseVerifier::new(project_id)))
        }
    }
}
