//! Document store seam.
//!
//! Handlers only ever talk to `dyn DocumentStore`. Two backends implement it:
//! the Firestore REST adapter used in staging/production and an in-process
//! map used for development and tests.

pub mod document;
pub mod firestore;
pub mod memory;
pub mod query;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::{StoreBackend, StoreConfig};

pub use document::Document;
pub use firestore::FirestoreStore;
pub use memory::MemoryStore;
pub use query::{FieldFilter, OrderBy, Query, SortDirection};

/// Document body as stored: a JSON object without its id.
pub type Fields = Map<String, Value>;

/// Errors from DocumentStore implementations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store backend error: {0}")]
    Backend(String),

    #[error("Failed to decode document: {0}")]
    Decode(String),

    #[error("Store credentials error: {0}")]
    Credentials(String),
}

/// How `set` treats an existing document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetMode {
    /// Replace the whole document.
    Overwrite,
    /// Write the given top-level fields, keep every other field.
    Merge,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a document by id; `Ok(None)` when it does not exist.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Create or write a document at a known id.
    async fn set(&self, collection: &str, id: &str, fields: Fields, mode: SetMode) -> Result<(), StoreError>;

    /// Create a document under a store-generated id and return that id.
    async fn add(&self, collection: &str, fields: Fields) -> Result<String, StoreError>;

    /// Write fields into an existing document. Fails with `NotFound` if absent.
    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError>;

    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Document>, StoreError>;

    /// Connectivity probe used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Build the store selected by configuration.
pub async fn connect(config: &StoreConfig) -> Result<Arc<dyn DocumentStore>, StoreError> {
    match config.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory document store; data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Firestore => {
            let store = FirestoreStore::from_config(config)?;
            tracing::info!("Using Firestore project '{}'", store.project_id());
            Ok(Arc::new(store))
        }
    }
}
