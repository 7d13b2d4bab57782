#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::Value;

use mfitness_api::auth::{generate_token, Claims, LocalJwtVerifier};
use mfitness_api::config::AppConfig;
use mfitness_api::models::collections;
use mfitness_api::store::{DocumentStore, Fields, MemoryStore, SetMode};
use mfitness_api::{app, AppState};

pub const TEST_SECRET: &str = "integration-test-secret";

/// One app instance per test, served from the test's own runtime, backed by
/// a fresh in-memory store.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub store: Arc<MemoryStore>,
    pub client: reqwest::Client,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut config = AppConfig::default();
        config.server.port = port;
        config.security.secret_key = TEST_SECRET.to_string();

        let store = Arc::new(MemoryStore::new());
        let verifier = Arc::new(LocalJwtVerifier::new(TEST_SECRET));
        let state = AppState::new(store.clone(), verifier, config);

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind port {}", port))?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app(state)).await;
        });

        let server = Self {
            port,
            base_url,
            store,
            client: reqwest::Client::new(),
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(self.url("/api/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Bearer token for `uid` signed with the test secret.
    pub fn token(&self, uid: &str) -> String {
        let claims = Claims::new(uid, format!("{}@example.com", uid), 1).expect("claims");
        generate_token(&claims, TEST_SECRET).expect("token")
    }

    /// Write a profile with `isAdmin: true` straight into the store.
    pub async fn make_admin(&self, uid: &str) -> Result<()> {
        self.put_profile(uid, serde_json::json!({ "uid": uid, "isAdmin": true })).await
    }

    pub async fn put_profile(&self, uid: &str, profile: Value) -> Result<()> {
        self.store.set(collections::USERS, uid, fields(profile), SetMode::Overwrite).await?;
        Ok(())
    }

    /// Insert a document directly, bypassing server stamping.
    pub async fn seed(&self, collection: &str, doc: Value) -> Result<String> {
        Ok(self.store.add(collection, fields(doc)).await?)
    }
}

pub fn fields(value: Value) -> Fields {
    value.as_object().cloned().expect("object")
}
