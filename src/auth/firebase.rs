//! Firebase ID token verification.
//!
//! ID tokens are RS256 JWTs signed by `securetoken@system.gserviceaccount.com`.
//! The signing keys rotate; Google publishes them as a JWK set with a
//! `Cache-Control: max-age` we honour.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, jwk::JwkSet, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tokio::sync::RwLock;

use super::{AuthError, Identity, IdentityVerifier};

const SECURETOKEN_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

const DEFAULT_KEY_TTL: Duration = Duration::from_secs(60 * 60);

/// Floor between fetches triggered by an unknown `kid` while the cached set
/// is still fresh. Forged key ids cannot drive one Google request per call.
const MIN_REFETCH_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct FirebaseClaims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
}

struct CachedKeys {
    keys: JwkSet,
    fetched_at: Instant,
    ttl: Duration,
}

impl CachedKeys {
    fn is_fresh(&self) -> bool {
        self.fetched_at.elapsed() < self.ttl
    }
}

pub struct FirebaseVerifier {
    project_id: String,
    jwks_url: String,
    http: reqwest::Client,
    keys: RwLock<Option<CachedKeys>>,
    min_refetch_interval: Duration,
}

impl FirebaseVerifier {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            jwks_url: SECURETOKEN_JWKS_URL.to_string(),
            http: reqwest::Client::new(),
            keys: RwLock::new(None),
            min_refetch_interval: MIN_REFETCH_INTERVAL,
        }
    }

    pub fn with_jwks_url(mut self, url: impl Into<String>) -> Self {
        self.jwks_url = url.into();
        self
    }

    pub fn with_min_refetch_interval(mut self, interval: Duration) -> Self {
        self.min_refetch_interval = interval;
        self
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[self.project_id.as_str()]);
        validation.set_issuer(&[format!("https://securetoken.google.com/{}", self.project_id)]);
        validation.set_required_spec_claims(&["exp", "iat", "sub", "aud", "iss"]);
        validation
    }

    /// Key for `kid`, refetching the set when stale or when the id is unknown
    /// (Google may have rotated since the last fetch). Unknown ids refetch at
    /// most once per `min_refetch_interval`.
    async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, AuthError> {
        {
            let cached = self.keys.read().await;
            if let Some(cached) = cached.as_ref().filter(|c| c.is_fresh()) {
                if let Some(jwk) = cached.keys.find(kid) {
                    return DecodingKey::from_jwk(jwk).map_err(|e| AuthError::KeyFetch(e.to_string()));
                }
                if cached.fetched_at.elapsed() < self.min_refetch_interval {
                    return Err(AuthError::InvalidToken(format!("unknown key id '{}'", kid)));
                }
            }
        }

        let fresh = self.fetch_keys().await?;
        let key = fresh
            .keys
            .find(kid)
            .map(DecodingKey::from_jwk)
            .transpose()
            .map_err(|e| AuthError::KeyFetch(e.to_string()))?;
        *self.keys.write().await = Some(fresh);

        key.ok_or_else(|| AuthError::InvalidToken(format!("unknown key id '{}'", kid)))
    }

    async fn fetch_keys(&self) -> Result<CachedKeys, AuthError> {
        let response = self
            .http
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(|e| AuthError::KeyFetch(e.to_string()))?
            .error_for_status()
            .map_err(|e| AuthError::KeyFetch(e.to_string()))?;

        let ttl = response
            .headers()
            .get(reqwest::header::CACHE_CONTROL)
            .and_then(|v| v.to_str().ok())
            .and_then(max_age)
            .unwrap_or(DEFAULT_KEY_TTL);

        let keys: JwkSet = response.json().await.map_err(|e| AuthError::KeyFetch(e.to_string()))?;
        tracing::debug!("Fetched {} Firebase signing keys, valid for {:?}", keys.keys.len(), ttl);

        Ok(CachedKeys {
            keys,
            fetched_at: Instant::now(),
            ttl,
        })
    }
}

#[async_trait]
impl IdentityVerifier for FirebaseVerifier {
    async fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        let header = decode_header(token).map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        if header.alg != Algorithm::RS256 {
            return Err(AuthError::InvalidToken(format!("unexpected algorithm {:?}", header.alg)));
        }
        let kid = header
            .kid
            .ok_or_else(|| AuthError::InvalidToken("missing key id".to_string()))?;

        let key = self.decoding_key(&kid).await?;
        let data = decode::<FirebaseClaims>(token, &key, &self.validation())
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        if data.claims.sub.is_empty() {
            return Err(AuthError::InvalidToken("empty subject".to_string()));
        }

        Ok(Identity {
            uid: data.claims.sub,
            email: data.claims.email.unwrap_or_default(),
        })
    }
}

/// `max-age` seconds from a Cache-Control header value
fn max_age(header: &str) -> Option<Duration> {
    header
        .split(',')
        .filter_map(|directive| directive.trim().strip_prefix("max-age="))
        .find_map(|secs| secs.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}
