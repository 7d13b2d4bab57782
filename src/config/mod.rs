use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub security: SecurityConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub debug: bool,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthProvider {
    /// Firebase ID tokens verified against Google's published keys
    Firebase,
    /// HS256 tokens signed with `SECRET_KEY`
    Local,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub cors_origins: Vec<String>,
    pub auth_provider: AuthProvider,
    #[serde(skip_serializing)]
    pub secret_key: String,
    pub local_token_ttl_hours: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreBackend {
    Firestore,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Falls back to `project_id` from the service account when unset
    pub project_id: Option<String>,
    pub credentials_path: String,
    #[serde(skip_serializing)]
    pub credentials_json: Option<String>,
    pub emulator_host: Option<String>,
    pub database: String,
    pub request_timeout_secs: u64,
}

const DEV_SECRET_KEY: &str = "your-secret-key-change-in-production";

/// Origins the gym's static front end is served from during development.
const DEFAULT_CORS_ORIGINS: [&str; 4] = [
    "http://localhost:5500",
    "http://127.0.0.1:5500",
    "http://localhost:3000",
    "http://127.0.0.1:3000",
];

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Some(port) = env::var("MFITNESS_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.server.port = port;
        }
        if let Ok(v) = env::var("DEBUG") {
            self.server.debug = v.eq_ignore_ascii_case("true") || v == "1";
        }
        if let Ok(v) = env::var("API_MAX_REQUEST_SIZE_BYTES") {
            self.server.max_request_size_bytes = v.parse().unwrap_or(self.server.max_request_size_bytes);
        }

        // Security overrides
        if let Ok(v) = env::var("CORS_ORIGINS") {
            self.security.cors_origins = parse_origin_list(&v);
        }
        if let Ok(v) = env::var("CORS_ADDITIONAL_ORIGINS") {
            for origin in parse_origin_list(&v) {
                if !self.security.cors_origins.contains(&origin) {
                    self.security.cors_origins.push(origin);
                }
            }
        }
        if let Ok(v) = env::var("AUTH_PROVIDER") {
            self.security.auth_provider = match v.to_ascii_lowercase().as_str() {
                "firebase" => AuthProvider::Firebase,
                "local" => AuthProvider::Local,
                _ => self.security.auth_provider,
            };
        }
        if let Ok(v) = env::var("SECRET_KEY") {
            self.security.secret_key = v;
        }
        if let Ok(v) = env::var("LOCAL_TOKEN_TTL_HOURS") {
            self.security.local_token_ttl_hours = v.parse().unwrap_or(self.security.local_token_ttl_hours);
        }

        // Store overrides
        if let Ok(v) = env::var("STORE_BACKEND") {
            self.store.backend = match v.to_ascii_lowercase().as_str() {
                "firestore" => StoreBackend::Firestore,
                "memory" => StoreBackend::Memory,
                _ => self.store.backend,
            };
        }
        if let Ok(v) = env::var("FIREBASE_PROJECT_ID") {
            self.store.project_id = non_empty(v);
        }
        if let Ok(v) = env::var("FIREBASE_CREDENTIALS_PATH") {
            self.store.credentials_path = v;
        }
        if let Ok(v) = env::var("FIREBASE_CREDENTIALS") {
            self.store.credentials_json = non_empty(v);
        }
        if let Ok(v) = env::var("FIRESTORE_EMULATOR_HOST") {
            self.store.emulator_host = non_empty(v);
        }
        if let Ok(v) = env::var("FIRESTORE_DATABASE") {
            self.store.database = v;
        }
        if let Ok(v) = env::var("STORE_REQUEST_TIMEOUT_SECS") {
            self.store.request_timeout_secs = v.parse().unwrap_or(self.store.request_timeout_secs);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                port: 5000,
                debug: true,
                max_request_size_bytes: 2 * 1024 * 1024, // 2MB
            },
            security: SecurityConfig {
                cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
                auth_provider: AuthProvider::Local,
                secret_key: DEV_SECRET_KEY.to_string(),
                local_token_ttl_hours: 24,
            },
            store: StoreConfig {
                backend: StoreBackend::Memory,
                ..StoreConfig::firestore_defaults()
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                port: 5000,
                debug: false,
                max_request_size_bytes: 1024 * 1024, // 1MB
            },
            security: SecurityConfig {
                cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
                auth_provider: AuthProvider::Firebase,
                secret_key: String::new(),
                local_token_ttl_hours: 4,
            },
            store: StoreConfig::firestore_defaults(),
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                port: 5000,
                debug: false,
                max_request_size_bytes: 1024 * 1024, // 1MB
            },
            security: SecurityConfig {
                cors_origins: Vec::new(),
                auth_provider: AuthProvider::Firebase,
                secret_key: String::new(),
                local_token_ttl_hours: 1,
            },
            store: StoreConfig::firestore_defaults(),
        }
    }
}

impl StoreConfig {
    fn firestore_defaults() -> Self {
        Self {
            backend: StoreBackend::Firestore,
            project_id: None,
            credentials_path: "serviceAccountKey.json".to_string(),
            credentials_json: None,
            emulator_host: None,
            database: "(default)".to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::development()
    }
}

/// Split a comma-separated origin list, dropping blanks and trailing slashes.
pub fn parse_origin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_end_matches('/'))
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

fn non_empty(v: String) -> Option<String> {
    let trimmed = v.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.server.port, 5000);
        assert!(config.server.debug);
        assert_eq!(config.security.auth_provider, AuthProvider::Local);
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.security.cors_origins.len(), 4);
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert!(!config.server.debug);
        assert_eq!(config.security.auth_provider, AuthProvider::Firebase);
        assert_eq!(config.store.backend, StoreBackend::Firestore);
        assert!(config.security.secret_key.is_empty());
        assert_eq!(config.store.database, "(default)");
    }

    #[test]
    fn origin_list_skips_blanks() {
        let origins = parse_origin_list(" https://gym.vercel.app/ ,, https://mfitness.com");
        assert_eq!(origins, vec!["https://gym.vercel.app", "https://mfitness.com"]);
        assert!(parse_origin_list("").is_empty());
    }
}
