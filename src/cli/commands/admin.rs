use clap::Subcommand;
use serde_json::Value;

use crate::cli::{utils, OutputFormat};
use crate::config::{AppConfig, StoreBackend};
use crate::models::{collections, fields, stamp, timestamp};
use crate::store::{self, Fields, SetMode};

#[derive(Subcommand)]
pub enum AdminCommands {
    #[command(about = "Set isAdmin=true on a user's profile")]
    Grant {
        #[arg(help = "User id (identity subject)")]
        uid: String,
    },

    #[command(about = "Set isAdmin=false on a user's profile")]
    Revoke {
        #[arg(help = "User id (identity subject)")]
        uid: String,
    },
}

pub async fn handle(cmd: AdminCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let (uid, is_admin) = match cmd {
        AdminCommands::Grant { uid } => (uid, true),
        AdminCommands::Revoke { uid } => (uid, false),
    };

    let config = AppConfig::from_env();
    if config.store.backend == StoreBackend::Memory {
        anyhow::bail!("STORE_BACKEND is memory; admin changes would not outlive this process");
    }

    let store = store::connect(&config.store).await?;
    set_admin_flag(store.as_ref(), &uid, is_admin).await?;

    let verb = if is_admin { "granted to" } else { "revoked from" };
    utils::output_success(output_format, &format!("Admin {} {}", verb, uid), None)
}

/// Merge `isAdmin` into `users/{uid}`, creating the profile if needed.
pub async fn set_admin_flag(store: &dyn store::DocumentStore, uid: &str, is_admin: bool) -> anyhow::Result<()> {
    let mut changes = Fields::new();
    stamp(
        &mut changes,
        [
            (fields::UID, Value::String(uid.to_string())),
            (fields::IS_ADMIN, Value::Bool(is_admin)),
            (fields::UPDATED_AT, Value::String(timestamp())),
        ],
    );
    store.set(collections::USERS, uid, changes, SetMode::Merge).await?;
    tracing::info!("isAdmin={} set for uid {}", is_admin, uid);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{DocumentStore, MemoryStore};
    use serde_json::json;

    #[tokio::test]
    async fn grant_keeps_existing_profile_fields() {
        let store = MemoryStore::new();
        let profile = json!({"uid": "u1", "name": "Ana"}).as_object().cloned().unwrap();
        store.set(collections::USERS, "u1", profile, SetMode::Overwrite).await.unwrap();

        set_admin_flag(&store, "u1", true).await.unwrap();

        let doc = store.get(collections::USERS, "u1").await.unwrap().unwrap();
        assert!(doc.flag(fields::IS_ADMIN));
        assert_eq!(doc.str_field("name"), Some("Ana"));

        set_admin_flag(&store, "u1", false).await.unwrap();
        let doc = store.get(collections::USERS, "u1").await.unwrap().unwrap();
        assert!(!doc.flag(fields::IS_ADMIN));
    }
}
