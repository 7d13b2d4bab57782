// handlers/public/health.rs - GET /api/health handler

use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::models::timestamp;
use crate::state::AppState;

/// Always 200. `database` reports whether the store answered a probe;
/// `firebase` carries the same value for monitors that read the older key.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let database = match state.store.ping().await {
        Ok(()) => "connected",
        Err(e) => {
            tracing::warn!("Health probe failed: {}", e);
            "disconnected"
        }
    };

    Json(json!({
        "status": "healthy",
        "database": database,
        "firebase": database,
        "timestamp": timestamp(),
    }))
}
