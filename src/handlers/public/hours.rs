// handlers/public/hours.rs - GET /api/hours handler

use axum::{extract::State, response::Json};
use serde_json::Value;

use crate::middleware::ApiResult;
use crate::models::{collections, hours::OperatingHours};
use crate::state::AppState;

/// Stored schedule, or the default week when nothing has been saved yet.
pub async fn get(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let stored = state
        .store
        .get(collections::SETTINGS, collections::OPERATING_HOURS)
        .await?;

    let body = match stored {
        Some(doc) => doc.into_value(),
        None => OperatingHours::default().to_value(),
    };
    Ok(Json(body))
}
