// handlers/elevated/notices.rs - POST /api/notices handler

use axum::extract::{Extension, State};
use serde_json::Value;

use crate::middleware::{AdminUser, ApiMessage, ApiResult, JsonObject};
use crate::models::{collections, fields, stamp, timestamp};
use crate::state::AppState;

/// Publish a notice. New notices are always active.
pub async fn create(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminUser>,
    JsonObject(mut body): JsonObject,
) -> ApiResult<ApiMessage> {
    stamp(
        &mut body,
        [
            (fields::CREATED_BY, Value::String(admin.uid.clone())),
            (fields::CREATED_AT, Value::String(timestamp())),
            (fields::ACTIVE, Value::Bool(true)),
        ],
    );

    let id = state.store.add(collections::NOTICES, body).await?;
    tracing::info!("Notice {} created by admin {}", id, admin.uid);

    Ok(ApiMessage::ok("Notice created successfully"))
}
