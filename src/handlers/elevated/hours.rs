// handlers/elevated/hours.rs - PUT /api/hours handler

use axum::extract::{Extension, State};
use serde_json::Value;

use crate::error::ApiError;
use crate::middleware::{AdminUser, ApiMessage, ApiResult, JsonObject};
use crate::models::{collections, fields, hours, stamp, timestamp};
use crate::state::AppState;
use crate::store::SetMode;

/// Replace the operating-hours singleton with the validated body.
pub async fn update(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminUser>,
    JsonObject(mut body): JsonObject,
) -> ApiResult<ApiMessage> {
    hours::validate_update(&body)
        .map_err(|errors| ApiError::validation_error("Invalid operating hours", errors))?;

    stamp(
        &mut body,
        [
            (fields::UPDATED_AT, Value::String(timestamp())),
            (fields::UPDATED_BY, Value::String(admin.uid.clone())),
        ],
    );

    state
        .store
        .set(collections::SETTINGS, collections::OPERATING_HOURS, body, SetMode::Overwrite)
        .await?;
    tracing::info!("Operating hours updated by admin {}", admin.uid);

    Ok(ApiMessage::ok("Operating hours updated successfully"))
}
