// handlers/protected/comments.rs - POST /api/comments handler

use axum::extract::{Extension, State};
use serde_json::Value;

use crate::middleware::{ApiMessage, ApiResult, AuthUser, JsonObject};
use crate::models::{collections, fields, stamp, strip, timestamp};
use crate::state::AppState;

/// Submit a testimonial. It stays hidden from `/api/comments` until approved.
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    JsonObject(mut body): JsonObject,
) -> ApiResult<ApiMessage> {
    strip(&mut body, &[fields::APPROVED_AT, fields::APPROVED_BY]);
    stamp(
        &mut body,
        [
            (fields::USER_ID, Value::String(user.uid)),
            (fields::USER_EMAIL, Value::String(user.email)),
            (fields::CREATED_AT, Value::String(timestamp())),
            (fields::APPROVED, Value::Bool(false)),
        ],
    );

    state.store.add(collections::COMMENTS, body).await?;
    Ok(ApiMessage::ok("Comment submitted for approval"))
}
