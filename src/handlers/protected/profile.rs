// handlers/protected/profile.rs - GET/POST/PUT /api/users/profile handlers

use axum::{
    extract::{Extension, State},
    response::Json,
};
use serde_json::Value;

use crate::error::ApiError;
use crate::middleware::{ApiMessage, ApiResult, AuthUser, JsonObject};
use crate::models::{collections, fields, stamp, strip, timestamp};
use crate::state::AppState;
use crate::store::SetMode;

/// GET /api/users/profile - the caller's own profile document
pub async fn get(State(state): State<AppState>, Extension(user): Extension<AuthUser>) -> ApiResult<Json<Value>> {
    let profile = state
        .store
        .get(collections::USERS, &user.uid)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(profile.into_value()))
}

/// POST|PUT /api/users/profile - create or merge the caller's profile
///
/// Fields absent from the body are kept. `uid`, `email` and `updatedAt` come
/// from the verified identity; `isAdmin` is never accepted from the client.
pub async fn upsert(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    JsonObject(mut body): JsonObject,
) -> ApiResult<ApiMessage> {
    if body.contains_key(fields::IS_ADMIN) {
        tracing::warn!("Ignoring isAdmin in profile update from uid {}", user.uid);
    }
    strip(&mut body, &[fields::IS_ADMIN]);
    stamp(
        &mut body,
        [
            (fields::UPDATED_AT, Value::String(timestamp())),
            (fields::UID, Value::String(user.uid.clone())),
            (fields::EMAIL, Value::String(user.email.clone())),
        ],
    );

    state
        .store
        .set(collections::USERS, &user.uid, body, SetMode::Merge)
        .await?;

    Ok(ApiMessage::ok("Profile updated successfully"))
}
