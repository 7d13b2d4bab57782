// handlers/public/contact.rs - POST /api/contact handler

use axum::extract::State;
use serde_json::Value;

use crate::middleware::{ApiMessage, ApiResult, JsonObject};
use crate::models::{collections, fields, stamp, timestamp, CONTACT_STATUS_UNREAD};
use crate::state::AppState;

/// Store a contact-form message. No authentication; the body is kept as sent
/// apart from the server-stamped `createdAt` and `status`.
pub async fn submit(State(state): State<AppState>, JsonObject(mut body): JsonObject) -> ApiResult<ApiMessage> {
    stamp(
        &mut body,
        [
            (fields::CREATED_AT, Value::String(timestamp())),
            (fields::STATUS, Value::String(CONTACT_STATUS_UNREAD.to_string())),
        ],
    );

    let id = state.store.add(collections::CONTACTS, body).await?;
    tracing::info!("Contact message {} received", id);

    Ok(ApiMessage::ok("Message sent successfully"))
}
