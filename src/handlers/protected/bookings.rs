// handlers/protected/bookings.rs - /api/bookings handlers for the caller's own bookings

use axum::{
    extract::{Extension, Path, State},
    response::Json,
};
use serde_json::Value;

use crate::error::ApiError;
use crate::middleware::{ApiMessage, ApiResult, AuthUser, JsonObject};
use crate::models::booking::BookingStatus;
use crate::models::{collections, fields, stamp, strip, timestamp};
use crate::state::AppState;
use crate::store::{Fields, Query};

/// GET /api/bookings - bookings whose `userId` is the caller, in store order
pub async fn list(State(state): State<AppState>, Extension(user): Extension<AuthUser>) -> ApiResult<Json<Vec<Value>>> {
    let query = Query::new().where_eq(fields::USER_ID, Value::String(user.uid));
    let docs = state.store.query(collections::BOOKINGS, &query).await?;

    Ok(Json(docs.into_iter().map(|d| d.into_api_value()).collect()))
}

/// POST /api/bookings - create a pending booking owned by the caller
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    JsonObject(mut body): JsonObject,
) -> ApiResult<ApiMessage> {
    strip(&mut body, &[fields::CANCELLED_AT]);
    stamp(
        &mut body,
        [
            (fields::USER_ID, Value::String(user.uid.clone())),
            (fields::USER_EMAIL, Value::String(user.email.clone())),
            (fields::CREATED_AT, Value::String(timestamp())),
            (fields::STATUS, Value::String(BookingStatus::Pending.as_str().to_string())),
        ],
    );

    let id = state.store.add(collections::BOOKINGS, body).await?;
    tracing::info!("Booking {} created for uid {}", id, user.uid);

    Ok(ApiMessage::ok("Booking created successfully").with("id", id))
}

/// DELETE /api/bookings/:id - cancel one of the caller's bookings
///
/// The ownership check and the status write are two separate store calls.
pub async fn cancel(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<ApiMessage> {
    let booking = state
        .store
        .get(collections::BOOKINGS, &id)
        .await?
        .ok_or_else(|| ApiError::not_found("Booking not found"))?;

    if booking.str_field(fields::USER_ID) != Some(user.uid.as_str()) {
        tracing::warn!("uid {} attempted to cancel booking {} owned by someone else", user.uid, id);
        return Err(ApiError::forbidden("Not allowed to cancel this booking"));
    }

    let mut changes = Fields::new();
    stamp(
        &mut changes,
        [
            (fields::STATUS, Value::String(BookingStatus::Cancelled.as_str().to_string())),
            (fields::CANCELLED_AT, Value::String(timestamp())),
        ],
    );
    state.store.update(collections::BOOKINGS, &id, changes).await?;

    Ok(ApiMessage::ok("Booking cancelled successfully"))
}
