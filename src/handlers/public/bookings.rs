// handlers/public/bookings.rs - GET /api/sessions and GET /api/bookings/availability

use axum::{
    extract::{Query as QueryParams, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::middleware::ApiResult;
use crate::models::booking::{catalog as booking_catalog, Availability, BookingStatus, Catalog};
use crate::models::{collections, fields};
use crate::state::AppState;
use crate::store::Query;

/// Session types, time slots and per-slot capacity.
pub async fn catalog() -> Json<Catalog> {
    Json(booking_catalog())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityParams {
    pub date: Option<String>,
    pub time_slot: Option<String>,
}

/// Count of live bookings for one date and time slot.
///
/// Every booking that is not `cancelled` holds a seat. Bookings are created
/// `pending` and nothing moves them to `confirmed`, so counting only
/// confirmed bookings would always report an empty slot.
pub async fn availability(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<AvailabilityParams>,
) -> ApiResult<Json<Availability>> {
    let (date, time_slot) = match (params.date, params.time_slot) {
        (Some(d), Some(t)) if !d.is_empty() && !t.is_empty() => (d, t),
        _ => return Err(ApiError::bad_request("Query parameters 'date' and 'timeSlot' are required")),
    };

    let query = Query::new()
        .where_eq(fields::DATE, Value::String(date.clone()))
        .where_eq(fields::TIME_SLOT, Value::String(time_slot.clone()));

    let booked = state
        .store
        .query(collections::BOOKINGS, &query)
        .await?
        .iter()
        .filter(|doc| doc.str_field(fields::STATUS) != Some(BookingStatus::Cancelled.as_str()))
        .count();

    Ok(Json(Availability::new(date, time_slot, booked)))
}
