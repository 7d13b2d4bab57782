// handlers/elevated/admin/comments.rs - GET /api/admin/comments, PUT /api/admin/comments/:id/approve

use axum::{
    extract::{Extension, Path, State},
    response::Json,
};
use serde_json::Value;

use crate::error::ApiError;
use crate::middleware::{AdminUser, ApiMessage, ApiResult};
use crate::models::{collections, fields, stamp, timestamp};
use crate::state::AppState;
use crate::store::{Fields, Query, SortDirection, StoreError};

/// Every comment, approved or not, newest first.
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Value>>> {
    let query = Query::new().order_by(fields::CREATED_AT, SortDirection::Desc);
    let docs = state.store.query(collections::COMMENTS, &query).await?;

    Ok(Json(docs.into_iter().map(|d| d.into_api_value()).collect()))
}

pub async fn approve(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminUser>,
    Path(id): Path<String>,
) -> ApiResult<ApiMessage> {
    let mut changes = Fields::new();
    stamp(
        &mut changes,
        [
            (fields::APPROVED, Value::Bool(true)),
            (fields::APPROVED_AT, Value::String(timestamp())),
            (fields::APPROVED_BY, Value::String(admin.uid.clone())),
        ],
    );

    match state.store.update(collections::COMMENTS, &id, changes).await {
        Ok(()) => {}
        Err(StoreError::NotFound(_)) => return Err(ApiError::not_found("Comment not found")),
        Err(e) => return Err(e.into()),
    }
    tracing::info!("Comment {} approved by admin {}", id, admin.uid);

    Ok(ApiMessage::ok("Comment approved"))
}
