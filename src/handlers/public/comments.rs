// handlers/public/comments.rs - GET /api/comments handler

use axum::{extract::State, response::Json};
use serde_json::Value;

use crate::middleware::ApiResult;
use crate::models::{collections, fields, PUBLIC_COMMENT_LIMIT};
use crate::state::AppState;
use crate::store::{Query, SortDirection};

/// Approved testimonials, newest first.
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Value>>> {
    let query = Query::new()
        .where_eq(fields::APPROVED, Value::Bool(true))
        .order_by(fields::CREATED_AT, SortDirection::Desc)
        .limit(PUBLIC_COMMENT_LIMIT);

    let docs = state.store.query(collections::COMMENTS, &query).await?;
    Ok(Json(docs.into_iter().map(|d| d.into_api_value()).collect()))
}
