// handlers/public/notices.rs - GET /api/notices handler

use axum::{extract::State, response::Json};
use serde_json::Value;

use crate::middleware::ApiResult;
use crate::models::{collections, fields, PUBLIC_NOTICE_LIMIT};
use crate::state::AppState;
use crate::store::{Query, SortDirection};

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Value>>> {
    let query = Query::new()
        .where_eq(fields::ACTIVE, Value::Bool(true))
        .order_by(fields::CREATED_AT, SortDirection::Desc)
        .limit(PUBLIC_NOTICE_LIMIT);

    let docs = state.store.query(collections::NOTICES, &query).await?;
    Ok(Json(docs.into_iter().map(|d| d.into_api_value()).collect()))
}
