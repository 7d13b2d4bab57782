// handlers/elevated/admin/contacts.rs - GET /api/admin/contacts handler

use axum::{extract::State, response::Json};
use serde_json::Value;

use crate::middleware::ApiResult;
use crate::models::{collections, fields};
use crate::state::AppState;
use crate::store::{Query, SortDirection};

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Value>>> {
    let query = Query::new().order_by(fields::CREATED_AT, SortDirection::Desc);
    let docs = state.store.query(collections::CONTACTS, &query).await?;

    Ok(Json(docs.into_iter().map(|d| d.into_api_value()).collect()))
}
