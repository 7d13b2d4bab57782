use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::store::Fields;

/// Success envelope: `{"success": true, "message": "...", ...extra}`
#[derive(Debug)]
pub struct ApiMessage {
    pub message: String,
    pub extra: Map<String, Value>,
}

impl ApiMessage {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            extra: Map::new(),
        }
    }

    /// Add a field next to `success` and `message`
    pub fn with(mut self, key: &str, value: impl Serialize) -> Self {
        match serde_json::to_value(value) {
            Ok(v) => {
                self.extra.insert(key.to_string(), v);
            }
            Err(e) => tracing::error!("Failed to serialize response field '{}': {}", key, e),
        }
        self
    }
}

impl IntoResponse for ApiMessage {
    fn into_response(self) -> Response {
        let mut envelope = Map::with_capacity(self.extra.len() + 2);
        envelope.insert("success".to_string(), Value::Bool(true));
        envelope.insert("message".to_string(), Value::String(self.message));
        envelope.extend(self.extra);

        (StatusCode::OK, Json(Value::Object(envelope))).into_response()
    }
}

/// Request body that must be a JSON object. Malformed JSON or any other
/// JSON type is a 400 in the API's error format.
#[derive(Debug)]
pub struct JsonObject(pub Fields);

#[async_trait]
impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state).await?;
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(ApiError::bad_request("Request body must be a JSON object")),
        }
    }
}

// Convenience type alias
pub type ApiResult<T> = Result<T, ApiError>;
