pub mod admin;
pub mod auth;
pub mod response;

pub use admin::{require_admin_middleware, AdminUser};
pub use auth::{bearer_auth_middleware, AuthUser};
pub use response::{ApiMessage, ApiResult, JsonObject};
