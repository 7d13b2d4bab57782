use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::models::{collections, fields};
use crate::state::AppState;

use super::auth::AuthUser;

/// Caller whose profile carries `isAdmin: true`
#[derive(Clone, Debug)]
pub struct AdminUser {
    pub uid: String,
    pub email: String,
}

/// Middleware that requires the authenticated caller's profile document to
/// exist and carry `isAdmin == true`. Must run after `bearer_auth_middleware`.
pub async fn require_admin_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_user = request
        .extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or_else(|| ApiError::unauthorized("Authentication required before admin check"))?;

    let profile = state.store.get(collections::USERS, &auth_user.uid).await?;

    let is_admin = profile.as_ref().map_or(false, |p| p.flag(fields::IS_ADMIN));
    if !is_admin {
        tracing::warn!(
            "Admin check failed for uid {} on {} (profile {})",
            auth_user.uid,
            request.uri().path(),
            if profile.is_some() { "not admin" } else { "missing" }
        );
        return Err(ApiError::forbidden("Admin access required"));
    }

    request.extensions_mut().insert(AdminUser {
        uid: auth_user.uid,
        email: auth_user.email,
    });

    Ok(next.run(request).await)
}
