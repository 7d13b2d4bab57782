use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::{AuthError, Identity};
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller, inserted into request extensions by `bearer_auth_middleware`
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub uid: String,
    pub email: String,
}

impl From<Identity> for AuthUser {
    fn from(identity: Identity) -> Self {
        Self {
            uid: identity.uid,
            email: identity.email,
        }
    }
}

/// Verifies the bearer token with the configured identity provider and
/// extracts the caller. Any failure is a 401.
pub async fn bearer_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(request.headers())?;
    let identity = state.verifier.verify(token).await?;

    tracing::debug!("Authenticated uid {} for {}", identity.uid, request.uri().path());

    let auth_user = AuthUser::from(identity);
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// Extract the token from `Authorization: Bearer <token>`
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers.get(header::AUTHORIZATION).ok_or(AuthError::MissingHeader)?;

    let auth_str = auth_header.to_str().map_err(|_| AuthError::MalformedHeader)?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(AuthError::MalformedHeader),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        h
    }

    #[test]
    fn extracts_token() {
        assert_eq!(extract_bearer_token(&headers("Bearer abc.def")).unwrap(), "abc.def");
    }

    #[test]
    fn missing_header() {
        assert!(matches!(extract_bearer_token(&HeaderMap::new()), Err(AuthError::MissingHeader)));
    }

    #[test]
    fn rejects_other_schemes_and_empty_tokens() {
        assert!(matches!(extract_bearer_token(&headers("Basic dXNlcg==")), Err(AuthError::MalformedHeader)));
        assert!(matches!(extract_bearer_token(&headers("Bearer   ")), Err(AuthError::MalformedHeader)));
        assert!(matches!(extract_bearer_token(&headers("bearer abc")), Err(AuthError::MalformedHeader)));
    }
}
