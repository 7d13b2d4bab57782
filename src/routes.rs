use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::handlers::{elevated, protected, public};
use crate::middleware::{bearer_auth_middleware, require_admin_middleware};
use crate::state::AppState;

/// Full application router: three access tiers merged, with body limit,
/// CORS and request tracing applied globally.
pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    Router::new()
        .merge(public_routes())
        .merge(protected_routes(state.clone()))
        .merge(elevated_routes(state.clone()))
        .layer(DefaultBodyLimit::max(config.server.max_request_size_bytes))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&config)),
        )
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(public::root))
        .route("/api/health", get(public::health))
        .route("/api/sessions", get(public::sessions_catalog))
        .route("/api/bookings/availability", get(public::booking_availability))
        .route("/api/comments", get(public::comments_list))
        .route("/api/notices", get(public::notices_list))
        .route("/api/hours", get(public::hours_get))
        .route("/api/contact", post(public::contact_submit))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/users/profile",
            get(protected::profile_get)
                .post(protected::profile_upsert)
                .put(protected::profile_upsert),
        )
        .route("/api/bookings", get(protected::bookings_list).post(protected::bookings_create))
        .route("/api/bookings/:id", delete(protected::bookings_cancel))
        .route("/api/comments", post(protected::comments_create))
        .route_layer(middleware::from_fn_with_state(state, bearer_auth_middleware))
}

fn elevated_routes(state: AppState) -> Router<AppState> {
    // Layers run bottom-up: the bearer check wraps the admin check.
    Router::new()
        .route("/api/notices", post(elevated::notices_create))
        .route("/api/hours", put(elevated::hours_update))
        .route("/api/admin/comments", get(elevated::admin_comments_list))
        .route("/api/admin/comments/:id/approve", put(elevated::admin_comments_approve))
        .route("/api/admin/bookings", get(elevated::admin_bookings_list))
        .route("/api/admin/contacts", get(elevated::admin_contacts_list))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin_middleware))
        .route_layer(middleware::from_fn_with_state(state, bearer_auth_middleware))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let origins = &config.security.cors_origins;
    if origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(allowed))
}
