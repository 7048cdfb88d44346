//! Router configuration module
//!
//! Configures all routes, middleware layers, and creates the application router.

use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::auth_gate;
use crate::config::Config;
use crate::error::ApiError;
use crate::handlers::{
    decode_handler, encode_handler, get_package_handler, health, list_packages_handler,
    method_not_allowed_handler, not_found_handler, ready,
};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create the application router with default config (for testing)
pub fn create_router() -> Router {
    let config = Config::default();
    let state = AppState::from_config(&config);
    create_router_with_state(&config, state)
}

/// Create the application router around existing collaborators
pub fn create_router_with_state(config: &Config, state: AppState) -> Router {
    // Configure CORS based on allowed_origins
    let cors = match &config.allowed_origins {
        Some(origins) if !origins.is_empty() => {
            let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            tracing::info!("CORS: Restricting to {} origin(s)", origins.len());
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
        }
        _ => {
            tracing::warn!("CORS: Allowing all origins (dev mode)");
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    };

    // Enforced by the body extractors, after auth_gate has run
    let body_limit = DefaultBodyLimit::max(config.body_limit_bytes());

    // route_layer keeps unmatched paths on the 404 fallback instead of 401
    let protected = Router::new()
        .route("/api/v1/encode", post(encode_handler))
        .route("/api/v1/decode", post(decode_handler))
        .route("/api/v1/packages", get(list_packages_handler))
        .route("/api/v1/packages/{package_id}", get(get_package_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_gate));

    Router::new()
        .route("/", get(health))
        .route("/ready", get(ready))
        .merge(protected)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(not_found_handler)
        // Must follow every route and merge: it only reaches existing routes
        .method_not_allowed_fallback(method_not_allowed_handler)
        .layer(cors)
        .layer(body_limit)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn handle_panic(panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string());

    ApiError::internal(format!("handler panicked: {}", detail)).into_response()
}
