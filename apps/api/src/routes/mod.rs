pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderName, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::analysis;
use crate::errors::AppError;
use crate::extraction;
use crate::state::AppState;

/// A wrong method is a caller mistake like any other, so the method
/// fallback answers with the JSON error envelope instead of a bare 405.
async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

pub fn build_router(state: AppState) -> Router {
    // Twice the upload cap, so oversized files are rejected by the router
    // check (with a proper error body) rather than by the body reader.
    let body_limit = state.config.extraction.max_upload_bytes * 2;

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/cv/extract",
            post(extraction::handlers::handle_extract).fallback(method_not_allowed),
        )
        .route(
            "/api/v1/cv/analyze",
            post(analysis::handlers::handle_analyze).fallback(method_not_allowed),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors_layer())
        .with_state(state)
}

/// Permissive CORS: the upload and review UIs are served from other
/// origins. Preflights short-circuit to 200 inside the layer.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-api-key")])
}
