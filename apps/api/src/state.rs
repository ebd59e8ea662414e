use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// The pipeline itself is pure; the only shared state is configuration.
/// Persistence of extraction results belongs to the uploading client and its
/// document store, not to this service.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
}
