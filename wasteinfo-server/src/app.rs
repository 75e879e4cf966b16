//! Shared state and routing for the HTTP server.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use wasteinfo_core::WasteInfoService;

use crate::handlers;

/// Shared state for the web server.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) service: Arc<WasteInfoService>,
}

impl AppState {
    pub(crate) fn new(service: Arc<WasteInfoService>) -> Self {
        Self { service }
    }
}

/// Create the router with all routes.
pub(crate) fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/waste-info", post(handlers::waste_info))
        .route("/health", get(handlers::health))
        .with_state(state)
}
