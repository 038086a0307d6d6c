//! Axum router: maps all URL paths to handlers.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{
    landing::{api_landing, landing_page},
    overview::api_overview,
    specific::api_specific,
    system::{api_cancers, health},
};
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        // Pages
        .route("/",              get(landing_page))

        // API endpoints
        .route("/api/landing",   get(api_landing))
        .route("/api/cancers",   get(api_cancers))
        .route("/api/overview",  get(api_overview))
        .route("/api/specific",  get(api_specific))

        .route("/health",        get(health))

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
