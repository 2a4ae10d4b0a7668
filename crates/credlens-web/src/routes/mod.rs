//! HTTP routes for the web dashboard.

mod api;

use crate::AppState;
use axum::{routing::get, Router};
use std::path::PathBuf;
use tower_http::{cors::CorsLayer, services::ServeDir};

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    // Determine static file directory
    let static_dir = std::env::var("CREDLENS_STATIC_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
            manifest.join("static")
        });

    Router::new()
        // API routes
        .route("/api/config", get(api::get_config))
        .route("/api/customers", get(api::get_customers))
        .route("/api/customers/:id/decision", get(api::get_decision))
        .route("/api/customers/:id/panel", get(api::get_panel))
        .route("/api/customers/:id/waterfall", get(api::get_waterfall))
        .route("/api/customers/:id/top", get(api::get_top))
        .route("/api/criteria", get(api::get_criteria))
        .route("/api/criteria/:name", get(api::get_criterion))
        .route(
            "/api/customers/:id/criteria/:name",
            get(api::get_customer_criterion),
        )
        // Static files (serve index.html as fallback)
        .fallback_service(ServeDir::new(static_dir).append_index_html_on_directories(true))
        // CORS for development
        .layer(CorsLayer::permissive())
        // State
        .with_state(state)
}
