//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (?category=&show_all=)
//! GET  /product/{slug}         - Product detail
//! GET  /sitemap.xml            - Sitemap
//! GET  /health                 - Liveness
//! GET  /health/ready           - Readiness (CMS reachable)
//! GET  /static/*               - Static assets
//! *                            - Not-found page
//! ```

pub mod home;
pub mod not_found;
pub mod products;
pub mod sitemap;
pub mod views;

use axum::{Router, extract::State, http::StatusCode, routing::get};

use crate::state::AppState;

/// Create the page routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/product/{slug}", get(products::show))
        .route("/sitemap.xml", get(sitemap::sitemap))
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the CMS is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.cms().ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
