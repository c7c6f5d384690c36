//! Vitrine storefront library.
//!
//! Server-rendered catalog pages backed by a headless CMS. The binary in
//! `main.rs` wires configuration and telemetry; everything that serves
//! requests lives here so it can be tested end to end.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cms;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::{Router, body::Body, http::Request};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the full application router.
///
/// Layer order, outermost first: Sentry, tracing span, request ID, security
/// headers, routes.
pub fn app(state: AppState) -> Router {
    let static_dir = state.config().static_dir.clone();

    Router::new()
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(routes::not_found::fallback)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::security_headers_middleware,
        ))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}
