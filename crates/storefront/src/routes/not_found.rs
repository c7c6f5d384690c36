//! Not-found page.

use askama::Template;
use askama_web::WebTemplate;
use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;

use crate::filters;

use super::views::{NavLink, nav_links};

/// Not-found page template.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub nav: Vec<NavLink>,
}

impl NotFoundTemplate {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nav: nav_links(None),
        }
    }
}

impl Default for NotFoundTemplate {
    fn default() -> Self {
        Self::new()
    }
}

/// Router fallback for unknown paths.
pub async fn fallback(uri: Uri) -> impl IntoResponse {
    tracing::debug!(path = %uri.path(), "No route matched");
    (StatusCode::NOT_FOUND, NotFoundTemplate::new())
}
