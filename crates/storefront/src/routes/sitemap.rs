//! XML sitemap listing the home page and every product.

use askama::Template;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

use super::views::product_href;

/// Sitemap template.
#[derive(Template)]
#[template(path = "sitemap.xml")]
pub struct SitemapTemplate {
    pub urls: Vec<String>,
}

/// Absolute URL of a product page, encoded the same way as card links.
#[must_use]
pub fn product_url(base_url: &str, slug: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), product_href(slug))
}

/// Render the sitemap.
///
/// # Errors
///
/// Returns `AppError::Template` if rendering fails.
#[instrument(skip(state))]
pub async fn sitemap(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let base_url = state.config().base_url.as_str();
    let slugs = state.cms().scope().product_slugs().await;

    let mut urls = Vec::with_capacity(slugs.len() + 1);
    urls.push(format!("{base_url}/"));
    urls.extend(slugs.iter().map(|slug| product_url(base_url, slug)));

    let body = SitemapTemplate { urls }.render()?;

    Ok(([(header::CONTENT_TYPE, "application/xml")], body))
}
