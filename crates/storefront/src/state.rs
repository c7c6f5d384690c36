//! Application state shared across handlers.

use std::sync::Arc;

use axum::http::HeaderValue;

use crate::cms::CmsClient;
use crate::config::StorefrontConfig;
use crate::middleware::security_headers::content_security_policy;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the configuration and the CMS client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    cms: CmsClient,
    content_security_policy: HeaderValue,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let cms = CmsClient::new(&config.cms);
        let content_security_policy = content_security_policy(cms.media().base());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                cms,
                content_security_policy,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the CMS client.
    #[must_use]
    pub fn cms(&self) -> &CmsClient {
        &self.inner.cms
    }

    /// Content-Security-Policy header value, built once from the media host.
    #[must_use]
    pub fn content_security_policy(&self) -> &HeaderValue {
        &self.inner.content_security_policy
    }
}
