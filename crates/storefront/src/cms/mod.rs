//! Headless CMS REST client.
//!
//! # Architecture
//!
//! - The CMS is the source of truth; nothing is persisted locally
//! - [`CmsClient`] is cheap to clone and shares one `reqwest::Client`
//! - Each request opens a [`CmsScope`] whose `moka` cache coalesces identical
//!   fetches for the lifetime of that request only
//! - Typed accessors never fail: errors are logged and the page renders with
//!   empty content
//!
//! # Example
//!
//! ```rust,ignore
//! let scope = state.cms().scope();
//! let (products, banners) = tokio::join!(scope.products(), scope.banners());
//! let product = scope.product_by_slug("linen-shirt").await;
//! ```

mod conversions;
pub mod media;
pub mod query;
mod raw;

use std::sync::Arc;

use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use vitrine_core::{Banner, HomeSection, Product};

use crate::config::CmsConfig;

pub use media::{MediaResolver, PLACEHOLDER_IMAGE};
pub use query::{FilterOp, FindQuery, SortOrder};

use conversions::{convert_banner, convert_home_section, convert_product, decode_each};
use raw::{RawBanner, RawHomeSection, RawProduct, RawSlug};

/// Product collection path.
pub const PRODUCTS: &str = "products";
/// Banner collection path.
pub const BANNERS: &str = "banners";
/// Home section collection path.
pub const HOME_SECTIONS: &str = "home-pages";

/// Page size for the full product listing.
const PRODUCT_LIMIT: u32 = 100;
/// Page size for the slug listing used by the sitemap.
const SLUG_LIMIT: u32 = 1000;
/// Upper bound on distinct queries cached by one scope.
const SCOPE_CAPACITY: u64 = 64;

/// Errors that can occur when talking to the CMS.
#[derive(Debug, Error)]
pub enum CmsError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The CMS answered with a non-success status.
    #[error("Failed to fetch {collection}: {status}")]
    Status {
        collection: String,
        status: reqwest::StatusCode,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The body parsed but has no `data` member.
    #[error("Unexpected response shape for {0}")]
    UnexpectedShape(String),

    /// The configured API URL cannot take path segments.
    #[error("CMS API URL cannot be used as a base")]
    InvalidBaseUrl,
}

// =============================================================================
// CmsClient
// =============================================================================

/// Client for the CMS content API.
#[derive(Clone)]
pub struct CmsClient {
    inner: Arc<CmsClientInner>,
}

struct CmsClientInner {
    client: reqwest::Client,
    api_base: Url,
    api_token: Option<SecretString>,
    media: MediaResolver,
}

impl CmsClient {
    /// Create a new CMS client.
    #[must_use]
    pub fn new(config: &CmsConfig) -> Self {
        Self {
            inner: Arc::new(CmsClientInner {
                client: reqwest::Client::new(),
                api_base: config.api_url.clone(),
                api_token: config.api_token.clone(),
                media: MediaResolver::new(&config.media_url),
            }),
        }
    }

    /// Resolver for media paths returned by this CMS.
    #[must_use]
    pub fn media(&self) -> &MediaResolver {
        &self.inner.media
    }

    /// Open a fetch scope for one request.
    #[must_use]
    pub fn scope(&self) -> CmsScope {
        CmsScope {
            client: self.clone(),
            responses: Cache::builder().max_capacity(SCOPE_CAPACITY).build(),
        }
    }

    /// Full request URL for a query.
    ///
    /// # Errors
    ///
    /// Returns `CmsError::InvalidBaseUrl` if the API URL cannot take a path.
    pub fn url_for(&self, query: &FindQuery) -> Result<Url, CmsError> {
        let mut url = self.inner.api_base.clone();

        url.path_segments_mut()
            .map_err(|()| CmsError::InvalidBaseUrl)?
            .pop_if_empty()
            .push(query.collection());

        let pairs = query.to_pairs();
        if pairs.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(pairs);
        }

        Ok(url)
    }

    /// Run a query without deduplication.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or a body
    /// that is not JSON.
    pub async fn find(&self, query: &FindQuery) -> Result<Value, CmsError> {
        let url = self.url_for(query)?;
        self.fetch(query.collection(), url).await
    }

    /// Check that the CMS answers a minimal product query.
    ///
    /// # Errors
    ///
    /// Returns the underlying `CmsError` if the CMS is unreachable.
    pub async fn ping(&self) -> Result<(), CmsError> {
        let query = FindQuery::new(PRODUCTS)
            .populate(None)
            .limit(1)
            .fields(["slug"]);
        self.find(&query).await.map(|_| ())
    }

    #[instrument(skip(self, url), fields(url = %url))]
    async fn fetch(&self, collection: &str, url: Url) -> Result<Value, CmsError> {
        let mut request = self
            .inner
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json");

        if let Some(token) = &self.inner.api_token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                collection,
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "CMS returned non-success status"
            );
            return Err(CmsError::Status {
                collection: collection.to_string(),
                status,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                collection,
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse CMS response"
            );
            CmsError::Parse(e)
        })
    }
}

// =============================================================================
// CmsScope
// =============================================================================

/// Per-request view of the CMS.
///
/// Identical queries issued through one scope, concurrently or in sequence,
/// share a single upstream request. Nothing outlives the scope.
pub struct CmsScope {
    client: CmsClient,
    responses: Cache<String, Arc<Value>>,
}

impl CmsScope {
    /// Resolver for media paths.
    #[must_use]
    pub fn media(&self) -> &MediaResolver {
        self.client.media()
    }

    /// Run a query, reusing any earlier response for the same URL.
    ///
    /// # Errors
    ///
    /// Returns the shared error of the coalesced fetch.
    pub async fn find(&self, query: &FindQuery) -> Result<Arc<Value>, Arc<CmsError>> {
        let url = self.client.url_for(query).map_err(Arc::new)?;
        let key = url.to_string();
        let collection = query.collection();

        self.responses
            .try_get_with(key, async {
                debug!(collection, "Fetching from CMS");
                self.client.fetch(collection, url).await.map(Arc::new)
            })
            .await
    }

    /// Decoded entries of a query, or the logged error.
    async fn entries<T: serde::de::DeserializeOwned>(
        &self,
        query: &FindQuery,
    ) -> Result<Vec<T>, Arc<CmsError>> {
        let body = self.find(query).await?;
        let data = body
            .get("data")
            .ok_or_else(|| Arc::new(CmsError::UnexpectedShape(query.collection().to_string())))?;
        Ok(decode_each(query.collection(), data))
    }

    /// Every product, up to 100.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Vec<Product> {
        let query = FindQuery::new(PRODUCTS).limit(PRODUCT_LIMIT);
        self.entries::<RawProduct>(&query).await.map_or_else(
            |e| {
                tracing::error!(error = %e, "Failed to fetch products");
                Vec::new()
            },
            |raw| raw.into_iter().map(convert_product).collect(),
        )
    }

    /// The product with the given slug, if any.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn product_by_slug(&self, slug: &str) -> Option<Product> {
        let query = FindQuery::new(PRODUCTS).filter_op("slug", FilterOp::Eq, slug);
        match self.entries::<RawProduct>(&query).await {
            Ok(raw) => raw.into_iter().next().map(convert_product),
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch product");
                None
            }
        }
    }

    /// Every banner that has an image.
    #[instrument(skip(self))]
    pub async fn banners(&self) -> Vec<Banner> {
        let query = FindQuery::new(BANNERS);
        self.entries::<RawBanner>(&query).await.map_or_else(
            |e| {
                tracing::error!(error = %e, "Failed to fetch banners");
                Vec::new()
            },
            |raw| raw.into_iter().filter_map(convert_banner).collect(),
        )
    }

    /// Home sections in display order.
    #[instrument(skip(self))]
    pub async fn home_sections(&self) -> Vec<HomeSection> {
        let query = FindQuery::new(HOME_SECTIONS).sort("order", SortOrder::Asc);
        self.entries::<RawHomeSection>(&query).await.map_or_else(
            |e| {
                tracing::error!(error = %e, "Failed to fetch home sections");
                Vec::new()
            },
            |raw| {
                let mut sections: Vec<_> =
                    raw.into_iter().filter_map(convert_home_section).collect();
                HomeSection::sort_for_display(&mut sections);
                sections
            },
        )
    }

    /// Slugs of every product, up to 1000.
    #[instrument(skip(self))]
    pub async fn product_slugs(&self) -> Vec<String> {
        let query = FindQuery::new(PRODUCTS)
            .populate(None)
            .limit(SLUG_LIMIT)
            .fields(["slug"]);
        self.entries::<RawSlug>(&query).await.map_or_else(
            |e| {
                tracing::error!(error = %e, "Failed to fetch product slugs");
                Vec::new()
            },
            |raw| raw.into_iter().map(|entry| entry.slug).collect(),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn client(api_url: &str) -> CmsClient {
        CmsClient::new(&CmsConfig {
            api_url: Url::parse(api_url).unwrap(),
            media_url: "https://media.shop.test".to_string(),
            api_token: None,
        })
    }

    fn decoded_query(url: &Url) -> HashMap<String, String> {
        url.query_pairs().into_owned().collect()
    }

    #[test]
    fn test_url_for_appends_collection() {
        let url = client("http://localhost:1337/api")
            .url_for(&FindQuery::new(BANNERS))
            .unwrap();
        assert_eq!(url.path(), "/api/banners");
    }

    #[test]
    fn test_url_for_with_trailing_slash_base() {
        let url = client("http://localhost:1337/api/")
            .url_for(&FindQuery::new(HOME_SECTIONS))
            .unwrap();
        assert_eq!(url.path(), "/api/home-pages");
    }

    #[test]
    fn test_url_for_encodes_filter_grammar() {
        let query = FindQuery::new(PRODUCTS).filter_op("slug", FilterOp::Eq, "wool coat");
        let url = client("http://localhost:1337/api").url_for(&query).unwrap();
        let params = decoded_query(&url);

        assert_eq!(params.get("populate").map(String::as_str), Some("*"));
        assert_eq!(
            params.get("filters[slug][$eq]").map(String::as_str),
            Some("wool coat")
        );
        assert_eq!(
            params.get("pagination[limit]").map(String::as_str),
            Some("25")
        );
    }

    #[test]
    fn test_url_for_drops_base_query() {
        let url = client("http://localhost:1337/api?stale=1")
            .url_for(&FindQuery::new(PRODUCTS))
            .unwrap();
        assert!(!decoded_query(&url).contains_key("stale"));
    }

    #[test]
    fn test_scope_shares_media_resolver() {
        let client = client("http://localhost:1337/api");
        let scope = client.scope();
        assert_eq!(
            scope.media().resolve("/uploads/a.jpg"),
            "https://media.shop.test/uploads/a.jpg"
        );
    }

    #[test]
    fn test_status_error_message() {
        let err = CmsError::Status {
            collection: PRODUCTS.to_string(),
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        };
        assert_eq!(
            err.to_string(),
            "Failed to fetch products: 500 Internal Server Error"
        );
    }
}
