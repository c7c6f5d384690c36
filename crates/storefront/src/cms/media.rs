//! Absolute URLs for CMS media.

/// Served when an image reference is empty.
pub const PLACEHOLDER_IMAGE: &str = "/static/placeholder.svg";

/// Turns CMS-relative upload paths into absolute URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaResolver {
    base: String,
}

impl MediaResolver {
    /// Create a resolver for the given media host. A trailing slash is dropped.
    #[must_use]
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    /// Media host without trailing slash.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Resolve a path from the CMS.
    ///
    /// Empty paths give the placeholder; paths starting with `http` are
    /// already absolute and pass through.
    #[must_use]
    pub fn resolve(&self, path: &str) -> String {
        if path.is_empty() {
            return PLACEHOLDER_IMAGE.to_string();
        }
        if path.starts_with("http") {
            return path.to_string();
        }
        if path.starts_with('/') {
            format!("{}{path}", self.base)
        } else {
            format!("{}/{path}", self.base)
        }
    }
}
