//! Security headers middleware for XSS, clickjacking, and isolation protection.
//!
//! Adds restrictive security headers to all responses. Images may come from
//! the CMS media host or any HTTPS host, since the CMS hands out absolute
//! URLs when uploads live on an external provider.

use axum::{
    extract::{Request, State},
    http::{
        HeaderName, HeaderValue,
        header::{
            CACHE_CONTROL, CONTENT_SECURITY_POLICY, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS,
            X_FRAME_OPTIONS,
        },
    },
    middleware::Next,
    response::Response,
};
use url::Url;

use crate::state::AppState;

/// Applied when a handler sets no caching policy of its own.
const DEFAULT_CACHE_CONTROL: &str = "no-cache";

/// Build the Content-Security-Policy for a given media host.
///
/// ```text
/// default-src 'none';
/// style-src 'self';
/// font-src 'self';
/// img-src 'self' data: https: <media origin>;
/// base-uri 'self';
/// form-action 'self';
/// frame-ancestors 'none'
/// ```
#[must_use]
pub fn content_security_policy(media_base: &str) -> HeaderValue {
    let media_origin = Url::parse(media_base)
        .ok()
        .map(|url| url.origin().ascii_serialization())
        .filter(|origin| origin != "null");

    let img_src = media_origin.map_or_else(
        || "img-src 'self' data: https:".to_string(),
        |origin| format!("img-src 'self' data: https: {origin}"),
    );

    let policy = format!(
        "default-src 'none'; \
         style-src 'self'; \
         font-src 'self'; \
         {img_src}; \
         base-uri 'self'; \
         form-action 'self'; \
         frame-ancestors 'none'"
    );

    HeaderValue::from_str(&policy).unwrap_or_else(|_| {
        HeaderValue::from_static(
            "default-src 'none'; style-src 'self'; img-src 'self' data: https:; frame-ancestors 'none'",
        )
    })
}

/// Add security headers to all responses.
///
/// Headers applied:
/// - `X-Frame-Options: DENY`
/// - `X-Content-Type-Options: nosniff`
/// - `Referrer-Policy: strict-origin-when-cross-origin`
/// - `Content-Security-Policy` (see [`content_security_policy`])
/// - `Permissions-Policy` denying sensitive features
/// - `Cache-Control` when the handler did not set one
/// - `Cross-Origin-Opener-Policy: same-origin`
pub async fn security_headers_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(
        REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    headers.insert(
        CONTENT_SECURITY_POLICY,
        state.content_security_policy().clone(),
    );

    headers.insert(
        HeaderName::from_static("permissions-policy"),
        HeaderValue::from_static(
            "accelerometer=(), \
             browsing-topics=(), \
             camera=(), \
             display-capture=(), \
             geolocation=(), \
             gyroscope=(), \
             magnetometer=(), \
             microphone=(), \
             payment=(), \
             usb=()",
        ),
    );

    if !headers.contains_key(CACHE_CONTROL) {
        headers.insert(CACHE_CONTROL, HeaderValue::from_static(DEFAULT_CACHE_CONTROL));
    }

    headers.insert(
        HeaderName::from_static("cross-origin-opener-policy"),
        HeaderValue::from_static("same-origin"),
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csp_allows_media_origin() {
        let csp = content_security_policy("https://media.shop.test/uploads/");
        let csp = csp.to_str().unwrap_or_default();
        assert!(csp.contains("img-src 'self' data: https: https://media.shop.test;"));
        assert!(csp.starts_with("default-src 'none';"));
    }

    #[test]
    fn test_csp_keeps_non_default_port() {
        let csp = content_security_policy("http://localhost:1337");
        assert!(
            csp.to_str()
                .unwrap_or_default()
                .contains("img-src 'self' data: https: http://localhost:1337;")
        );
    }

    #[test]
    fn test_csp_without_usable_media_origin() {
        let csp = content_security_policy("not a url");
        assert!(
            csp.to_str()
                .unwrap_or_default()
                .contains("img-src 'self' data: https:;")
        );
    }
}
