//! Integration tests for Vitrine.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p vitrine-integration-tests
//! ```
//!
//! Tests run the full storefront router against [`FakeCms`], an in-process
//! HTTP server that answers the CMS collection endpoints with canned JSON
//! and records every request it receives.

#![allow(clippy::missing_panics_doc, clippy::unwrap_used)]

pub mod fixtures;

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, Request, StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use secrecy::SecretString;
use serde_json::{Value, json};
use tokio::task::JoinHandle;
use tower::ServiceExt;
use url::Url;

use vitrine_storefront::config::{CmsConfig, StorefrontConfig};
use vitrine_storefront::state::AppState;

/// Media host the fake configuration points at.
pub const MEDIA_URL: &str = "https://media.test";

/// Public base URL of the storefront under test.
pub const BASE_URL: &str = "https://shop.test";

/// Canned reply for one collection.
#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    Status(StatusCode),
}

/// One request the fake CMS received.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub collection: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
}

impl RecordedRequest {
    /// Decoded query pairs, in the order they were sent.
    #[must_use]
    pub fn pairs(&self) -> Vec<(String, String)> {
        self.query
            .as_deref()
            .map(|query| {
                url::form_urlencoded::parse(query.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Value of the first pair named `key`.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<String> {
        self.pairs()
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

#[derive(Default)]
struct Shared {
    replies: Mutex<HashMap<String, Reply>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// In-process stand-in for the headless CMS REST API.
///
/// Serves `GET /api/{collection}`. Collections without a configured reply
/// answer with an empty `data` list. A `filters[slug][$eq]` parameter
/// narrows a configured list to the matching entry.
pub struct FakeCms {
    addr: SocketAddr,
    shared: Arc<Shared>,
    handle: JoinHandle<()>,
}

impl FakeCms {
    /// Bind to an ephemeral port and start serving.
    pub async fn start() -> Self {
        let shared = Arc::new(Shared::default());
        let router = Router::new()
            .route("/api/{collection}", get(serve_collection))
            .with_state(Arc::clone(&shared));

        let listener = tokio::net::TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
            .await
            .unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            addr,
            shared,
            handle,
        }
    }

    /// Answer `collection` with `{"data": data}`.
    pub fn respond(&self, collection: &str, data: Value) {
        self.set_reply(collection, Reply::Json(json!({ "data": data })));
    }

    /// Answer `collection` with a bare status and an error body.
    pub fn fail(&self, collection: &str, status: StatusCode) {
        self.set_reply(collection, Reply::Status(status));
    }

    fn set_reply(&self, collection: &str, reply: Reply) {
        self.shared
            .replies
            .lock()
            .unwrap()
            .insert(collection.to_string(), reply);
    }

    /// Every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.shared.requests.lock().unwrap().clone()
    }

    /// Requests received for one collection.
    #[must_use]
    pub fn requests_for(&self, collection: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.collection == collection)
            .collect()
    }

    /// Number of requests received for one collection.
    #[must_use]
    pub fn hits(&self, collection: &str) -> usize {
        self.requests_for(collection).len()
    }

    /// Content API base URL, as the storefront is configured with it.
    #[must_use]
    pub fn api_url(&self) -> Url {
        Url::parse(&format!("http://{}/api", self.addr)).unwrap()
    }

    /// Storefront configuration pointing at this CMS.
    #[must_use]
    pub fn config(&self) -> StorefrontConfig {
        StorefrontConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
            base_url: BASE_URL.to_string(),
            static_dir: static_dir(),
            cms: CmsConfig {
                api_url: self.api_url(),
                media_url: MEDIA_URL.to_string(),
                api_token: None,
            },
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }

    /// Configuration that also sends a bearer token.
    #[must_use]
    pub fn config_with_token(&self, token: &str) -> StorefrontConfig {
        let mut config = self.config();
        config.cms.api_token = Some(SecretString::from(token.to_string()));
        config
    }

    /// Application state pointing at this CMS.
    #[must_use]
    pub fn state(&self) -> AppState {
        AppState::new(self.config())
    }

    /// Full storefront router pointing at this CMS.
    #[must_use]
    pub fn app(&self) -> Router {
        vitrine_storefront::app(self.state())
    }
}

impl Drop for FakeCms {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn serve_collection(
    State(shared): State<Arc<Shared>>,
    Path(collection): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    let recorded = RecordedRequest {
        collection: collection.clone(),
        query,
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
    };
    let slug = recorded.param("filters[slug][$eq]");
    shared.requests.lock().unwrap().push(recorded);

    let reply = shared.replies.lock().unwrap().get(&collection).cloned();
    match reply {
        None => Json(json!({ "data": [] })).into_response(),
        Some(Reply::Status(status)) => (
            status,
            Json(json!({ "error": { "status": status.as_u16(), "message": "fake failure" } })),
        )
            .into_response(),
        Some(Reply::Json(body)) => match slug {
            Some(slug) => Json(narrow_to_slug(&body, &slug)).into_response(),
            None => Json(body).into_response(),
        },
    }
}

fn narrow_to_slug(body: &Value, slug: &str) -> Value {
    let matching: Vec<Value> = body
        .get("data")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter(|entry| entry.get("slug").and_then(Value::as_str) == Some(slug))
                .cloned()
                .collect()
        })
        .unwrap_or_default();
    json!({ "data": matching })
}

/// The storefront crate's static asset directory.
#[must_use]
pub fn static_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../storefront/static")
}

/// A rendered response, body collected as text.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Header value as a string, if present and valid.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

/// Issue a GET against `app` and collect the response.
pub async fn get_page(app: Router, uri: &str) -> TestResponse {
    let response = app
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    TestResponse {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}
