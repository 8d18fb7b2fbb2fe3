//! In-process stand-in for the platform API used by the tests

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use parking_lot::Mutex;
use tempfile::NamedTempFile;
use tokio::net::TcpListener;

use crate::config::ClientConfig;

/// Base path the mock serves under, mirroring the real management API
const BASE_PATH: &str = "/mgmt/openapi";

/// Canned response for one method and path
#[derive(Debug, Clone)]
pub struct MockRoute {
    method: Method,
    path: String,
    status: u16,
    body: String,
    delay: Option<Duration>,
}

impl MockRoute {
    pub fn get(path: &str, status: u16, body: &str) -> Self {
        Self::new(Method::GET, path, status, body)
    }

    pub fn post(path: &str, status: u16, body: &str) -> Self {
        Self::new(Method::POST, path, status, body)
    }

    fn new(method: Method, path: &str, status: u16, body: &str) -> Self {
        Self {
            method,
            path: format!("{}{}", BASE_PATH, path),
            status,
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// Request as seen by the mock
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body is not JSON")
    }
}

struct MockState {
    routes: Vec<MockRoute>,
    requests: Mutex<Vec<RecordedRequest>>,
}

pub struct MockPlatform {
    base_url: String,
    state: Arc<MockState>,
}

impl MockPlatform {
    /// Bind to an ephemeral port and serve the given routes until the test ends
    pub async fn start(routes: Vec<MockRoute>) -> Self {
        let state = Arc::new(MockState {
            routes,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .fallback(handle)
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}{}", addr, BASE_PATH),
            state,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Client config pointed at this mock
    pub fn config(&self, api_key: &str) -> ClientConfig {
        ClientConfig::new(api_key)
            .with_base_url(&self.base_url)
            .unwrap()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().clone()
    }

    /// Requests that hit the given method and path (relative to the base path)
    pub fn requests_to(&self, method: Method, path: &str) -> Vec<RecordedRequest> {
        let full = format!("{}{}", BASE_PATH, path);
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == full)
            .collect()
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.requests.lock().push(RecordedRequest {
        method: method.clone(),
        path: uri.path().to_string(),
        headers,
        body: body.to_vec(),
    });

    let route = state
        .routes
        .iter()
        .find(|r| r.method == method && r.path == uri.path())
        .cloned();

    match route {
        Some(route) => {
            if let Some(delay) = route.delay {
                tokio::time::sleep(delay).await;
            }
            let status = StatusCode::from_u16(route.status).unwrap();
            (status, route.body).into_response()
        }
        None => (StatusCode::NOT_FOUND, "no such route").into_response(),
    }
}

/// Write `contents` to a temporary file
pub fn json_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
