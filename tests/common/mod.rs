#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use merchant_dashboard_api::{config::AppConfig, AppState};
use serde_json::Value;
use tokio::net::TcpListener;

pub const TOKEN: &str = "tok";

/// One request as the mock backend saw it
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RecordedCall {
    pub fn json(&self) -> Result<Value> {
        serde_json::from_slice(&self.body).context("recorded body is not JSON")
    }
}

#[derive(Debug, Clone)]
struct Stub {
    status: u16,
    body: String,
    delay: Option<Duration>,
}

/// Stand-in for the merchant backend: canned answers per method and path,
/// every call recorded
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    stubs: Arc<Mutex<HashMap<(String, String), Stub>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer with `{ code, message, data }` and status 200
    pub fn ok(self, method: &str, path: &str, data: Value) -> Self {
        let envelope = serde_json::json!({ "code": "SUCCESS", "message": "ok", "data": data });
        self.raw(method, path, 200, &envelope.to_string())
    }

    pub fn fail(self, method: &str, path: &str, status: u16, body: Value) -> Self {
        self.raw(method, path, status, &body.to_string())
    }

    pub fn raw(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.insert(method, path, Stub { status, body: body.to_string(), delay: None })
    }

    pub fn slow(self, method: &str, path: &str, delay: Duration, data: Value) -> Self {
        let envelope = serde_json::json!({ "code": "SUCCESS", "message": "ok", "data": data });
        self.insert(
            method,
            path,
            Stub {
                status: 200,
                body: envelope.to_string(),
                delay: Some(delay),
            },
        )
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls().len()
    }

    pub fn calls_to(&self, path: &str) -> Vec<RecordedCall> {
        self.calls().into_iter().filter(|c| c.path == path).collect()
    }

    fn insert(self, method: &str, path: &str, stub: Stub) -> Self {
        if let Ok(mut stubs) = self.stubs.lock() {
            stubs.insert((method.to_uppercase(), path.to_string()), stub);
        }
        self
    }

    fn stub_for(&self, method: &str, path: &str) -> Option<Stub> {
        self.stubs
            .lock()
            .ok()
            .and_then(|s| s.get(&(method.to_string(), path.to_string())).cloned())
    }

    async fn spawn(&self) -> Result<String> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let listener = TcpListener::bind(("127.0.0.1", port)).await?;
        let router = Router::new().fallback(answer).with_state(self.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        Ok(format!("http://127.0.0.1:{}", port))
    }
}

async fn answer(State(mock): State<MockBackend>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let body = axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default();
    let header_value = |name: header::HeaderName| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let method = parts.method.as_str().to_string();
    let path = parts.uri.path().to_string();
    if let Ok(mut calls) = mock.calls.lock() {
        calls.push(RecordedCall {
            method: method.clone(),
            path: path.clone(),
            query: parts.uri.query().map(str::to_string),
            authorization: header_value(header::AUTHORIZATION),
            content_type: header_value(header::CONTENT_TYPE),
            body: body.to_vec(),
        });
    }

    let Some(stub) = mock.stub_for(&method, &path) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if let Some(delay) = stub.delay {
        tokio::time::sleep(delay).await;
    }

    let status = StatusCode::from_u16(stub.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, "application/json")], Body::from(stub.body)).into_response()
}

/// The gateway served in-process in front of a mock backend
pub struct TestGateway {
    pub base_url: String,
    pub backend: MockBackend,
    pub client: reqwest::Client,
}

impl TestGateway {
    pub async fn start(backend: MockBackend) -> Result<Self> {
        Self::start_with(backend, |_| {}).await
    }

    pub async fn start_with(backend: MockBackend, tweak: impl FnOnce(&mut AppConfig)) -> Result<Self> {
        let backend_url = backend.spawn().await?;

        let mut config = AppConfig::for_backend(backend_url);
        tweak(&mut config);
        let state = AppState::new(config)?;

        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let listener = TcpListener::bind(("127.0.0.1", port)).await?;
        tokio::spawn(async move {
            let _ = merchant_dashboard_api::serve(listener, state).await;
        });

        // Redirects are asserted on, not followed
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            base_url: format!("http://127.0.0.1:{}", port),
            backend,
            client,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.get(self.url(path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.post(self.url(path))
    }

    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.put(self.url(path))
    }
}

/// Attach the auth cookie the way the browser would
pub fn with_session(builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    builder.header(reqwest::header::COOKIE, format!("accessToken={}", TOKEN))
}

pub async fn body_json(response: reqwest::Response) -> Result<Value> {
    response.json::<Value>().await.context("response body is not JSON")
}
