// proxy/mod.rs - single upstream round-trip shared by every gateway route
//
// Each route validates its input, checks the auth cookie when required and then
// hands a ProxyRequest to BackendProxy::execute, which owns the rest of the
// contract: one request to the backend, status pass-through on failure with a
// normalized message, envelope unwrapping on success.

pub mod envelope;
pub mod input;
pub mod normalizer;
pub mod token;

use std::time::Duration;

use reqwest::{multipart, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::config::{AppConfig, ConfigError};
use crate::error::ApiError;

pub use envelope::{BackendEnvelope, BackendErrorEnvelope, Page, PageQuery};
pub use input::{FormPart, MultipartBody};
pub use normalizer::normalize_error;
pub use token::{auth_token, AuthToken};

/// Body forwarded to the backend
#[derive(Debug, Clone, Default)]
pub enum ProxyBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(MultipartBody),
}

/// Description of one upstream call
#[derive(Debug, Clone)]
pub struct ProxyRequest {
    /// Human name of the operation, used as the prefix of fallback messages
    pub operation: &'static str,
    pub method: Method,
    pub path: String,
    /// Extra path segments, percent-encoded when appended
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub body: ProxyBody,
    pub token: Option<AuthToken>,
}

impl ProxyRequest {
    pub fn new(operation: &'static str, method: Method, path: impl Into<String>) -> Self {
        Self {
            operation,
            method,
            path: path.into(),
            segments: Vec::new(),
            query: Vec::new(),
            body: ProxyBody::Empty,
            token: None,
        }
    }

    pub fn get(operation: &'static str, path: impl Into<String>) -> Self {
        Self::new(operation, Method::GET, path)
    }

    pub fn post(operation: &'static str, path: impl Into<String>) -> Self {
        Self::new(operation, Method::POST, path)
    }

    pub fn put(operation: &'static str, path: impl Into<String>) -> Self {
        Self::new(operation, Method::PUT, path)
    }

    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    pub fn query<K: Into<String>, V: Into<String>>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = ProxyBody::Json(body);
        self
    }

    pub fn multipart(mut self, body: MultipartBody) -> Self {
        self.body = ProxyBody::Multipart(body);
        self
    }

    pub fn bearer(mut self, token: &AuthToken) -> Self {
        self.token = Some(token.clone());
        self
    }
}

/// HTTP client bound to the configured backend base URL
#[derive(Debug, Clone)]
pub struct BackendProxy {
    client: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl BackendProxy {
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(Self {
            client,
            base_url: config.backend_url()?,
            timeout: config.backend_timeout(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Issue the request and unwrap the backend envelope's `data`.
    ///
    /// Non-2xx answers become `ApiError::Upstream` with the backend's status;
    /// a missed deadline becomes `ApiError::UpstreamTimeout`; anything else that
    /// goes wrong (connection refused, unparsable success body) is
    /// `ApiError::Internal` prefixed with the operation name.
    pub async fn execute<T: DeserializeOwned>(&self, request: ProxyRequest) -> Result<Option<T>, ApiError> {
        let operation = request.operation;
        let body = self.send(request).await?;

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let envelope: BackendEnvelope<T> = serde_json::from_slice(&body).map_err(|e| {
            tracing::error!("{}: unparsable success body from backend: {}", operation, e);
            ApiError::unexpected(operation, e)
        })?;

        Ok(envelope.data)
    }

    /// Send the request and return the raw body of a 2xx response
    async fn send(&self, request: ProxyRequest) -> Result<Vec<u8>, ApiError> {
        let operation = request.operation;
        let url = self.url_for(&request)?;
        let method = request.method.clone();

        tracing::debug!("{}: {} {}", operation, method, url.path());

        let mut builder = self.client.request(method, url.clone()).timeout(self.timeout);

        if let Some(token) = &request.token {
            builder = builder.header(reqwest::header::AUTHORIZATION, token.bearer());
        }

        builder = match request.body {
            ProxyBody::Empty => builder,
            // .json() also sets Content-Type: application/json
            ProxyBody::Json(value) => builder.json(&value),
            ProxyBody::Multipart(form) => builder.multipart(build_form(form).map_err(|e| ApiError::unexpected(operation, e))?),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| transport_error(operation, e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error(operation, e))?;

        if !status.is_success() {
            let message = normalize_error(status, &body, operation);
            tracing::warn!(
                "{}: backend answered {} for {}: {}",
                operation,
                status.as_u16(),
                url.path(),
                message
            );
            return Err(ApiError::upstream(status.as_u16(), message));
        }

        Ok(body.to_vec())
    }

    fn url_for(&self, request: &ProxyRequest) -> Result<Url, ApiError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = request.path.trim_start_matches('/');

        let mut url = Url::parse(&format!("{}/{}", base, path))
            .map_err(|e| ApiError::unexpected(request.operation, e))?;

        if !request.segments.is_empty() {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ApiError::unexpected(request.operation, "backend URL cannot carry a path"))?;
            segments.pop_if_empty();
            for segment in &request.segments {
                segments.push(segment);
            }
        }

        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }

        Ok(url)
    }
}

fn transport_error(operation: &'static str, err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        tracing::error!("{}: backend call timed out: {}", operation, err);
        ApiError::timeout(operation)
    } else {
        tracing::error!("{}: backend call failed: {}", operation, err);
        ApiError::unexpected(operation, err)
    }
}

fn build_form(body: MultipartBody) -> Result<multipart::Form, reqwest::Error> {
    let mut form = multipart::Form::new();

    for part in body.parts {
        let FormPart { name, file_name, content_type, bytes } = part;
        let mut reqwest_part = multipart::Part::bytes(bytes);
        if let Some(file_name) = file_name {
            reqwest_part = reqwest_part.file_name(file_name);
        }
        if let Some(content_type) = content_type {
            reqwest_part = reqwest_part.mime_str(&content_type)?;
        }
        form = form.part(name, reqwest_part);
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proxy(base: &str) -> BackendProxy {
        BackendProxy::from_config(&AppConfig::for_backend(base)).unwrap()
    }

    #[test]
    fn path_is_appended_to_base_path() {
        let proxy = proxy("http://backend.test/api/v1");
        let request = ProxyRequest::get("Fetch merchant info", "/merchant/info");
        assert_eq!(proxy.url_for(&request).unwrap().as_str(), "http://backend.test/api/v1/merchant/info");
    }

    #[test]
    fn trailing_slash_on_base_is_tolerated() {
        let proxy = proxy("http://backend.test/api/v1/");
        let request = ProxyRequest::get("Fetch merchant info", "/merchant/info");
        assert_eq!(proxy.url_for(&request).unwrap().as_str(), "http://backend.test/api/v1/merchant/info");
    }

    #[test]
    fn segments_are_percent_encoded() {
        let proxy = proxy("http://backend.test/api/v1");
        let request = ProxyRequest::put("Update table", "/merchant/tables").segment("a b/c");
        assert_eq!(
            proxy.url_for(&request).unwrap().as_str(),
            "http://backend.test/api/v1/merchant/tables/a%20b%2Fc"
        );
    }

    #[test]
    fn query_pairs_are_encoded() {
        let proxy = proxy("http://backend.test/api/v1");
        let request = ProxyRequest::get("Check account id", "/auth/checkAccountId")
            .query([("accountId", "kim & co")]);
        assert_eq!(
            proxy.url_for(&request).unwrap().as_str(),
            "http://backend.test/api/v1/auth/checkAccountId?accountId=kim+%26+co"
        );
    }
}
