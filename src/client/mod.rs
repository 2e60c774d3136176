// client/mod.rs - Typed client for the gateway's /api surface
//
// DashboardClient is what the dashboard UI (and the `dashboard` CLI) call. It
// keeps the auth cookie the way a browser would: set from a successful login,
// sent on every request, dropped on logout. Every method resolves to a
// HookResponse and never errors, so it can be handed straight to Hook::fetch.

pub mod hook;

use std::sync::{Arc, RwLock};

use reqwest::header::COOKIE;
use reqwest::multipart;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::proxy::Page;
use crate::types::{AccountAvailability, TableId, TableQr, TokenData};

pub use hook::{Hook, HookResponse, HookState};

pub const DEFAULT_COOKIE_NAME: &str = "accessToken";

/// `page`/`size`/`sort` for the paginated dashboard views; `None` lets the
/// gateway apply its defaults
#[derive(Debug, Clone, Default)]
pub struct PageParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Option<String>,
}

impl PageParams {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(size) = self.size {
            query.push(("size", size.to_string()));
        }
        if let Some(sort) = &self.sort {
            query.push(("sort", sort.clone()));
        }
        query
    }
}

#[derive(Debug, Clone)]
pub struct DashboardClient {
    http: reqwest::Client,
    base_url: String,
    cookie_name: String,
    token: Arc<RwLock<Option<String>>>,
}

impl DashboardClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            token: Arc::new(RwLock::new(None)),
        }
    }

    pub fn with_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.cookie_name = name.into();
        self
    }

    pub fn with_token(self, token: impl Into<String>) -> Self {
        self.set_token(Some(token.into()));
        self
    }

    pub fn token(&self) -> Option<String> {
        match self.token.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn set_token(&self, token: Option<String>) {
        match self.token.write() {
            Ok(mut guard) => *guard = token,
            Err(poisoned) => *poisoned.into_inner() = token,
        }
    }

    pub async fn login(&self, account_id: &str, password: &str) -> HookResponse<TokenData> {
        let response: HookResponse<TokenData> = self
            .send(
                self.http
                    .post(self.url("/api/auth/login"))
                    .json(&json!({ "accountId": account_id, "password": password })),
            )
            .await;

        if let Some(data) = response.data.as_ref().filter(|_| response.success) {
            self.set_token(Some(data.access_token.clone()));
        }
        response
    }

    pub async fn logout(&self) -> HookResponse<Value> {
        let response = self.send(self.http.post(self.url("/api/auth/logout"))).await;
        self.set_token(None);
        response
    }

    pub async fn signup(&self, form: Value) -> HookResponse<Value> {
        self.send(self.http.post(self.url("/api/auth/signup")).json(&form)).await
    }

    /// Upload a business licence image for field extraction
    pub async fn ocr(&self, file_name: &str, bytes: Vec<u8>) -> HookResponse<Value> {
        let form = multipart::Form::new().part("file", multipart::Part::bytes(bytes).file_name(file_name.to_string()));
        self.send(self.http.post(self.url("/api/auth/ocr")).multipart(form)).await
    }

    pub async fn check_id(&self, account_id: &str) -> HookResponse<AccountAvailability> {
        self.send(
            self.http
                .get(self.url("/api/auth/check-id"))
                .query(&[("accountId", account_id)]),
        )
        .await
    }

    pub async fn merchant_info(&self) -> HookResponse<Value> {
        self.send(self.http.get(self.url("/api/merchant/info"))).await
    }

    pub async fn upload_image(&self, file_name: &str, bytes: Vec<u8>) -> HookResponse<Value> {
        let form = multipart::Form::new().part("image", multipart::Part::bytes(bytes).file_name(file_name.to_string()));
        self.send(self.http.post(self.url("/api/merchant/image")).multipart(form)).await
    }

    pub async fn tables(&self) -> HookResponse<Vec<Value>> {
        self.send(self.http.get(self.url("/api/merchant/tables"))).await
    }

    pub async fn update_table(&self, table_id: &TableId, changes: Value) -> HookResponse<Value> {
        let url = match reqwest::Url::parse(&self.url("/api/merchant/tables")) {
            Ok(mut url) => {
                if let Ok(mut segments) = url.path_segments_mut() {
                    segments.push(&table_id.to_string());
                }
                url
            }
            Err(e) => return HookResponse::failure(format!("Update table error: {}", e)),
        };
        self.send(self.http.put(url).json(&changes)).await
    }

    pub async fn qr_codes(&self) -> HookResponse<Vec<TableQr>> {
        self.send(self.http.get(self.url("/api/merchant/qr"))).await
    }

    pub async fn create_qr(&self, table_id: &TableId) -> HookResponse<Value> {
        self.send(
            self.http
                .post(self.url("/api/merchant/qr"))
                .json(&json!({ "tableId": table_id })),
        )
        .await
    }

    pub async fn login_history(&self, params: &PageParams) -> HookResponse<Page<Value>> {
        self.send(
            self.http
                .get(self.url("/api/dashboard/login-history"))
                .query(&params.to_query()),
        )
        .await
    }

    pub async fn orders(&self, params: &PageParams) -> HookResponse<Page<Value>> {
        self.send(
            self.http
                .get(self.url("/api/dashboard/orders"))
                .query(&params.to_query()),
        )
        .await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, mut builder: reqwest::RequestBuilder) -> HookResponse<T> {
        if let Some(token) = self.token() {
            builder = builder.header(COOKIE, format!("{}={}", self.cookie_name, token));
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Gateway request failed: {}", e);
                return HookResponse::failure(format!("Request failed: {}", e));
            }
        };

        let status = response.status();
        match response.json::<HookResponse<T>>().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Unexpected gateway response (status {}): {}", status.as_u16(), e);
                HookResponse::failure(format!("Unexpected response (status {})", status.as_u16()))
            }
        }
    }
}
