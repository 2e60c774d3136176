use axum::http::{header, HeaderMap};
use cookie::Cookie;

/// Opaque bearer token issued by the backend and held in the auth cookie
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the upstream `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

// Never print the token itself
impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthToken(..)")
    }
}

/// Read the named cookie from every `Cookie` header of the request.
/// Values are percent-decoded; blank values count as absent.
pub fn auth_token(headers: &HeaderMap, cookie_name: &str) -> Option<AuthToken> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| Cookie::split_parse_encoded(value))
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == cookie_name && !cookie.value().trim().is_empty())
        .map(|cookie| AuthToken::new(cookie.value().trim()))
}
