use std::convert::Infallible;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use cookie::{Cookie, SameSite};

use crate::app::AppState;
use crate::error::ApiError;
use crate::proxy::{auth_token, AuthToken};

/// Auth cookie of the incoming request, if any.
///
/// Extraction never fails: routes validate their input first and then call
/// [`SessionToken::require`], so a request that is both malformed and
/// unauthenticated is reported as a 400 and neither reaches the backend.
#[derive(Debug, Clone)]
pub struct SessionToken(pub Option<AuthToken>);

impl SessionToken {
    /// The token, or a 401 raised before any upstream call
    pub fn require(self) -> Result<AuthToken, ApiError> {
        self.0.ok_or_else(|| {
            tracing::warn!("Rejected protected request without auth cookie");
            ApiError::unauthenticated()
        })
    }
}

#[async_trait]
impl FromRequestParts<AppState> for SessionToken {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(SessionToken(auth_token(&parts.headers, &state.config.auth.cookie_name)))
    }
}

/// `Set-Cookie` value storing the token after a successful login
pub fn session_cookie(name: &str, token: &AuthToken, secure: bool) -> String {
    auth_cookie(name, token.as_str().to_string(), secure)
        .encoded()
        .to_string()
}

/// `Set-Cookie` value expiring the auth cookie
pub fn expired_session_cookie(name: &str, secure: bool) -> String {
    let mut cookie = auth_cookie(name, String::new(), secure);
    cookie.make_removal();
    cookie.encoded().to_string()
}

fn auth_cookie(name: &str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name.to_string(), value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}
