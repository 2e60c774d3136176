use std::env;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub auth: AuthConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the merchant backend, e.g. `http://localhost:8080/api/v1`
    pub base_url: String,
    /// Deadline for a single upstream call
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Cookie carrying the bearer token issued by the backend
    pub cookie_name: String,
    pub login_path: String,
    pub dashboard_path: String,
    pub secure_cookie: bool,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid backend URL '{url}': {source}")]
    InvalidBackendUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Backend timeout must be greater than zero")]
    ZeroTimeout,
    #[error("Auth cookie name must not be empty")]
    EmptyCookieName,
    #[error("Failed to build backend HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Some(port) = env::var("DASHBOARD_API_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.server.port = port;
        }
        if let Ok(v) = env::var("BIND_ADDRESS") {
            self.server.bind_address = v;
        }

        // Backend overrides
        if let Ok(v) = env::var("BACKEND_API_URL") {
            self.backend.base_url = v;
        }
        if let Ok(v) = env::var("BACKEND_TIMEOUT_SECS") {
            self.backend.timeout_secs = v.parse().unwrap_or(self.backend.timeout_secs);
        }

        // Auth overrides
        if let Ok(v) = env::var("AUTH_COOKIE_NAME") {
            self.auth.cookie_name = v;
        }
        if let Ok(v) = env::var("LOGIN_PATH") {
            self.auth.login_path = v;
        }
        if let Ok(v) = env::var("DASHBOARD_PATH") {
            self.auth.dashboard_path = v;
        }
        if let Ok(v) = env::var("AUTH_SECURE_COOKIE") {
            self.auth.secure_cookie = v.parse().unwrap_or(self.auth.secure_cookie);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }

        self
    }

    /// Check the values the gateway cannot run without
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.backend_url()?;
        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.auth.cookie_name.trim().is_empty() {
            return Err(ConfigError::EmptyCookieName);
        }
        Ok(())
    }

    pub fn backend_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.backend.base_url).map_err(|source| ConfigError::InvalidBackendUrl {
            url: self.backend.base_url.clone(),
            source,
        })
    }

    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(self.backend.timeout_secs)
    }

    /// Development defaults pointed at an arbitrary backend, handy for tests
    pub fn for_backend(base_url: impl Into<String>) -> Self {
        let mut config = Self::development();
        config.backend.base_url = base_url.into();
        config
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                bind_address: "127.0.0.1".to_string(),
                port: 3000,
            },
            backend: BackendConfig {
                base_url: "http://localhost:8080/api/v1".to_string(),
                timeout_secs: 30,
            },
            auth: AuthConfig {
                cookie_name: "accessToken".to_string(),
                login_path: "/login".to_string(),
                dashboard_path: "/dashboard".to_string(),
                secure_cookie: false,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["http://localhost:3000".to_string(), "http://localhost:5173".to_string()],
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                bind_address: "0.0.0.0".to_string(),
                port: 3000,
            },
            backend: BackendConfig {
                base_url: "https://api.staging.example.com/api/v1".to_string(),
                timeout_secs: 15,
            },
            auth: AuthConfig {
                cookie_name: "accessToken".to_string(),
                login_path: "/login".to_string(),
                dashboard_path: "/dashboard".to_string(),
                secure_cookie: true,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                bind_address: "0.0.0.0".to_string(),
                port: 3000,
            },
            backend: BackendConfig {
                base_url: "https://api.example.com/api/v1".to_string(),
                timeout_secs: 10,
            },
            auth: AuthConfig {
                cookie_name: "accessToken".to_string(),
                login_path: "/login".to_string(),
                dashboard_path: "/dashboard".to_string(),
                secure_cookie: true,
            },
            security: SecurityConfig {
                enable_cors: false,
                cors_origins: vec!["https://app.example.com".to_string()],
            },
        }
    }
}
