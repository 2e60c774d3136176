pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod proxy;
pub mod services;
pub mod types;

pub use app::{app, serve, AppState};
pub use config::AppConfig;
pub use error::ApiError;
