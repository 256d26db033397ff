#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod domain;
pub mod entities;
pub mod error;
pub mod extractors;
pub mod health;
pub mod infra;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

// Re-exports for public API
pub use auth::claims::AuthClaims;
pub use auth::jwt::{mint_access_token, verify_access_token, Claims, TokenError};
pub use config::AppConfig;
pub use error::AppError;
pub use extractors::Identity;
pub use infra::db::{connect_db, ensure_schema};
pub use middleware::{AccessLog, AuthGate, CrossOrigin};
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;
