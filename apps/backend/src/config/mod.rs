use std::env;

use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATABASE_URL: &str = "sqlite://data/accounts.db?mode=rwc";

/// Process configuration, read once at startup. Missing required variables
/// are fatal before the server binds.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());

        let port = match env::var("BACKEND_PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|_| {
                AppError::config(format!("BACKEND_PORT must be a valid port number, got '{raw}'"))
            })?,
            Err(_) => DEFAULT_PORT,
        };

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let jwt_secret = must_var("BACKEND_JWT_SECRET")?;

        Ok(Self {
            host,
            port,
            database_url,
            jwt_secret,
        })
    }
}

/// Get required environment variable or return error
fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::sync::{Mutex, MutexGuard};

    use super::AppConfig;

    // Env vars are process-global; serialize the tests that touch them.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn lock_env() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn clear_env() {
        env::remove_var("BACKEND_HOST");
        env::remove_var("BACKEND_PORT");
        env::remove_var("DATABASE_URL");
        env::remove_var("BACKEND_JWT_SECRET");
    }

    #[test]
    fn test_defaults_with_secret_set() {
        let _guard = lock_env();
        clear_env();
        env::set_var("BACKEND_JWT_SECRET", "unit-test-secret");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.jwt_secret, "unit-test-secret");

        clear_env();
    }

    #[test]
    fn test_missing_secret_is_fatal() {
        let _guard = lock_env();
        clear_env();

        assert!(AppConfig::from_env().is_err());
    }

    #[test]
    fn test_invalid_port_is_fatal() {
        let _guard = lock_env();
        clear_env();
        env::set_var("BACKEND_JWT_SECRET", "unit-test-secret");
        env::set_var("BACKEND_PORT", "not-a-port");

        assert!(AppConfig::from_env().is_err());

        clear_env();
    }
}
