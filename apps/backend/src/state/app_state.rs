use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::error::AppError;

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (absent in middleware-only test scenarios)
    pub db: Option<DatabaseConnection>,
    /// Security configuration including token settings
    pub security: SecurityConfig,
}

impl AppState {
    /// Create a new AppState with the given database connection and security config
    pub fn new(db: DatabaseConnection, security: SecurityConfig) -> Self {
        Self {
            db: Some(db),
            security,
        }
    }

    /// Create a new AppState without a database connection (for testing)
    pub fn without_db(security: SecurityConfig) -> Self {
        Self { db: None, security }
    }

    /// Database connection, or an internal error when the state was built
    /// without one.
    pub fn db(&self) -> Result<&DatabaseConnection, AppError> {
        self.db
            .as_ref()
            .ok_or_else(|| AppError::internal("database connection not available".to_string()))
    }
}
