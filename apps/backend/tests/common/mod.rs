use backend::{ensure_schema, AppState, SecurityConfig};
use sea_orm::{ConnectOptions, Database};

pub const TEST_SECRET: &[u8] = b"integration_test_secret_do_not_reuse";

/// AppState backed by a fresh in-memory SQLite database. A single pooled
/// connection keeps every query on the same in-memory instance.
#[allow(dead_code)]
pub async fn test_state_with_db() -> AppState {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options.max_connections(1);

    let db = Database::connect(options)
        .await
        .expect("connect to in-memory sqlite");
    ensure_schema(&db).await.expect("create schema");

    AppState::new(db, SecurityConfig::new(TEST_SECRET))
}
