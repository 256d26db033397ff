use sea_orm::{ConnectionTrait, Database, DatabaseConnection};

use crate::error::AppError;

const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    display_name TEXT NOT NULL,
    vocabulary_level TEXT NOT NULL,
    vocabulary_score INTEGER NOT NULL,
    listening_level TEXT NOT NULL,
    listening_score INTEGER NOT NULL,
    speaking_level TEXT NOT NULL,
    speaking_score INTEGER NOT NULL,
    overall_level TEXT NOT NULL,
    total_study_days INTEGER NOT NULL,
    current_streak INTEGER NOT NULL,
    total_words_learned INTEGER NOT NULL,
    total_listening_minutes INTEGER NOT NULL,
    total_speaking_minutes INTEGER NOT NULL,
    last_study_date TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
"#;

/// Connect to the database at the given URL.
pub async fn connect_db(database_url: &str) -> Result<DatabaseConnection, AppError> {
    let conn = Database::connect(database_url).await?;
    Ok(conn)
}

/// Create the schema if it does not exist yet. Idempotent; called once at
/// startup before the server accepts requests.
pub async fn ensure_schema(conn: &DatabaseConnection) -> Result<(), AppError> {
    conn.execute_unprepared(CREATE_USERS_TABLE).await?;
    Ok(())
}
