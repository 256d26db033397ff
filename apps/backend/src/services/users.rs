//! User account operations. The single canonical CRUD collaborator behind the
//! authentication boundary: lookups by unique username or numeric id, plus
//! the register/login and profile/level/stats mutations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set, SqlErr,
};
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::auth::password;
use crate::domain::users::{UserLevel, UserStats};
use crate::entities::users;
use crate::error::AppError;

/// Create a new user with a hashed password and default level/stats.
/// Fails with a conflict when the username is already registered.
pub async fn register(
    conn: &impl ConnectionTrait,
    username: &str,
    plain_password: &str,
    display_name: &str,
) -> Result<users::Model, AppError> {
    let existing = users::Entity::find()
        .filter(users::Column::Username.eq(username))
        .one(conn)
        .await?;

    if existing.is_some() {
        warn!(username = %username, "registration rejected, username taken");
        return Err(username_taken(username));
    }

    let password_hash = password::hash_password(plain_password)?;
    let user = insert_user(conn, username, &password_hash, display_name).await?;

    info!(user_id = user.id, username = %user.username, "user registered");
    Ok(user)
}

fn username_taken(username: &str) -> AppError {
    AppError::conflict(
        "USERNAME_TAKEN",
        format!("username '{username}' is already registered"),
    )
}

/// Insert a fresh row with default level/stats. A concurrent registration can
/// slip past the lookup in [`register`], so a unique-constraint violation on
/// the username column still maps to the conflict, not a database error.
async fn insert_user(
    conn: &impl ConnectionTrait,
    username: &str,
    password_hash: &str,
    display_name: &str,
) -> Result<users::Model, AppError> {
    let level = UserLevel::default();
    let stats = UserStats::default();
    let now = OffsetDateTime::now_utc();

    users::ActiveModel {
        id: NotSet,
        username: Set(username.to_string()),
        password_hash: Set(password_hash.to_string()),
        display_name: Set(display_name.to_string()),
        vocabulary_level: Set(level.vocabulary_level),
        vocabulary_score: Set(level.vocabulary_score),
        listening_level: Set(level.listening_level),
        listening_score: Set(level.listening_score),
        speaking_level: Set(level.speaking_level),
        speaking_score: Set(level.speaking_score),
        overall_level: Set(level.overall_level),
        total_study_days: Set(stats.total_study_days),
        current_streak: Set(stats.current_streak),
        total_words_learned: Set(stats.total_words_learned),
        total_listening_minutes: Set(stats.total_listening_minutes),
        total_speaking_minutes: Set(stats.total_speaking_minutes),
        last_study_date: Set(stats.last_study_date),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
    .map_err(|err| match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => username_taken(username),
        _ => AppError::from(err),
    })
}

/// Look up a user by username and compare the password hash. Unknown username
/// and wrong password are indistinguishable to the caller.
pub async fn authenticate(
    conn: &impl ConnectionTrait,
    username: &str,
    plain_password: &str,
) -> Result<users::Model, AppError> {
    let user = users::Entity::find()
        .filter(users::Column::Username.eq(username))
        .one(conn)
        .await?;

    let user = match user {
        Some(user) => user,
        None => {
            warn!(username = %username, "login rejected, unknown username");
            return Err(AppError::unauthorized_invalid_login());
        }
    };

    if !password::verify_password(plain_password, &user.password_hash)? {
        warn!(user_id = user.id, username = %username, "login rejected, password mismatch");
        return Err(AppError::unauthorized_invalid_login());
    }

    info!(user_id = user.id, username = %user.username, "login succeeded");
    Ok(user)
}

/// Fetch a user by id, 404 when the record is gone.
pub async fn fetch(conn: &impl ConnectionTrait, user_id: i64) -> Result<users::Model, AppError> {
    users::Entity::find_by_id(user_id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::not_found("USER_NOT_FOUND", format!("user {user_id} not found")))
}

/// Update the display name. An absent or empty name leaves the record as-is.
pub async fn update_display_name(
    conn: &impl ConnectionTrait,
    user_id: i64,
    name: Option<String>,
) -> Result<users::Model, AppError> {
    let user = fetch(conn, user_id).await?;

    let name = match name.filter(|n| !n.trim().is_empty()) {
        Some(name) => name,
        None => return Ok(user),
    };

    let mut active: users::ActiveModel = user.into();
    active.display_name = Set(name);
    active.updated_at = Set(OffsetDateTime::now_utc());
    let user = active.update(conn).await?;

    info!(user_id = user.id, "profile updated");
    Ok(user)
}

/// Replace the level block.
pub async fn update_level(
    conn: &impl ConnectionTrait,
    user_id: i64,
    level: UserLevel,
) -> Result<users::Model, AppError> {
    let user = fetch(conn, user_id).await?;

    let mut active: users::ActiveModel = user.into();
    active.vocabulary_level = Set(level.vocabulary_level);
    active.vocabulary_score = Set(level.vocabulary_score);
    active.listening_level = Set(level.listening_level);
    active.listening_score = Set(level.listening_score);
    active.speaking_level = Set(level.speaking_level);
    active.speaking_score = Set(level.speaking_score);
    active.overall_level = Set(level.overall_level);
    active.updated_at = Set(OffsetDateTime::now_utc());
    let user = active.update(conn).await?;

    info!(user_id = user.id, overall_level = %user.overall_level, "level updated");
    Ok(user)
}

/// Replace the stats block.
pub async fn update_stats(
    conn: &impl ConnectionTrait,
    user_id: i64,
    stats: UserStats,
) -> Result<users::Model, AppError> {
    let user = fetch(conn, user_id).await?;

    let mut active: users::ActiveModel = user.into();
    active.total_study_days = Set(stats.total_study_days);
    active.current_streak = Set(stats.current_streak);
    active.total_words_learned = Set(stats.total_words_learned);
    active.total_listening_minutes = Set(stats.total_listening_minutes);
    active.total_speaking_minutes = Set(stats.total_speaking_minutes);
    active.last_study_date = Set(stats.last_study_date);
    active.updated_at = Set(OffsetDateTime::now_utc());
    let user = active.update(conn).await?;

    info!(user_id = user.id, "stats updated");
    Ok(user)
}
