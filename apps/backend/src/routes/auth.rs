//! Public routes: registration and login. Both issue a fresh token.

use std::time::SystemTime;

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::mint_access_token;
use crate::domain::users::UserProfile;
use crate::error::AppError;
use crate::services::users;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

fn validate_register(req: &RegisterRequest) -> Result<(), AppError> {
    let username_len = req.username.chars().count();
    if !(3..=50).contains(&username_len) {
        return Err(AppError::bad_request(
            "INVALID_USERNAME",
            "username must be between 3 and 50 characters".to_string(),
        ));
    }
    if req.password.chars().count() < 6 {
        return Err(AppError::bad_request(
            "INVALID_PASSWORD",
            "password must be at least 6 characters".to_string(),
        ));
    }
    if req.name.trim().is_empty() {
        return Err(AppError::bad_request(
            "INVALID_NAME",
            "name must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// POST /api/auth/register
async fn register(
    req: web::Json<RegisterRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    validate_register(&req)?;

    let db = app_state.db()?;
    let user = users::register(db, &req.username, &req.password, &req.name).await?;
    let token = mint_access_token(
        user.id,
        &user.username,
        SystemTime::now(),
        &app_state.security,
    )?;

    Ok(HttpResponse::Created().json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// POST /api/auth/login
async fn login(
    req: web::Json<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = app_state.db()?;
    let user = users::authenticate(db, &req.username, &req.password).await?;
    let token = mint_access_token(
        user.id,
        &user.username,
        SystemTime::now(),
        &app_state.security,
    )?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        user: user.into(),
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/login", web::post().to(login));
}
