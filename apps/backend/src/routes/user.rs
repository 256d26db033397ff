//! Protected routes. Every handler runs behind the auth gate and reads the
//! caller's identity from request-scoped context.

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::domain::users::{UserLevel, UserProfile, UserStats};
use crate::error::AppError;
use crate::extractors::Identity;
use crate::services::users;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
}

/// GET /api/user/profile
async fn get_profile(
    identity: Identity,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = users::fetch(app_state.db()?, identity.user_id).await?;
    Ok(HttpResponse::Ok().json(UserProfile::from(user)))
}

/// PUT /api/user/profile
async fn update_profile(
    identity: Identity,
    req: web::Json<UpdateProfileRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let req = req.into_inner();
    let user = users::update_display_name(app_state.db()?, identity.user_id, req.name).await?;
    Ok(HttpResponse::Ok().json(UserProfile::from(user)))
}

/// PUT /api/user/level
async fn update_level(
    identity: Identity,
    level: web::Json<UserLevel>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = users::update_level(app_state.db()?, identity.user_id, level.into_inner()).await?;
    Ok(HttpResponse::Ok().json(UserProfile::from(user)))
}

/// PUT /api/user/stats
async fn update_stats(
    identity: Identity,
    stats: web::Json<UserStats>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = users::update_stats(app_state.db()?, identity.user_id, stats.into_inner()).await?;
    Ok(HttpResponse::Ok().json(UserProfile::from(user)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/profile", web::get().to(get_profile))
        .route("/profile", web::put().to(update_profile))
        .route("/level", web::put().to(update_level))
        .route("/stats", web::put().to(update_stats));
}
