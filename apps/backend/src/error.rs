use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

/// JSON body rendered for every error response.
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub error: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {detail}")]
    BadRequest { code: &'static str, detail: String },
    #[error("Unauthorized: missing credential")]
    UnauthorizedMissingCredential,
    #[error("Unauthorized: malformed credential")]
    UnauthorizedMalformedCredential,
    #[error("Unauthorized: invalid credential")]
    UnauthorizedInvalidCredential,
    #[error("Unauthorized: invalid login")]
    UnauthorizedInvalidLogin,
    #[error("Not found: {detail}")]
    NotFound { code: &'static str, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: &'static str, detail: String },
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    /// Machine-readable code carried in the response body.
    pub fn code(&self) -> String {
        match self {
            AppError::BadRequest { code, .. } => (*code).to_string(),
            AppError::UnauthorizedMissingCredential => "UNAUTHORIZED_MISSING_CREDENTIAL".to_string(),
            AppError::UnauthorizedMalformedCredential => {
                "UNAUTHORIZED_MALFORMED_CREDENTIAL".to_string()
            }
            AppError::UnauthorizedInvalidCredential => "UNAUTHORIZED_INVALID_CREDENTIAL".to_string(),
            AppError::UnauthorizedInvalidLogin => "UNAUTHORIZED_INVALID_LOGIN".to_string(),
            AppError::NotFound { code, .. } => (*code).to_string(),
            AppError::Conflict { code, .. } => (*code).to_string(),
            AppError::Db { .. } => "DB_ERROR".to_string(),
            AppError::Config { .. } => "CONFIG_ERROR".to_string(),
            AppError::Internal { .. } => "INTERNAL".to_string(),
        }
    }

    /// Human-readable detail carried in the response body.
    pub fn detail(&self) -> String {
        match self {
            AppError::BadRequest { detail, .. } => detail.clone(),
            AppError::UnauthorizedMissingCredential => "Authorization header required".to_string(),
            AppError::UnauthorizedMalformedCredential => "Bearer token required".to_string(),
            AppError::UnauthorizedInvalidCredential => "Invalid or expired token".to_string(),
            AppError::UnauthorizedInvalidLogin => "Invalid username or password".to_string(),
            AppError::NotFound { detail, .. } => detail.clone(),
            AppError::Conflict { detail, .. } => detail.clone(),
            AppError::Db { detail } => detail.clone(),
            AppError::Config { detail } => detail.clone(),
            AppError::Internal { detail } => detail.clone(),
        }
    }

    /// HTTP status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::UnauthorizedMissingCredential
            | AppError::UnauthorizedMalformedCredential
            | AppError::UnauthorizedInvalidCredential
            | AppError::UnauthorizedInvalidLogin => StatusCode::UNAUTHORIZED,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Db { .. } | AppError::Config { .. } | AppError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn bad_request(code: &'static str, detail: String) -> Self {
        Self::BadRequest { code, detail }
    }

    pub fn unauthorized_missing_credential() -> Self {
        Self::UnauthorizedMissingCredential
    }

    pub fn unauthorized_malformed_credential() -> Self {
        Self::UnauthorizedMalformedCredential
    }

    pub fn unauthorized_invalid_credential() -> Self {
        Self::UnauthorizedInvalidCredential
    }

    pub fn unauthorized_invalid_login() -> Self {
        Self::UnauthorizedInvalidLogin
    }

    pub fn not_found(code: &'static str, detail: String) -> Self {
        Self::NotFound { code, detail }
    }

    pub fn conflict(code: &'static str, detail: String) -> Self {
        Self::Conflict { code, detail }
    }

    pub fn db(detail: String) -> Self {
        Self::Db { detail }
    }

    pub fn config(detail: String) -> Self {
        Self::Config { detail }
    }

    pub fn internal(detail: String) -> Self {
        Self::Internal { detail }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::db(format!("db error: {e}"))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status()).json(ErrorBody {
            code: self.code(),
            error: self.detail(),
        })
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;

    use super::AppError;

    #[test]
    fn unauthorized_variants_share_status_but_not_codes() {
        let missing = AppError::unauthorized_missing_credential();
        let malformed = AppError::unauthorized_malformed_credential();
        let invalid = AppError::unauthorized_invalid_credential();

        for err in [&missing, &malformed, &invalid] {
            assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        }
        assert_ne!(missing.code(), malformed.code());
        assert_ne!(malformed.code(), invalid.code());
    }

    #[test]
    fn conflict_maps_to_409() {
        let err = AppError::conflict("USERNAME_TAKEN", "taken".to_string());
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.code(), "USERNAME_TAKEN");
        assert_eq!(err.detail(), "taken");
    }
}
