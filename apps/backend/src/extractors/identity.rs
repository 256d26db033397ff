//! Identity extractor for handlers behind the auth gate.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::auth::claims::AuthClaims;
use crate::error::AppError;

/// Verified identity of the caller, read from the request-scoped context the
/// auth gate populated. No storage round-trip: the claim is taken as issued.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: i64,
    pub username: String,
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let identity = req
            .extensions()
            .get::<AuthClaims>()
            .map(|claims| Identity {
                user_id: claims.user_id,
                username: claims.username.clone(),
            })
            .ok_or_else(AppError::unauthorized_missing_credential);

        ready(identity)
    }
}
