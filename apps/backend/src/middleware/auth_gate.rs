//! Auth gate middleware
//!
//! Guards protected routes: extracts the bearer credential from the
//! Authorization header, verifies it with the token codec, and either
//! short-circuits with a 401 or inserts [`AuthClaims`] into request
//! extensions and forwards. Rejections are answered as real responses (not
//! propagated errors) so the access-logging stage records the terminal
//! status.

use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::error::ResponseError;
use actix_web::http::header::{self, HeaderValue};
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::{debug, warn};

use crate::auth::claims::AuthClaims;
use crate::auth::jwt::verify_access_token;
use crate::error::AppError;
use crate::state::app_state::AppState;

pub struct AuthGate;

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B, BoxBody>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateMiddleware { service }))
    }
}

pub struct AuthGateMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B, BoxBody>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let auth_header = req.headers().get(header::AUTHORIZATION).cloned();

        let token = match bearer_token(auth_header.as_ref()) {
            Ok(token) => token,
            Err(err) => {
                warn!(url.path = %req.path(), error = %err, "request rejected");
                return Box::pin(ready(Ok(reject(req, &err))));
            }
        };

        let app_state = match req.app_data::<web::Data<AppState>>() {
            Some(state) => state.clone(),
            None => {
                let err = AppError::internal("AppState not available".to_string());
                return Box::pin(ready(Ok(reject(req, &err))));
            }
        };

        match verify_access_token(&token, &app_state.security) {
            Ok(claims) => {
                debug!(
                    user_id = claims.sub,
                    username = %claims.username,
                    "request authenticated"
                );

                // Store the verified identity BEFORE calling the service
                req.extensions_mut().insert(AuthClaims {
                    user_id: claims.sub,
                    username: claims.username,
                });

                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(|res| res.map_into_left_body()) })
            }
            Err(err) => {
                // The codec's error kinds stay internal: log the kind, answer
                // with one undifferentiated 401.
                warn!(error = %err, "token verification failed");
                let external = AppError::unauthorized_invalid_credential();
                Box::pin(ready(Ok(reject(req, &external))))
            }
        }
    }
}

fn reject<B>(req: ServiceRequest, err: &AppError) -> ServiceResponse<EitherBody<B, BoxBody>> {
    let res = err.error_response();
    req.into_response(res).map_into_right_body()
}

/// Pull the token out of the Authorization header. The scheme must be exactly
/// `Bearer ` with a non-empty remainder.
fn bearer_token(header_value: Option<&HeaderValue>) -> Result<String, AppError> {
    let value = header_value.ok_or_else(AppError::unauthorized_missing_credential)?;

    let auth_str = value
        .to_str()
        .map_err(|_| AppError::unauthorized_malformed_credential())?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(AppError::unauthorized_malformed_credential)?;

    if token.is_empty() {
        return Err(AppError::unauthorized_malformed_credential());
    }

    Ok(token.to_string())
}
