//! Access-logging stage
//!
//! Wraps all downstream processing and emits exactly one structured log line
//! per request, carrying the final status (middleware rejections and handler
//! errors included), latency, client address, method, and path.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::Error as ActixError;
use tracing::{info, warn, Level};

pub struct AccessLog;

impl<S, B> Transform<S, ServiceRequest> for AccessLog
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = AccessLogMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessLogMiddleware { service }))
    }
}

pub struct AccessLogMiddleware<S> {
    service: S,
}

/// Client errors and server errors log as warnings, everything else as info.
fn level_for(status: StatusCode) -> Level {
    if status.as_u16() >= 400 {
        Level::WARN
    } else {
        Level::INFO
    }
}

impl<S, B> Service<ServiceRequest> for AccessLogMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = futures_util::future::LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let client = req
            .connection_info()
            .realip_remote_addr()
            .unwrap_or("-")
            .to_string();

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let status = match &result {
                Ok(res) => res.status(),
                Err(err) => err.as_response_error().status_code(),
            };

            let duration_ms = start.elapsed().as_millis() as u64;
            let status_code = status.as_u16();

            match level_for(status) {
                Level::WARN => {
                    warn!(http.method = %method, url.path = %path, http.status_code = status_code, duration_ms = duration_ms, client.address = %client, message = "request_completed");
                }
                _ => {
                    info!(http.method = %method, url.path = %path, http.status_code = status_code, duration_ms = duration_ms, client.address = %client, message = "request_completed");
                }
            }

            result
        })
    }
}
