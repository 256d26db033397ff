//! Cross-origin policy stage
//!
//! First stage of the pipeline: every response leaving the server carries the
//! permissive cross-origin headers, including error responses produced
//! further down, and an OPTIONS pre-flight is answered immediately with
//! 204 No Content without forwarding.

use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{self, HeaderMap, HeaderValue};
use actix_web::http::Method;
use actix_web::{Error, HttpResponse};
use futures_util::future::{ready, LocalBoxFuture, Ready};

fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(
            "Content-Type, Content-Length, Accept-Encoding, Authorization, Accept, Origin, \
             Cache-Control, X-Requested-With",
        ),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS"),
    );
}

pub struct CrossOrigin;

impl<S, B> Transform<S, ServiceRequest> for CrossOrigin
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B, BoxBody>>;
    type Error = Error;
    type InitError = ();
    type Transform = CrossOriginMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CrossOriginMiddleware { service }))
    }
}

pub struct CrossOriginMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for CrossOriginMiddleware<S>
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
        // Pre-flight probes are terminal here; nothing downstream runs.
        if req.method() == Method::OPTIONS {
            let mut res = HttpResponse::NoContent().finish();
            apply_cors_headers(res.headers_mut());
            return Box::pin(ready(Ok(req.into_response(res).map_into_right_body())));
        }

        let http_req = req.request().clone();
        let fut = self.service.call(req);

        Box::pin(async move {
            // Render downstream errors here so they still get the headers.
            let mut res = match fut.await {
                Ok(res) => res.map_into_left_body(),
                Err(err) => {
                    let res = HttpResponse::from_error(err);
                    ServiceResponse::new(http_req, res).map_into_right_body()
                }
            };

            apply_cors_headers(res.headers_mut());
            Ok(res)
        })
    }
}
