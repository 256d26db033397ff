mod common;

use std::time::{Duration, SystemTime};

use actix_web::http::StatusCode;
use actix_web::{test, web, App, HttpResponse};
use backend::{mint_access_token, AppError, AppState, AuthGate, Identity, SecurityConfig};
use serde_json::Value;

/// Echoes the identity the auth gate placed into request-scoped context.
async fn whoami(identity: Identity) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "user_id": identity.user_id,
        "username": identity.username,
    })))
}

fn security() -> SecurityConfig {
    SecurityConfig::new(common::TEST_SECRET)
}

macro_rules! gate_app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::without_db(security())))
                .service(
                    web::scope("/api/user")
                        .wrap(AuthGate)
                        .route("/whoami", web::get().to(whoami)),
                ),
        )
        .await
    };
}

#[actix_web::test]
async fn test_missing_header_is_rejected_before_handler() {
    let app = gate_app!();

    let req = test::TestRequest::get().uri("/api/user/whoami").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "UNAUTHORIZED_MISSING_CREDENTIAL");
}

#[actix_web::test]
async fn test_non_bearer_scheme_is_rejected() {
    let app = gate_app!();

    let req = test::TestRequest::get()
        .uri("/api/user/whoami")
        .insert_header(("Authorization", "Token abc.def.ghi"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "UNAUTHORIZED_MALFORMED_CREDENTIAL");
}

#[actix_web::test]
async fn test_garbage_token_is_rejected() {
    let app = gate_app!();

    let req = test::TestRequest::get()
        .uri("/api/user/whoami")
        .insert_header(("Authorization", "Bearer not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "UNAUTHORIZED_INVALID_CREDENTIAL");
}

#[actix_web::test]
async fn test_expired_token_maps_to_same_external_rejection() {
    let app = gate_app!();

    // Minted eight days ago: signature checks out, expiry does not. The
    // response must be indistinguishable from any other verification failure.
    let stale = SystemTime::now() - Duration::from_secs(8 * 24 * 60 * 60);
    let token = mint_access_token(42, "alice", stale, &security()).unwrap();

    let req = test::TestRequest::get()
        .uri("/api/user/whoami")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "UNAUTHORIZED_INVALID_CREDENTIAL");
}

#[actix_web::test]
async fn test_valid_token_reaches_handler_with_identity() {
    let app = gate_app!();

    let token = mint_access_token(42, "alice", SystemTime::now(), &security()).unwrap();

    let req = test::TestRequest::get()
        .uri("/api/user/whoami")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user_id"], 42);
    assert_eq!(body["username"], "alice");
}

#[actix_web::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let app = gate_app!();

    let other = SecurityConfig::new("some_other_secret".as_bytes());
    let token = mint_access_token(42, "alice", SystemTime::now(), &other).unwrap();

    let req = test::TestRequest::get()
        .uri("/api/user/whoami")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
