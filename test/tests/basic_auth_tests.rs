//! HTTP Basic Authentication tests.
//!
//! Tests for the Basic credentials check and the entry point of a chain
//! configured with `http_basic()`.

mod common;

use actix_web::http::header::WWW_AUTHENTICATE;
use actix_web::http::StatusCode;
use actix_web::test;

use common::{basic_auth, create_test_app, TEST_REALM};

#[actix_web::test]
async fn test_basic_auth_success() {
    let app = create_test_app().await;

    let req = test::TestRequest::get()
        .uri("/")
        .insert_header(("Authorization", basic_auth("admin", "admin")))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    assert!(String::from_utf8_lossy(&body).contains("Welcome, admin!"));
}

#[actix_web::test]
async fn test_basic_auth_wrong_password() {
    let app = create_test_app().await;

    let req = test::TestRequest::get()
        .uri("/")
        .insert_header(("Authorization", basic_auth("admin", "wrongpassword")))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_basic_auth_unknown_user() {
    let app = create_test_app().await;

    let req = test::TestRequest::get()
        .uri("/")
        .insert_header(("Authorization", basic_auth("unknown", "password")))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_basic_auth_disabled_account() {
    let app = create_test_app().await;

    let req = test::TestRequest::get()
        .uri("/")
        .insert_header(("Authorization", basic_auth("disabled", "disabled")))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_no_auth_returns_401_with_challenge() {
    let app = create_test_app().await;

    let req = test::TestRequest::get().uri("/").to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let challenge = resp.headers().get(WWW_AUTHENTICATE).unwrap().to_str().unwrap();
    assert_eq!(challenge, format!("Basic realm=\"{}\"", TEST_REALM));
}

#[actix_web::test]
async fn test_malformed_header_is_treated_as_anonymous() {
    let app = create_test_app().await;

    let req = test::TestRequest::get()
        .uri("/")
        .insert_header(("Authorization", "Basic not-base64!"))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().contains_key(WWW_AUTHENTICATE));
}

#[actix_web::test]
async fn test_failed_credentials_rejected_on_open_route() {
    let app = create_test_app().await;

    // Rejected credentials never fall back to anonymous access.
    let req = test::TestRequest::get()
        .uri("/profile")
        .insert_header(("Authorization", basic_auth("user", "nope")))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
