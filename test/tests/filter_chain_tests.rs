//! Filter chain selection tests.
//!
//! Ignored requests bypass security entirely. Among secured chains the first
//! whose matcher accepts the request handles it.

mod common;

use actix_web::http::header::{LOCATION, WWW_AUTHENTICATE};
use actix_web::http::StatusCode;
use actix_web::test;

use common::{basic_auth, create_test_app, test_proxy};

#[actix_web::test]
async fn test_chains_are_ordered_ignored_first() {
    let proxy = test_proxy();
    let chains = proxy.chains();

    assert_eq!(chains.len(), 3);
    assert!(chains[0].is_ignored());
    assert!(!chains[1].is_ignored());
    assert!(chains[1].matches("/ops/metrics"));
    assert!(!chains[1].matches("/admin/dashboard"));
    assert!(chains[2].matches("/admin/dashboard"));
}

#[actix_web::test]
async fn test_ignored_request_bypasses_security() {
    let app = create_test_app().await;

    let req = test::TestRequest::get()
        .uri("/static/app.css")
        .insert_header(("Authorization", basic_auth("admin", "admin")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(!resp.headers().contains_key("x-frame-options"));
    let body = test::read_body(resp).await;
    assert_eq!(String::from_utf8_lossy(&body), "asset, authenticated: false");
}

#[actix_web::test]
async fn test_chain_without_basic_redirects_to_login_page() {
    let app = create_test_app().await;

    // Basic credentials mean nothing to a chain without `http_basic()`.
    let req = test::TestRequest::get()
        .uri("/ops/metrics")
        .insert_header(("Authorization", basic_auth("admin", "admin")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers().get(LOCATION).unwrap(), "/ops/login");
    assert!(!resp.headers().contains_key(WWW_AUTHENTICATE));
}

#[actix_web::test]
async fn test_chain_specific_rules_and_login_page() {
    let app = create_test_app().await;

    let req = test::TestRequest::get().uri("/ops/health").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/ops/login").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_other_requests_use_main_chain() {
    let app = create_test_app().await;

    let req = test::TestRequest::get().uri("/admin/dashboard").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().contains_key(WWW_AUTHENTICATE));
}
