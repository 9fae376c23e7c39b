//! Security header tests.
//!
//! Headers are written on every response of a secured chain, rejections
//! included.

mod common;

use actix_web::http::StatusCode;
use actix_web::test;

use common::{basic_auth, create_app, create_test_app, empty_manager, proxy_for, TEST_CSP};

use actix_security_config::http::error::ConfigError;
use actix_security_config::http::security::config::{
    ExpressionUrlAuthorizations, HttpSecurity, WebSecurityConfigurer, WebSecurityConfigurerAdapter,
};

#[actix_web::test]
async fn test_default_headers_on_success() {
    let app = create_test_app().await;

    let req = test::TestRequest::get()
        .uri("/")
        .insert_header(("Authorization", basic_auth("user", "user")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let headers = resp.headers();
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert_eq!(headers.get("x-xss-protection").unwrap(), "0");
    assert_eq!(headers.get("content-security-policy").unwrap(), TEST_CSP);
}

#[actix_web::test]
async fn test_headers_on_rejections() {
    let app = create_test_app().await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(resp.headers().get("x-frame-options").unwrap(), "DENY");

    let req = test::TestRequest::get()
        .uri("/closed/archive")
        .insert_header(("Authorization", basic_auth("admin", "admin")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(resp.headers().get("x-content-type-options").unwrap(), "nosniff");
}

struct NoHeaders;

impl WebSecurityConfigurer for NoHeaders {
    fn authorize_urls(&self, urls: &mut ExpressionUrlAuthorizations) -> Result<(), ConfigError> {
        urls.any_request().permit_all();
        Ok(())
    }

    fn configure(&self, http: &mut HttpSecurity) -> Result<(), ConfigError> {
        http.headers()?.disable();
        Ok(())
    }
}

#[actix_web::test]
async fn test_disabled_headers() {
    let adapter = WebSecurityConfigurerAdapter::new(NoHeaders).with_authentication_manager(empty_manager());
    let app = create_app(proxy_for(adapter).unwrap()).await;

    let req = test::TestRequest::get().uri("/login").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(!resp.headers().contains_key("x-frame-options"));
    assert!(!resp.headers().contains_key("x-content-type-options"));
}
