//! Common test utilities and configuration.
//!
//! This module provides shared test infrastructure including:
//! - Test security configurers and the filter chains they build
//! - Test app builder
//! - Helper functions

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{get, test, App, HttpResponse, Responder};
use base64::prelude::*;

use actix_security_config::http::error::ConfigError;
use actix_security_config::http::security::config::{
    AuthenticationBuilder, AuthenticationSource, BeanRegistry, ConfiguredSecurityBuilder,
    ExpressionUrlAuthorizations, HttpSecurity, IgnoredRequestRegistry, WebSecurity,
    WebSecurityConfigurer, WebSecurityConfigurerAdapter,
};
use actix_security_config::http::security::{
    Argon2PasswordEncoder, AuthenticatedUser, AuthenticationManager, FilterChainProxy,
    OptionalUser, PasswordEncoder, ProviderManager, RequestMatcher, SecurityTransform, User,
};

// =============================================================================
// Test Configuration
// =============================================================================

pub const TEST_REALM: &str = "Test Realm";
pub const TEST_CSP: &str = "default-src 'self'";

/// Main application security.
///
/// Users:
/// - admin/admin: ADMIN, USER roles + users:read, users:write authorities
/// - user/user: USER role + users:read authority
/// - guest/guest: GUEST role, no authorities
/// - disabled/disabled: USER role, account disabled
pub struct TestSecurity;

impl WebSecurityConfigurer for TestSecurity {
    fn register_authentication(
        &self,
        auth: &mut AuthenticationBuilder,
    ) -> Result<AuthenticationSource, ConfigError> {
        let encoder = Argon2PasswordEncoder::new();
        auth.in_memory_authentication()?
            .password_encoder(encoder.clone())
            .with_user(
                User::with_encoded_password("admin", encoder.encode("admin"))
                    .roles(&["ADMIN".into(), "USER".into()])
                    .authorities(&["users:read".into(), "users:write".into()]),
            )
            .with_user(
                User::with_encoded_password("user", encoder.encode("user"))
                    .roles(&["USER".into()])
                    .authorities(&["users:read".into()]),
            )
            .with_user(
                User::with_encoded_password("guest", encoder.encode("guest"))
                    .roles(&["GUEST".into()]),
            )
            .with_user(
                User::with_encoded_password("disabled", encoder.encode("disabled"))
                    .roles(&["USER".into()])
                    .enabled(false),
            );
        Ok(AuthenticationSource::Registry)
    }

    fn authorize_urls(&self, urls: &mut ExpressionUrlAuthorizations) -> Result<(), ConfigError> {
        urls.ant_matchers(&["/profile"])
            .permit_all()
            .ant_matchers(&["/admin/**"])
            .has_role("ADMIN")
            .ant_matchers(&["/user/**"])
            .has_any_role(&["ADMIN", "USER"])
            .ant_matchers(&["/api/**"])
            .has_authority("users:read")
            .ant_matchers(&["/closed/**"])
            .deny_all()
            .any_request()
            .authenticated();
        Ok(())
    }

    fn configure(&self, http: &mut HttpSecurity) -> Result<(), ConfigError> {
        http.http_basic()?.realm(TEST_REALM);
        http.headers()?.content_security_policy(TEST_CSP);
        Ok(())
    }

    fn ignored_requests(&self, ignoring: &mut IgnoredRequestRegistry) -> Result<(), ConfigError> {
        ignoring.ant_matchers(&["/static/**"]);
        Ok(())
    }
}

/// Secures `/ops/**` without HTTP Basic, so unauthenticated requests are
/// redirected to the chain's login page. Its manager comes from the bean
/// registry.
pub struct OpsSecurity;

impl WebSecurityConfigurer for OpsSecurity {
    fn authorize_urls(&self, urls: &mut ExpressionUrlAuthorizations) -> Result<(), ConfigError> {
        urls.ant_matchers(&["/ops/health"])
            .permit_all()
            .any_request()
            .authenticated();
        Ok(())
    }

    fn configure(&self, http: &mut HttpSecurity) -> Result<(), ConfigError> {
        http.request_matcher(RequestMatcher::ant("/ops/**"));
        http.exception_handling()?.login_page("/ops/login");
        Ok(())
    }
}

/// A manager with no providers: every attempt fails.
pub fn empty_manager() -> Arc<dyn AuthenticationManager> {
    Arc::new(ProviderManager::new(Vec::new(), None))
}

/// Registry holding the manager [`OpsSecurity`] falls back to.
pub fn ops_beans() -> Arc<BeanRegistry> {
    let beans = Arc::new(BeanRegistry::new());
    beans.register("opsManager", empty_manager());
    beans
}

/// The `/ops/**` chain followed by the main application chain.
pub fn test_proxy() -> Arc<FilterChainProxy> {
    let mut web = WebSecurity::new();
    web.apply(WebSecurityConfigurerAdapter::new(OpsSecurity).with_bean_registry(ops_beans()))
        .expect("ops security");
    web.apply(WebSecurityConfigurerAdapter::new(TestSecurity))
        .expect("application security");
    web.build().expect("filter chains")
}

/// Builds the filter chains of a single configurer.
pub fn proxy_for<C: WebSecurityConfigurer>(
    adapter: WebSecurityConfigurerAdapter<C>,
) -> Result<Arc<FilterChainProxy>, ConfigError> {
    let mut web = WebSecurity::new();
    web.apply(adapter)?;
    web.build()
}

/// Helper function to create Basic Auth header value.
pub fn basic_auth(username: &str, password: &str) -> String {
    let credentials = format!("{}:{}", username, password);
    format!("Basic {}", BASE64_STANDARD.encode(credentials))
}

// =============================================================================
// Test Handlers
// =============================================================================

#[get("/")]
pub async fn index(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().body(format!("Welcome, {}!", user.get_username()))
}

#[get("/login")]
pub async fn login() -> impl Responder {
    HttpResponse::Ok().body("Login page")
}

#[get("/profile")]
pub async fn profile(user: OptionalUser) -> impl Responder {
    match user.into_inner() {
        Some(u) => HttpResponse::Ok().body(format!("Profile: {}", u.get_username())),
        None => HttpResponse::Ok().body("Guest profile"),
    }
}

#[get("/admin/dashboard")]
pub async fn admin_dashboard(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().body(format!("Admin: {}", user.get_username()))
}

#[get("/user/settings")]
pub async fn user_settings(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().body(format!("User: {}", user.get_username()))
}

#[get("/api/users")]
pub async fn api_users(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().body(format!("API User: {}", user.get_username()))
}

#[get("/closed/archive")]
pub async fn closed_archive() -> impl Responder {
    HttpResponse::Ok().body("Archive")
}

#[get("/static/app.css")]
pub async fn static_asset(user: OptionalUser) -> impl Responder {
    HttpResponse::Ok().body(format!("asset, authenticated: {}", user.is_authenticated()))
}

#[get("/ops/health")]
pub async fn ops_health() -> impl Responder {
    HttpResponse::Ok().body("UP")
}

#[get("/ops/login")]
pub async fn ops_login() -> impl Responder {
    HttpResponse::Ok().body("Ops login page")
}

#[get("/ops/metrics")]
pub async fn ops_metrics(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().body(format!("Metrics for {}", user.get_username()))
}

// =============================================================================
// Test App Builder
// =============================================================================

/// Serves every test handler behind `proxy`.
pub async fn create_app(
    proxy: Arc<FilterChainProxy>,
) -> impl Service<
    actix_http::Request,
    Response = ServiceResponse<EitherBody<BoxBody>>,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .wrap(SecurityTransform::new(proxy))
            .service(index)
            .service(login)
            .service(profile)
            .service(admin_dashboard)
            .service(user_settings)
            .service(api_users)
            .service(closed_archive)
            .service(static_asset)
            .service(ops_health)
            .service(ops_login)
            .service(ops_metrics),
    )
    .await
}

pub async fn create_test_app() -> impl Service<
    actix_http::Request,
    Response = ServiceResponse<EitherBody<BoxBody>>,
    Error = actix_web::Error,
> {
    create_app(test_proxy()).await
}
