//! Actix Security Config Demo Application
//!
//! Describes the application's security through a `WebSecurityConfigurer`
//! and serves it behind the resulting filter chains.

mod handlers;

use std::sync::Arc;

use actix_web::{App, HttpServer};

use actix_security_config::http::error::ConfigError;
use actix_security_config::http::security::config::{
    AuthenticationBuilder, AuthenticationSource, ConfiguredSecurityBuilder,
    ExpressionUrlAuthorizations, HttpSecurity, IgnoredRequestRegistry, WebSecurity,
    WebSecurityConfigurer, WebSecurityConfigurerAdapter,
};
use actix_security_config::http::security::{
    Argon2PasswordEncoder, FilterChainProxy, PasswordEncoder, SecurityTransform, User,
};

/// # Spring Security Equivalent
/// ```java
/// @EnableWebSecurity
/// public class AppSecurity extends WebSecurityConfigurerAdapter { ... }
/// ```
struct AppSecurity;

impl WebSecurityConfigurer for AppSecurity {
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
            );
        Ok(AuthenticationSource::Registry)
    }

    fn authorize_urls(&self, urls: &mut ExpressionUrlAuthorizations) -> Result<(), ConfigError> {
        urls.ant_matchers(&["/profile", "/login"])
            .permit_all()
            .ant_matchers(&["/admin/**"])
            .has_role("ADMIN")
            .ant_matchers(&["/user/**"])
            .has_any_role(&["ADMIN", "USER"])
            .ant_matchers(&["/api/**"])
            .has_authority("users:read")
            .any_request()
            .authenticated();
        Ok(())
    }

    fn configure(&self, http: &mut HttpSecurity) -> Result<(), ConfigError> {
        http.http_basic()?.realm("Actix Security Demo");
        http.headers()?.hsts(31_536_000, true);
        Ok(())
    }

    fn ignored_requests(&self, ignoring: &mut IgnoredRequestRegistry) -> Result<(), ConfigError> {
        ignoring.ant_matchers(&["/static/**", "/favicon.ico"]);
        Ok(())
    }
}

fn security() -> Result<Arc<FilterChainProxy>, ConfigError> {
    let mut web = WebSecurity::new();
    web.apply(WebSecurityConfigurerAdapter::new(AppSecurity))?;
    web.build()
}

fn print_startup_info() {
    println!("=== Actix Security Config Demo ===");
    println!();
    println!("Server: http://127.0.0.1:8080");
    println!();
    println!("Test Users (passwords are hashed with Argon2):");
    println!("  admin/admin - Roles: [ADMIN, USER], Authorities: [users:read, users:write]");
    println!("  user/user   - Roles: [USER],        Authorities: [users:read]");
    println!("  guest/guest - Roles: [GUEST],       Authorities: []");
    println!();
    println!("Routes:");
    println!("  GET  /login           - Login page (always reachable)");
    println!("  GET  /static/{{file}}   - Ignored by security");
    println!("  GET  /profile         - permit_all");
    println!("  GET  /                - authenticated");
    println!("  GET  /admin/dashboard - has_role(ADMIN)");
    println!("  GET  /user/settings   - has_any_role(ADMIN, USER)");
    println!("  GET  /api/users       - has_authority(users:read)");
    println!();
    println!("Examples (HTTP Basic Auth):");
    println!("  curl -u admin:admin http://127.0.0.1:8080/admin/dashboard");
    println!("  curl -u user:user http://127.0.0.1:8080/admin/dashboard   # 403 Forbidden");
    println!();
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let proxy = security()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
    log::info!("Security configured with {} filter chain(s)", proxy.chains().len());

    print_startup_info();

    HttpServer::new(move || {
        App::new()
            .wrap(SecurityTransform::new(proxy.clone()))
            .service(handlers::public::login)
            .service(handlers::public::post_login)
            .service(handlers::public::asset)
            .service(handlers::home::index)
            .service(handlers::home::profile)
            .service(handlers::admin::admin_dashboard)
            .service(handlers::admin::admin_users)
            .service(handlers::admin::user_settings)
            .service(handlers::api::api_users)
            .service(handlers::api::api_stats)
    })
    .bind("127.0.0.1:8080")?
    .run()
    .await
}
