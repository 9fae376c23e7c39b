//! # Actix Security Config
//!
//! Builder-style security configuration for Actix Web.
//!
//! Applications describe authentication and URL authorization through a
//! [`WebSecurityConfigurer`](http::security::config::WebSecurityConfigurer);
//! the configuration layer turns those declarations into an
//! [`AuthenticationManager`](http::security::AuthenticationManager) and a
//! [`FilterChainProxy`](http::security::FilterChainProxy) that is mounted with
//! [`SecurityTransform`](http::security::middleware::SecurityTransform).
//!
//! ```ignore
//! use actix_security_config::http::security::config::{
//!     AuthenticationBuilder, AuthenticationSource, ConfiguredSecurityBuilder,
//!     ExpressionUrlAuthorizations, WebSecurity, WebSecurityConfigurer,
//!     WebSecurityConfigurerAdapter,
//! };
//!
//! struct AppSecurity;
//!
//! impl WebSecurityConfigurer for AppSecurity {
//!     fn register_authentication(
//!         &self,
//!         registry: &mut AuthenticationBuilder,
//!     ) -> Result<AuthenticationSource, ConfigError> {
//!         registry
//!             .in_memory_authentication()?
//!             .with_user(User::new("admin".into(), "admin".into()).roles(&["ADMIN".into()]));
//!         Ok(AuthenticationSource::Registry)
//!     }
//!
//!     fn authorize_urls(&self, urls: &mut ExpressionUrlAuthorizations) -> Result<(), ConfigError> {
//!         urls.ant_matchers(&["/admin/**"]).has_role("ADMIN");
//!         urls.any_request().authenticated();
//!         Ok(())
//!     }
//! }
//!
//! let mut web = WebSecurity::new();
//! web.apply(WebSecurityConfigurerAdapter::new(AppSecurity))?;
//! let proxy = web.build()?;
//! App::new().wrap(SecurityTransform::new(proxy));
//! ```

pub mod http;
