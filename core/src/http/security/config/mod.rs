//! Builder-based security configuration.
//!
//! Builders ([`AuthenticationBuilder`], [`HttpSecurity`], [`WebSecurity`]) are
//! configured through [`SecurityConfigurer`]s and built exactly once. The
//! [`WebSecurityConfigurerAdapter`] drives them from an application's
//! [`WebSecurityConfigurer`] hooks.

pub mod adapter;
pub mod authentication;
pub mod builder;
pub mod context;
pub mod http;
pub mod ldap;
pub mod provisioning;
pub mod web;

pub use adapter::{AdapterState, AuthenticationSource, WebSecurityConfigurer, WebSecurityConfigurerAdapter};
pub use authentication::AuthenticationBuilder;
pub use builder::{BuildState, ConfiguredBuilder, ConfiguredSecurityBuilder, SecurityConfigurer};
pub use context::{bean_ids, unique_bean_excluding, BeanRegistry};
pub use http::{
    AuthorizedUrl, ExceptionHandlingConfigurer, ExpressionUrlAuthorizations, HeadersConfigurer,
    HttpBasicConfigurer, HttpSecurity,
};
pub use ldap::LdapAuthenticationProviderConfigurer;
pub use provisioning::{
    DaoAuthenticationConfigurer, InMemoryUserDetailsManagerConfigurer,
    JdbcUserDetailsManagerConfigurer,
};
pub use web::{IgnoredRequestRegistry, WebSecurity};
