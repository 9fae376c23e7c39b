//! Security module: configuration builders and the runtime they produce.
//!
//! # Spring Equivalent
//! `org.springframework.security.config` and `org.springframework.security.web`
//!
//! # Module Structure
//!
//! - `config` - Builders, configurers and the web security adapter
//! - `manager` - Authentication managers (ProviderManager)
//! - `provider` - Authentication providers (DaoAuthenticationProvider)
//! - `user_details` - Lookup services (InMemoryUserDetailsService)
//! - `jdbc` - Lookup service over a relational `DataSource`
//! - `ldap` - LDAP bind authentication over an `LdapOperations` handle
//! - `crypto` - Password encoding (Argon2, NoOp, Delegating)
//! - `request_matcher` - Ant-style and regex request matching
//! - `authorizer` - URL rules and access decisions
//! - `filter_chain` - Built chains and the FilterChainProxy
//! - `middleware` - Security middleware (SecurityTransform)
//! - `extractor` - Actix Web extractors (AuthenticatedUser, OptionalUser)
//! - `headers` - Security response headers
//! - `http_basic` - HTTP Basic credential extraction
//! - `user` - User model

pub use authorizer::{Access, Decision, RequestMatcherAuthorizer, UrlRule};
pub use crypto::{Argon2PasswordEncoder, DelegatingPasswordEncoder, NoOpPasswordEncoder, PasswordEncoder};
pub use extractor::{AuthenticatedUser, OptionalUser, SecurityExt};
pub use filter_chain::{ChainFilters, FilterChainProxy, SecurityFilterChain};
pub use headers::SecurityHeaders;
pub use http_basic::HttpBasicConfig;
pub use jdbc::{DataSource, JdbcQueries, JdbcUserDetailsService};
pub use ldap::{
    LdapAuthenticationProvider, LdapConfig, LdapContextMapper, LdapEntry, LdapError, LdapOperations,
};
pub use manager::{AuthenticationManager, ProviderManager};
pub use middleware::SecurityTransform;
pub use provider::{AuthenticationProvider, Credentials, DaoAuthenticationProvider};
pub use request_matcher::RequestMatcher;
pub use user::User;
pub use user_details::{InMemoryUserDetailsService, UserDetailsError, UserDetailsService};

mod extractor;
mod user;

pub mod authorizer;
pub mod config;
pub mod crypto;
pub mod filter_chain;
pub mod headers;
pub mod http_basic;
pub mod jdbc;
pub mod ldap;
pub mod manager;
pub mod middleware;
pub mod provider;
pub mod request_matcher;
pub mod user_details;
