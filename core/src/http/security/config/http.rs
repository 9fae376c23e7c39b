//! HTTP security configuration, built into a [`SecurityFilterChain`].
//!
//! # Spring Security Equivalent
//! `HttpSecurity` with `authorizeRequests()`, `httpBasic()`,
//! `exceptionHandling()` and `headers()`
//!
//! ```ignore
//! let mut http = HttpSecurity::new(manager);
//! http.apply_default_configurers()?;
//! http.authorize_urls()?
//!     .ant_matchers(&["/public/**"]).permit_all()
//!     .ant_matchers(&["/admin/**"]).has_role("ADMIN")
//!     .any_request().authenticated();
//! http.http_basic()?.realm("api");
//! let chain = http.build()?;
//! ```

use std::sync::Arc;

use crate::http::error::ConfigError;
use crate::http::security::authorizer::{Access, RequestMatcherAuthorizer, UrlRule};
use crate::http::security::config::builder::{
    ConfiguredBuilder, ConfiguredSecurityBuilder, SecurityConfigurer,
};
use crate::http::security::filter_chain::{ChainFilters, SecurityFilterChain};
use crate::http::security::headers::{FrameOptions, ReferrerPolicy, SecurityHeaders};
use crate::http::security::http_basic::HttpBasicConfig;
use crate::http::security::manager::AuthenticationManager;
use crate::http::security::request_matcher::RequestMatcher;

pub const DEFAULT_LOGIN_PAGE: &str = "/login";

pub struct HttpSecurity {
    state: ConfiguredBuilder<HttpSecurity, SecurityFilterChain>,
    authentication_manager: Arc<dyn AuthenticationManager>,
    request_matcher: RequestMatcher,
    rules: Vec<UrlRule>,
    http_basic: Option<HttpBasicConfig>,
    login_page: String,
    headers: Option<SecurityHeaders>,
}

impl HttpSecurity {
    pub fn new(authentication_manager: Arc<dyn AuthenticationManager>) -> Self {
        HttpSecurity {
            state: ConfiguredBuilder::new(),
            authentication_manager,
            request_matcher: RequestMatcher::Any,
            rules: Vec::new(),
            http_basic: None,
            login_page: DEFAULT_LOGIN_PAGE.to_string(),
            headers: None,
        }
    }

    pub fn authentication_manager(&self) -> &Arc<dyn AuthenticationManager> {
        &self.authentication_manager
    }

    /// Registers exception handling and security headers.
    pub fn apply_default_configurers(&mut self) -> Result<&mut Self, ConfigError> {
        self.exception_handling()?;
        self.headers()?;
        Ok(self)
    }

    /// Restricts this chain to the requests `matcher` accepts. Defaults to every request.
    pub fn request_matcher(&mut self, matcher: RequestMatcher) -> &mut Self {
        self.request_matcher = matcher;
        self
    }

    pub fn authorize_urls(&mut self) -> Result<&mut ExpressionUrlAuthorizations, ConfigError> {
        self.get_or_apply(ExpressionUrlAuthorizations::default())
    }

    pub fn http_basic(&mut self) -> Result<&mut HttpBasicConfigurer, ConfigError> {
        self.get_or_apply(HttpBasicConfigurer::default())
    }

    pub fn exception_handling(&mut self) -> Result<&mut ExceptionHandlingConfigurer, ConfigError> {
        self.get_or_apply(ExceptionHandlingConfigurer::default())
    }

    pub fn headers(&mut self) -> Result<&mut HeadersConfigurer, ConfigError> {
        self.get_or_apply(HeadersConfigurer::default())
    }
}

impl ConfiguredSecurityBuilder for HttpSecurity {
    type Output = SecurityFilterChain;

    fn builder_state(&self) -> &ConfiguredBuilder<Self, Self::Output> {
        &self.state
    }

    fn builder_state_mut(&mut self) -> &mut ConfiguredBuilder<Self, Self::Output> {
        &mut self.state
    }

    fn perform_build(&mut self) -> Result<Self::Output, ConfigError> {
        let filters = ChainFilters {
            authentication_manager: Arc::clone(&self.authentication_manager),
            authorizer: RequestMatcherAuthorizer::new(self.rules.clone()),
            http_basic: self.http_basic.clone(),
            login_page: self.login_page.clone(),
            headers: self.headers.clone(),
        };
        Ok(SecurityFilterChain::secured(self.request_matcher.clone(), filters))
    }
}

/// Ordered URL authorization rules.
#[derive(Debug, Default)]
pub struct ExpressionUrlAuthorizations {
    rules: Vec<UrlRule>,
}

impl ExpressionUrlAuthorizations {
    pub fn ant_matchers(&mut self, patterns: &[&str]) -> AuthorizedUrl<'_> {
        let matchers = patterns.iter().map(|p| RequestMatcher::ant(p)).collect();
        AuthorizedUrl {
            registry: self,
            matchers,
        }
    }

    pub fn regex_matchers(&mut self, patterns: &[&str]) -> Result<AuthorizedUrl<'_>, ConfigError> {
        let matchers = patterns
            .iter()
            .map(|p| RequestMatcher::regex(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(AuthorizedUrl {
            registry: self,
            matchers,
        })
    }

    pub fn any_request(&mut self) -> AuthorizedUrl<'_> {
        AuthorizedUrl {
            registry: self,
            matchers: vec![RequestMatcher::Any],
        }
    }

    pub fn rules(&self) -> &[UrlRule] {
        &self.rules
    }
}

impl SecurityConfigurer<HttpSecurity> for ExpressionUrlAuthorizations {
    fn configure(&mut self, builder: &mut HttpSecurity) -> Result<(), ConfigError> {
        let shadowed = self
            .rules
            .iter()
            .position(|rule| matches!(rule.matcher, RequestMatcher::Any))
            .map_or(0, |index| self.rules.len() - index - 1);
        if shadowed > 0 {
            log::warn!("{} URL rule(s) follow any_request() and will never match", shadowed);
        }
        builder.rules = self.rules.clone();
        Ok(())
    }
}

/// Matchers waiting for their access requirement.
pub struct AuthorizedUrl<'a> {
    registry: &'a mut ExpressionUrlAuthorizations,
    matchers: Vec<RequestMatcher>,
}

impl<'a> AuthorizedUrl<'a> {
    fn access(self, access: Access) -> &'a mut ExpressionUrlAuthorizations {
        let AuthorizedUrl { registry, matchers } = self;
        for matcher in matchers {
            registry.rules.push(UrlRule::new(matcher, access.clone()));
        }
        registry
    }

    pub fn permit_all(self) -> &'a mut ExpressionUrlAuthorizations {
        self.access(Access::PermitAll)
    }

    pub fn deny_all(self) -> &'a mut ExpressionUrlAuthorizations {
        self.access(Access::DenyAll)
    }

    pub fn authenticated(self) -> &'a mut ExpressionUrlAuthorizations {
        self.access(Access::Authenticated)
    }

    /// Only requests without an authenticated user.
    pub fn anonymous(self) -> &'a mut ExpressionUrlAuthorizations {
        self.access(Access::Anonymous)
    }

    pub fn has_role(self, role: &str) -> &'a mut ExpressionUrlAuthorizations {
        self.access(Access::Roles(vec![role.to_string()]))
    }

    pub fn has_any_role(self, roles: &[&str]) -> &'a mut ExpressionUrlAuthorizations {
        self.access(Access::Roles(roles.iter().map(|r| r.to_string()).collect()))
    }

    pub fn has_authority(self, authority: &str) -> &'a mut ExpressionUrlAuthorizations {
        self.access(Access::Authorities(vec![authority.to_string()]))
    }

    pub fn has_any_authority(self, authorities: &[&str]) -> &'a mut ExpressionUrlAuthorizations {
        self.access(Access::Authorities(
            authorities.iter().map(|a| a.to_string()).collect(),
        ))
    }
}

/// Enables HTTP Basic authentication and its `401` entry point.
#[derive(Debug, Default)]
pub struct HttpBasicConfigurer {
    config: HttpBasicConfig,
}

impl HttpBasicConfigurer {
    pub fn realm(&mut self, realm: &str) -> &mut Self {
        self.config = std::mem::take(&mut self.config).realm(realm);
        self
    }

    /// Replaces the settings, e.g. with values read from a config file.
    pub fn config(&mut self, config: HttpBasicConfig) -> &mut Self {
        self.config = config;
        self
    }
}

impl SecurityConfigurer<HttpSecurity> for HttpBasicConfigurer {
    fn configure(&mut self, builder: &mut HttpSecurity) -> Result<(), ConfigError> {
        builder.http_basic = Some(self.config.clone());
        Ok(())
    }
}

/// Where unauthenticated browser requests are sent when HTTP Basic is off.
#[derive(Debug)]
pub struct ExceptionHandlingConfigurer {
    login_page: String,
}

impl Default for ExceptionHandlingConfigurer {
    fn default() -> Self {
        ExceptionHandlingConfigurer {
            login_page: DEFAULT_LOGIN_PAGE.to_string(),
        }
    }
}

impl ExceptionHandlingConfigurer {
    pub fn login_page(&mut self, path: &str) -> &mut Self {
        self.login_page = path.to_string();
        self
    }
}

impl SecurityConfigurer<HttpSecurity> for ExceptionHandlingConfigurer {
    fn configure(&mut self, builder: &mut HttpSecurity) -> Result<(), ConfigError> {
        builder.login_page = self.login_page.clone();
        Ok(())
    }
}

/// Security response headers for granted requests.
#[derive(Debug)]
pub struct HeadersConfigurer {
    headers: SecurityHeaders,
    enabled: bool,
}

impl Default for HeadersConfigurer {
    fn default() -> Self {
        HeadersConfigurer {
            headers: SecurityHeaders::default(),
            enabled: true,
        }
    }
}

impl HeadersConfigurer {
    pub fn frame_options(&mut self, options: FrameOptions) -> &mut Self {
        self.headers.frame_options = options;
        self
    }

    pub fn content_security_policy(&mut self, policy: &str) -> &mut Self {
        self.headers.content_security_policy = Some(policy.to_string());
        self
    }

    pub fn hsts(&mut self, max_age: u64, include_subdomains: bool) -> &mut Self {
        self.headers.hsts_enabled = true;
        self.headers.hsts_max_age = max_age;
        self.headers.hsts_include_subdomains = include_subdomains;
        self
    }

    pub fn referrer_policy(&mut self, policy: ReferrerPolicy) -> &mut Self {
        self.headers.referrer_policy = policy;
        self
    }

    pub fn cache_control(&mut self, value: &str) -> &mut Self {
        self.headers.cache_control = Some(value.to_string());
        self
    }

    pub fn content_type_options(&mut self, enabled: bool) -> &mut Self {
        self.headers.content_type_options = enabled;
        self
    }

    pub fn config(&mut self, headers: SecurityHeaders) -> &mut Self {
        self.headers = headers;
        self
    }

    /// Writes no security headers at all.
    pub fn disable(&mut self) -> &mut Self {
        self.enabled = false;
        self
    }
}

impl SecurityConfigurer<HttpSecurity> for HeadersConfigurer {
    fn configure(&mut self, builder: &mut HttpSecurity) -> Result<(), ConfigError> {
        builder.headers = self.enabled.then(|| self.headers.clone());
        Ok(())
    }
}
