//! Built filter chains, as served by [`SecurityTransform`].
//!
//! # Spring Security Equivalent
//! `DefaultSecurityFilterChain` / `FilterChainProxy`
//!
//! [`SecurityTransform`]: crate::http::security::middleware::SecurityTransform

use std::fmt;
use std::sync::Arc;

use crate::http::security::authorizer::RequestMatcherAuthorizer;
use crate::http::security::headers::SecurityHeaders;
use crate::http::security::http_basic::HttpBasicConfig;
use crate::http::security::manager::AuthenticationManager;
use crate::http::security::request_matcher::RequestMatcher;

/// Everything a secured chain applies to the requests it matches.
#[derive(Clone)]
pub struct ChainFilters {
    pub(crate) authentication_manager: Arc<dyn AuthenticationManager>,
    pub(crate) authorizer: RequestMatcherAuthorizer,
    pub(crate) http_basic: Option<HttpBasicConfig>,
    pub(crate) login_page: String,
    pub(crate) headers: Option<SecurityHeaders>,
}

impl ChainFilters {
    pub fn authentication_manager(&self) -> &Arc<dyn AuthenticationManager> {
        &self.authentication_manager
    }

    pub fn authorizer(&self) -> &RequestMatcherAuthorizer {
        &self.authorizer
    }

    /// `None` when HTTP Basic is not enabled on this chain.
    pub fn http_basic(&self) -> Option<&HttpBasicConfig> {
        self.http_basic.as_ref()
    }

    pub fn login_page(&self) -> &str {
        &self.login_page
    }

    /// `None` when security headers were disabled.
    pub fn headers(&self) -> Option<&SecurityHeaders> {
        self.headers.as_ref()
    }
}

/// A request matcher plus the filters applied to matching requests.
///
/// Ignored chains carry no filters: their requests pass through untouched.
#[derive(Clone)]
pub struct SecurityFilterChain {
    matcher: RequestMatcher,
    filters: Option<ChainFilters>,
}

impl SecurityFilterChain {
    pub fn ignored(matcher: RequestMatcher) -> Self {
        SecurityFilterChain {
            matcher,
            filters: None,
        }
    }

    pub fn secured(matcher: RequestMatcher, filters: ChainFilters) -> Self {
        SecurityFilterChain {
            matcher,
            filters: Some(filters),
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        self.matcher.matches(path)
    }

    pub fn matcher(&self) -> &RequestMatcher {
        &self.matcher
    }

    pub fn is_ignored(&self) -> bool {
        self.filters.is_none()
    }

    pub fn filters(&self) -> Option<&ChainFilters> {
        self.filters.as_ref()
    }
}

impl fmt::Debug for SecurityFilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.filters {
            None => write!(f, "Ignored chain {:?}", self.matcher),
            Some(filters) => f
                .debug_struct("SecurityFilterChain")
                .field("matcher", &self.matcher)
                .field("rules", &filters.authorizer.rules().len())
                .field("http_basic", &filters.http_basic.is_some())
                .field("login_page", &filters.login_page)
                .finish(),
        }
    }
}

/// Ordered chains; the first chain whose matcher accepts a path handles it.
#[derive(Debug, Clone, Default)]
pub struct FilterChainProxy {
    chains: Vec<SecurityFilterChain>,
}

impl FilterChainProxy {
    pub fn new(chains: Vec<SecurityFilterChain>) -> Self {
        FilterChainProxy { chains }
    }

    pub fn chains(&self) -> &[SecurityFilterChain] {
        &self.chains
    }

    pub fn chain_for(&self, path: &str) -> Option<&SecurityFilterChain> {
        self.chains.iter().find(|chain| chain.matches(path))
    }
}
