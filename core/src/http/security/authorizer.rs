//! URL authorization rules.
//!
//! # Spring Security Equivalent
//! `FilterSecurityInterceptor` with an ordered `RequestMatcher` → attribute map

use crate::http::security::request_matcher::RequestMatcher;
use crate::http::security::User;

/// Access requirement attached to a URL rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    PermitAll,
    DenyAll,
    Authenticated,
    Anonymous,
    /// Any of the roles.
    Roles(Vec<String>),
    /// Any of the authorities.
    Authorities(Vec<String>),
}

impl Access {
    /// Evaluates the requirement against the (possibly absent) current user.
    pub fn is_granted(&self, user: Option<&User>) -> bool {
        match (self, user) {
            (Access::PermitAll, _) => true,
            (Access::DenyAll, _) => false,
            (Access::Anonymous, user) => user.is_none(),
            (_, None) => false,
            (Access::Authenticated, Some(_)) => true,
            (Access::Roles(roles), Some(u)) => roles.iter().any(|r| u.has_role(r)),
            (Access::Authorities(authorities), Some(u)) => {
                authorities.iter().any(|a| u.has_authority(a))
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct UrlRule {
    pub(crate) matcher: RequestMatcher,
    pub(crate) access: Access,
}

impl UrlRule {
    pub fn new(matcher: RequestMatcher, access: Access) -> Self {
        UrlRule { matcher, access }
    }

    pub fn access(&self) -> &Access {
        &self.access
    }
}

/// Outcome of authorizing a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Granted,
    /// Access needs a user and there is none: start authentication.
    Unauthenticated,
    Forbidden,
}

/// Ordered rule list; the first rule whose matcher hits decides.
///
/// Paths no rule covers are let through.
#[derive(Debug, Clone, Default)]
pub struct RequestMatcherAuthorizer {
    rules: Vec<UrlRule>,
}

impl RequestMatcherAuthorizer {
    pub fn new(rules: Vec<UrlRule>) -> Self {
        RequestMatcherAuthorizer { rules }
    }

    pub fn rules(&self) -> &[UrlRule] {
        &self.rules
    }

    pub fn decide(&self, path: &str, user: Option<&User>) -> Decision {
        let Some(rule) = self.rules.iter().find(|rule| rule.matcher.matches(path)) else {
            return Decision::Granted;
        };

        if rule.access.is_granted(user) {
            Decision::Granted
        } else if user.is_none() {
            Decision::Unauthenticated
        } else {
            Decision::Forbidden
        }
    }
}
