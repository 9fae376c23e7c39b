//! Outer assembler turning ignore patterns and [`HttpSecurity`] builders into
//! a [`FilterChainProxy`].
//!
//! # Spring Security Equivalent
//! `WebSecurity` / `WebSecurity.IgnoredRequestConfigurer`

use crate::http::error::ConfigError;
use crate::http::security::config::builder::{ConfiguredBuilder, ConfiguredSecurityBuilder};
use crate::http::security::config::http::HttpSecurity;
use crate::http::security::filter_chain::{FilterChainProxy, SecurityFilterChain};
use crate::http::security::request_matcher::RequestMatcher;

/// Requests that bypass security entirely (static assets, health checks).
#[derive(Debug, Default)]
pub struct IgnoredRequestRegistry {
    matchers: Vec<RequestMatcher>,
}

impl IgnoredRequestRegistry {
    pub fn ant_matchers(&mut self, patterns: &[&str]) -> &mut Self {
        self.matchers
            .extend(patterns.iter().map(|p| RequestMatcher::ant(p)));
        self
    }

    pub fn regex_matchers(&mut self, patterns: &[&str]) -> Result<&mut Self, ConfigError> {
        for pattern in patterns {
            self.matchers.push(RequestMatcher::regex(pattern)?);
        }
        Ok(self)
    }

    pub fn matchers(&self) -> &[RequestMatcher] {
        &self.matchers
    }
}

#[derive(Default)]
pub struct WebSecurity {
    state: ConfiguredBuilder<WebSecurity, FilterChainProxy>,
    ignored_requests: IgnoredRequestRegistry,
    filter_chain_builders: Vec<HttpSecurity>,
}

impl WebSecurity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ignoring(&mut self) -> &mut IgnoredRequestRegistry {
        &mut self.ignored_requests
    }

    /// Adds a chain. Chains are consulted in the order they were added.
    pub fn add_security_filter_chain_builder(
        &mut self,
        http: HttpSecurity,
    ) -> Result<&mut Self, ConfigError> {
        self.state.ensure_not_built(Self::builder_name())?;
        self.filter_chain_builders.push(http);
        Ok(self)
    }
}

impl ConfiguredSecurityBuilder for WebSecurity {
    type Output = FilterChainProxy;

    fn builder_state(&self) -> &ConfiguredBuilder<Self, Self::Output> {
        &self.state
    }

    fn builder_state_mut(&mut self) -> &mut ConfiguredBuilder<Self, Self::Output> {
        &mut self.state
    }

    fn perform_build(&mut self) -> Result<Self::Output, ConfigError> {
        if self.filter_chain_builders.is_empty() {
            return Err(ConfigError::NoFilterChain);
        }

        let mut chains: Vec<SecurityFilterChain> = self
            .ignored_requests
            .matchers
            .iter()
            .cloned()
            .map(SecurityFilterChain::ignored)
            .collect();
        for http in self.filter_chain_builders.iter_mut() {
            chains.push(SecurityFilterChain::clone(&*http.build()?));
        }

        for chain in &chains {
            log::debug!("Will secure with {:?}", chain);
        }
        Ok(FilterChainProxy::new(chains))
    }
}
