//! Registry of authentication providers, built into a [`ProviderManager`].
//!
//! # Spring Security Equivalent
//! `AuthenticationManagerBuilder`
//!
//! ```ignore
//! let mut auth = AuthenticationBuilder::new();
//! auth.in_memory_authentication()?
//!     .with_user(User::new("user".into(), "password".into()).roles(&["USER".into()]));
//! auth.add_provider(Arc::new(my_token_provider))?;
//! let manager = auth.build()?;
//! ```

use std::sync::Arc;

use crate::http::error::ConfigError;
use crate::http::security::config::builder::{ConfiguredBuilder, ConfiguredSecurityBuilder};
use crate::http::security::config::ldap::LdapAuthenticationProviderConfigurer;
use crate::http::security::config::provisioning::{
    DaoAuthenticationConfigurer, InMemoryUserDetailsManagerConfigurer,
    JdbcUserDetailsManagerConfigurer,
};
use crate::http::security::jdbc::DataSource;
use crate::http::security::ldap::LdapOperations;
use crate::http::security::manager::{AuthenticationManager, ProviderManager};
use crate::http::security::provider::{AuthenticationProvider, DaoAuthenticationProvider};
use crate::http::security::user_details::UserDetailsService;

#[derive(Default)]
pub struct AuthenticationBuilder {
    state: ConfiguredBuilder<AuthenticationBuilder, ProviderManager>,
    parent: Option<Arc<dyn AuthenticationManager>>,
    providers: Vec<Arc<dyn AuthenticationProvider>>,
    user_details_service: Option<(usize, Arc<dyn UserDetailsService>)>,
    service_slots: usize,
}

impl AuthenticationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Manager consulted when none of this builder's providers produce a user.
    pub fn parent_authentication_manager(
        &mut self,
        manager: Arc<dyn AuthenticationManager>,
    ) -> &mut Self {
        self.parent = Some(manager);
        self
    }

    pub fn in_memory_authentication(
        &mut self,
    ) -> Result<&mut InMemoryUserDetailsManagerConfigurer, ConfigError> {
        let slot = self.reserve_service_slot();
        self.apply(InMemoryUserDetailsManagerConfigurer::new().in_slot(slot))
    }

    pub fn ldap_authentication_provider(
        &mut self,
        context_source: Arc<dyn LdapOperations>,
    ) -> Result<&mut LdapAuthenticationProviderConfigurer, ConfigError> {
        self.apply(LdapAuthenticationProviderConfigurer::new(context_source))
    }

    pub fn jdbc_user_details_manager(
        &mut self,
        data_source: Arc<dyn DataSource>,
    ) -> Result<&mut JdbcUserDetailsManagerConfigurer, ConfigError> {
        let slot = self.reserve_service_slot();
        self.apply(JdbcUserDetailsManagerConfigurer::new(data_source).in_slot(slot))
    }

    /// Uses `service` as the lookup service right away and adds a DAO provider for it at build.
    pub fn user_details(
        &mut self,
        service: Arc<dyn UserDetailsService>,
    ) -> Result<&mut DaoAuthenticationConfigurer, ConfigError> {
        self.state.ensure_accepting(Self::builder_name())?;
        let slot = self.reserve_service_slot();
        self.record_user_details_service(slot, Arc::clone(&service));
        self.apply(DaoAuthenticationConfigurer::new(service))
    }

    /// Appends a provider. Providers are tried in the order they were added.
    pub fn add_provider(
        &mut self,
        provider: Arc<dyn AuthenticationProvider>,
    ) -> Result<&mut Self, ConfigError> {
        self.state.ensure_not_built(Self::builder_name())?;
        log::debug!("Adding authentication provider {}", provider.name());
        self.providers.push(provider);
        Ok(self)
    }

    /// Records `service` as the lookup service and adds a DAO provider for it.
    pub fn add_user_details_service(
        &mut self,
        service: Arc<dyn UserDetailsService>,
    ) -> Result<&mut Self, ConfigError> {
        self.state.ensure_not_built(Self::builder_name())?;
        let slot = self.reserve_service_slot();
        self.record_user_details_service(slot, Arc::clone(&service));
        self.add_provider(Arc::new(DaoAuthenticationProvider::new(service)))
    }

    /// The lookup service of the most recent call that supplied one.
    ///
    /// Services built by configurers are only known once the configurer has
    /// run, but they still rank by when the configurer was applied.
    pub fn user_details_service(&self) -> Option<&Arc<dyn UserDetailsService>> {
        self.user_details_service.as_ref().map(|(_, service)| service)
    }

    /// Position of a lookup service in call order.
    pub(crate) fn reserve_service_slot(&mut self) -> usize {
        self.service_slots += 1;
        self.service_slots
    }

    /// Records `service` unless a later slot already holds one.
    pub(crate) fn record_user_details_service(
        &mut self,
        slot: usize,
        service: Arc<dyn UserDetailsService>,
    ) {
        match &self.user_details_service {
            Some((current, _)) if *current > slot => {}
            _ => self.user_details_service = Some((slot, service)),
        }
    }

    /// Whether a provider or a parent has been supplied.
    pub fn is_configured(&self) -> bool {
        !self.providers.is_empty() || self.parent.is_some()
    }
}

impl ConfiguredSecurityBuilder for AuthenticationBuilder {
    type Output = ProviderManager;

    fn builder_state(&self) -> &ConfiguredBuilder<Self, Self::Output> {
        &self.state
    }

    fn builder_state_mut(&mut self) -> &mut ConfiguredBuilder<Self, Self::Output> {
        &mut self.state
    }

    fn perform_build(&mut self) -> Result<Self::Output, ConfigError> {
        if !self.is_configured() {
            log::debug!("No authentication providers configured, the manager rejects every request");
        }
        Ok(ProviderManager::new(self.providers.clone(), self.parent.clone()))
    }
}
