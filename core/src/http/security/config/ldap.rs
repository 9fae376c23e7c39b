//! Configurer adding an [`LdapAuthenticationProvider`] to an [`AuthenticationBuilder`].
//!
//! # Spring Security Equivalent
//! `LdapAuthenticationProviderConfigurer`

use std::sync::Arc;

use crate::http::error::ConfigError;
use crate::http::security::config::authentication::AuthenticationBuilder;
use crate::http::security::config::builder::SecurityConfigurer;
use crate::http::security::ldap::{
    LdapAuthenticationProvider, LdapConfig, LdapContextMapper, LdapOperations,
};

pub struct LdapAuthenticationProviderConfigurer {
    context_source: Arc<dyn LdapOperations>,
    config: LdapConfig,
    context_mapper: Option<Arc<dyn LdapContextMapper>>,
}

impl LdapAuthenticationProviderConfigurer {
    pub fn new(context_source: Arc<dyn LdapOperations>) -> Self {
        LdapAuthenticationProviderConfigurer {
            context_source,
            config: LdapConfig::default(),
            context_mapper: None,
        }
    }

    /// Replaces every setting, e.g. with an [`LdapConfig`] read from a config file.
    pub fn config(&mut self, config: LdapConfig) -> &mut Self {
        self.config = config;
        self
    }

    pub fn base_dn(&mut self, base_dn: &str) -> &mut Self {
        self.config.base_dn = base_dn.to_string();
        self
    }

    pub fn user_dn_pattern(&mut self, pattern: &str) -> &mut Self {
        self.config.user_dn_pattern = Some(pattern.to_string());
        self
    }

    pub fn user_search_base(&mut self, base: &str) -> &mut Self {
        self.config.user_search_base = base.to_string();
        self
    }

    pub fn user_search_filter(&mut self, filter: &str) -> &mut Self {
        self.config.user_search_filter = filter.to_string();
        self
    }

    pub fn group_search_base(&mut self, base: &str) -> &mut Self {
        self.config.group_search_base = base.to_string();
        self
    }

    pub fn group_search_filter(&mut self, filter: &str) -> &mut Self {
        self.config.group_search_filter = filter.to_string();
        self
    }

    pub fn group_role_attribute(&mut self, attribute: &str) -> &mut Self {
        self.config.group_role_attribute = attribute.to_string();
        self
    }

    pub fn role_prefix(&mut self, prefix: &str) -> &mut Self {
        self.config.role_prefix = prefix.to_string();
        self
    }

    pub fn convert_to_uppercase(&mut self, convert: bool) -> &mut Self {
        self.config.convert_to_uppercase = convert;
        self
    }

    /// Service account bound before the user search.
    pub fn manager_dn(&mut self, dn: &str, password: &str) -> &mut Self {
        self.config.manager_dn = Some(dn.to_string());
        self.config.manager_password = Some(password.to_string());
        self
    }

    pub fn context_mapper(&mut self, mapper: Arc<dyn LdapContextMapper>) -> &mut Self {
        self.context_mapper = Some(mapper);
        self
    }
}

impl SecurityConfigurer<AuthenticationBuilder> for LdapAuthenticationProviderConfigurer {
    fn configure(&mut self, builder: &mut AuthenticationBuilder) -> Result<(), ConfigError> {
        let provider =
            LdapAuthenticationProvider::new(Arc::clone(&self.context_source), self.config.clone());
        let provider = match &self.context_mapper {
            Some(mapper) => provider.context_mapper(Arc::clone(mapper)),
            None => provider,
        };
        builder.add_provider(Arc::new(provider))?;
        Ok(())
    }
}
