//! Application-facing security configuration.
//!
//! An application implements [`WebSecurityConfigurer`] and applies it to a
//! [`WebSecurity`] through a [`WebSecurityConfigurerAdapter`]:
//!
//! ```ignore
//! struct AppSecurity;
//!
//! impl WebSecurityConfigurer for AppSecurity {
//!     fn register_authentication(
//!         &self,
//!         auth: &mut AuthenticationBuilder,
//!     ) -> Result<AuthenticationSource, ConfigError> {
//!         auth.in_memory_authentication()?
//!             .with_user(User::new("admin".into(), "admin".into()).roles(&["ADMIN".into()]));
//!         Ok(AuthenticationSource::Registry)
//!     }
//!
//!     fn authorize_urls(&self, urls: &mut ExpressionUrlAuthorizations) -> Result<(), ConfigError> {
//!         urls.ant_matchers(&["/admin/**"]).has_role("ADMIN")
//!             .any_request().authenticated();
//!         Ok(())
//!     }
//! }
//!
//! let mut web = WebSecurity::new();
//! web.apply(WebSecurityConfigurerAdapter::new(AppSecurity))?;
//! let proxy = web.build()?;
//! ```
//!
//! # Spring Security Equivalent
//! `WebSecurityConfigurerAdapter`

use std::sync::Arc;

use crate::http::error::ConfigError;
use crate::http::security::config::authentication::AuthenticationBuilder;
use crate::http::security::config::builder::{ConfiguredSecurityBuilder, SecurityConfigurer};
use crate::http::security::config::context::{bean_ids, unique_bean_excluding, BeanRegistry};
use crate::http::security::config::http::{ExpressionUrlAuthorizations, HttpSecurity};
use crate::http::security::config::web::{IgnoredRequestRegistry, WebSecurity};
use crate::http::security::manager::AuthenticationManager;
use crate::http::security::user_details::UserDetailsService;

/// Where the adapter takes its authentication manager from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthenticationSource {
    /// Build the adapter's own [`AuthenticationBuilder`].
    Registry,
    /// Do not build the registry; use the manager registered in the [`BeanRegistry`].
    External,
}

/// Hooks an application implements to describe its security.
///
/// Only [`authorize_urls`](WebSecurityConfigurer::authorize_urls) is required.
pub trait WebSecurityConfigurer: 'static {
    /// Populates the authentication registry.
    ///
    /// Return [`AuthenticationSource::Registry`] to have the registry built into
    /// the manager. The default leaves it untouched and returns
    /// [`AuthenticationSource::External`].
    fn register_authentication(
        &self,
        _auth: &mut AuthenticationBuilder,
    ) -> Result<AuthenticationSource, ConfigError> {
        Ok(AuthenticationSource::External)
    }

    fn authorize_urls(&self, urls: &mut ExpressionUrlAuthorizations) -> Result<(), ConfigError>;

    /// Further HTTP configuration, run after the URL rules were declared.
    fn configure(&self, _http: &mut HttpSecurity) -> Result<(), ConfigError> {
        Ok(())
    }

    fn ignored_requests(&self, _ignoring: &mut IgnoredRequestRegistry) -> Result<(), ConfigError> {
        Ok(())
    }

    /// Raw access to the outer assembler.
    fn perform_configure(&self, _web: &mut WebSecurity) -> Result<(), ConfigError> {
        Ok(())
    }

    /// The lookup service published to the HTTP configuration and as a bean.
    fn user_details_service(
        &self,
        auth: &AuthenticationBuilder,
    ) -> Option<Arc<dyn UserDetailsService>> {
        auth.user_details_service().cloned()
    }
}

/// Adapter lifecycle. Only moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AdapterState {
    Uninitialized,
    AuthResolved,
    HttpConfigured,
    Registered,
}

/// Runs a [`WebSecurityConfigurer`]'s hooks against a [`WebSecurity`].
pub struct WebSecurityConfigurerAdapter<C: WebSecurityConfigurer> {
    configurer: C,
    beans: Option<Arc<BeanRegistry>>,
    authentication_builder: AuthenticationBuilder,
    authentication_manager: Option<Arc<dyn AuthenticationManager>>,
    http: Option<HttpSecurity>,
    state: AdapterState,
    init_called: bool,
}

impl<C: WebSecurityConfigurer> WebSecurityConfigurerAdapter<C> {
    pub fn new(configurer: C) -> Self {
        WebSecurityConfigurerAdapter {
            configurer,
            beans: None,
            authentication_builder: AuthenticationBuilder::new(),
            authentication_manager: None,
            http: None,
            state: AdapterState::Uninitialized,
            init_called: false,
        }
    }

    /// Registry consulted when the configurer does not build its own manager,
    /// and where [`publish_beans`](Self::publish_beans) registers.
    pub fn with_bean_registry(mut self, beans: Arc<BeanRegistry>) -> Self {
        self.beans = Some(beans);
        self
    }

    /// Uses `manager` as is. Neither the registry nor the bean registry is consulted.
    pub fn with_authentication_manager(mut self, manager: Arc<dyn AuthenticationManager>) -> Self {
        self.authentication_manager = Some(manager);
        self.state = AdapterState::AuthResolved;
        self
    }

    pub fn configurer(&self) -> &C {
        &self.configurer
    }

    pub fn state(&self) -> AdapterState {
        self.state
    }

    pub fn authentication_builder(&self) -> &AuthenticationBuilder {
        &self.authentication_builder
    }

    /// Resolves the authentication manager once and returns it on every call.
    pub fn authentication_manager(&mut self) -> Result<Arc<dyn AuthenticationManager>, ConfigError> {
        if let Some(manager) = &self.authentication_manager {
            return Ok(Arc::clone(manager));
        }

        let source = self
            .configurer
            .register_authentication(&mut self.authentication_builder)?;
        let manager: Arc<dyn AuthenticationManager> = match source {
            AuthenticationSource::Registry => {
                let manager: Arc<dyn AuthenticationManager> = self.authentication_builder.build()?;
                manager
            }
            AuthenticationSource::External => {
                log::debug!(
                    "Looking up an AuthenticationManager bean other than {}",
                    bean_ids::AUTHENTICATION_MANAGER
                );
                unique_bean_excluding::<Arc<dyn AuthenticationManager>>(
                    self.beans.as_deref(),
                    "AuthenticationManager",
                    bean_ids::AUTHENTICATION_MANAGER,
                )?
            }
        };

        self.authentication_manager = Some(Arc::clone(&manager));
        self.state = AdapterState::AuthResolved;
        Ok(manager)
    }

    /// The HTTP configuration, created and populated on first call.
    ///
    /// Fails once the configuration was handed to the [`WebSecurity`].
    pub fn http_configuration(&mut self) -> Result<&mut HttpSecurity, ConfigError> {
        if self.state == AdapterState::Registered {
            return Err(ConfigError::AlreadyInitialized);
        }
        let http = match self.http.take() {
            Some(http) => http,
            None => self.create_http()?,
        };
        Ok(self.http.insert(http))
    }

    fn create_http(&mut self) -> Result<HttpSecurity, ConfigError> {
        let manager = self.authentication_manager()?;
        let mut http = HttpSecurity::new(manager);
        if let Some(service) = self.configurer.user_details_service(&self.authentication_builder) {
            http.set_shared_object(service);
        }
        http.apply_default_configurers()?;
        self.configurer.authorize_urls(http.authorize_urls()?)?;
        self.configurer.configure(&mut http)?;

        self.state = AdapterState::HttpConfigured;
        Ok(http)
    }

    pub fn authentication_manager_bean(
        &mut self,
    ) -> Result<Arc<dyn AuthenticationManager>, ConfigError> {
        self.authentication_manager()
    }

    pub fn user_details_service_bean(&self) -> Option<Arc<dyn UserDetailsService>> {
        self.configurer
            .user_details_service(&self.authentication_builder)
    }

    /// Registers the manager and the lookup service under their [`bean_ids`].
    pub fn publish_beans(&mut self) -> Result<(), ConfigError> {
        let Some(beans) = self.beans.clone() else {
            return Ok(());
        };
        beans.register::<Arc<dyn AuthenticationManager>>(
            bean_ids::AUTHENTICATION_MANAGER,
            self.authentication_manager_bean()?,
        );
        if let Some(service) = self.user_details_service_bean() {
            beans.register::<Arc<dyn UserDetailsService>>(bean_ids::USER_DETAILS_SERVICE, service);
        }
        Ok(())
    }
}

impl<C: WebSecurityConfigurer> SecurityConfigurer<WebSecurity> for WebSecurityConfigurerAdapter<C> {
    /// Runs once; a second call fails with [`ConfigError::AlreadyInitialized`].
    fn init(&mut self, web: &mut WebSecurity) -> Result<(), ConfigError> {
        if self.init_called {
            return Err(ConfigError::AlreadyInitialized);
        }
        self.init_called = true;

        self.configurer.ignored_requests(web.ignoring())?;
        self.configurer.perform_configure(web)?;
        self.http_configuration()?;
        if let Some(http) = self.http.take() {
            web.add_security_filter_chain_builder(http)?;
        }
        self.state = AdapterState::Registered;
        Ok(())
    }

    fn configure(&mut self, _web: &mut WebSecurity) -> Result<(), ConfigError> {
        Ok(())
    }
}
