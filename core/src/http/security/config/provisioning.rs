//! Configurers that contribute a lookup service and a DAO provider to an
//! [`AuthenticationBuilder`].
//!
//! # Spring Security Equivalent
//! `InMemoryUserDetailsManagerConfigurer`, `JdbcUserDetailsManagerConfigurer`,
//! `DaoAuthenticationConfigurer`

use std::collections::HashSet;
use std::sync::Arc;

use crate::http::error::ConfigError;
use crate::http::security::config::authentication::AuthenticationBuilder;
use crate::http::security::config::builder::{ConfiguredSecurityBuilder, SecurityConfigurer};
use crate::http::security::crypto::PasswordEncoder;
use crate::http::security::jdbc::{DataSource, JdbcQueries, JdbcUserDetailsService};
use crate::http::security::provider::DaoAuthenticationProvider;
use crate::http::security::user_details::{InMemoryUserDetailsService, UserDetailsService};
use crate::http::security::User;

/// Records `service` in `slot` and adds a DAO provider around it.
///
/// Configurers applied outside the builder's shortcuts take their slot now.
fn install_dao_provider(
    builder: &mut AuthenticationBuilder,
    slot: Option<usize>,
    service: Arc<dyn UserDetailsService>,
    encoder: Option<Arc<dyn PasswordEncoder>>,
) -> Result<(), ConfigError> {
    let slot = slot.unwrap_or_else(|| builder.reserve_service_slot());
    builder.record_user_details_service(slot, Arc::clone(&service));
    let provider = match encoder {
        Some(encoder) => DaoAuthenticationProvider::new(service).shared_password_encoder(encoder),
        None => DaoAuthenticationProvider::new(service),
    };
    builder.add_provider(Arc::new(provider))?;
    Ok(())
}

/// Users held in memory.
///
/// ```ignore
/// auth.in_memory_authentication()?
///     .password_encoder(Argon2PasswordEncoder::new())
///     .with_user(User::with_encoded_password("admin", encoder.encode("admin")).roles(&["ADMIN".into()]));
/// ```
#[derive(Default)]
pub struct InMemoryUserDetailsManagerConfigurer {
    users: Vec<User>,
    password_encoder: Option<Arc<dyn PasswordEncoder>>,
    service: Option<Arc<dyn UserDetailsService>>,
    slot: Option<usize>,
}

impl InMemoryUserDetailsManagerConfigurer {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn in_slot(mut self, slot: usize) -> Self {
        self.slot = Some(slot);
        self
    }

    pub fn with_user(&mut self, user: User) -> &mut Self {
        self.users.push(user);
        self
    }

    /// Encoder the stored passwords were produced with. Plain-text comparison when unset.
    pub fn password_encoder<E: PasswordEncoder + 'static>(&mut self, encoder: E) -> &mut Self {
        self.password_encoder = Some(Arc::new(encoder));
        self
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }
}

impl SecurityConfigurer<AuthenticationBuilder> for InMemoryUserDetailsManagerConfigurer {
    fn init(&mut self, builder: &mut AuthenticationBuilder) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for user in &self.users {
            if !seen.insert(user.get_username()) {
                log::warn!("Duplicate in-memory user {}, the last definition wins", user.get_username());
            }
        }

        let service: Arc<dyn UserDetailsService> =
            Arc::new(InMemoryUserDetailsService::with_users(self.users.iter().cloned()));
        builder.set_shared_object(Arc::clone(&service));
        self.service = Some(service);
        Ok(())
    }

    fn configure(&mut self, builder: &mut AuthenticationBuilder) -> Result<(), ConfigError> {
        let service = match &self.service {
            Some(service) => Arc::clone(service),
            None => Arc::new(InMemoryUserDetailsService::with_users(self.users.iter().cloned())),
        };
        install_dao_provider(builder, self.slot, service, self.password_encoder.clone())
    }
}

/// Users loaded from a relational database through a [`DataSource`].
pub struct JdbcUserDetailsManagerConfigurer {
    data_source: Arc<dyn DataSource>,
    queries: JdbcQueries,
    password_encoder: Option<Arc<dyn PasswordEncoder>>,
    service: Option<Arc<dyn UserDetailsService>>,
    slot: Option<usize>,
}

impl JdbcUserDetailsManagerConfigurer {
    pub fn new(data_source: Arc<dyn DataSource>) -> Self {
        JdbcUserDetailsManagerConfigurer {
            data_source,
            queries: JdbcQueries::default(),
            password_encoder: None,
            service: None,
            slot: None,
        }
    }

    pub(crate) fn in_slot(mut self, slot: usize) -> Self {
        self.slot = Some(slot);
        self
    }

    pub fn users_by_username_query(&mut self, query: &str) -> &mut Self {
        self.queries.users_by_username_query = query.to_string();
        self
    }

    pub fn authorities_by_username_query(&mut self, query: &str) -> &mut Self {
        self.queries.authorities_by_username_query = query.to_string();
        self
    }

    pub fn role_prefix(&mut self, prefix: &str) -> &mut Self {
        self.queries.role_prefix = prefix.to_string();
        self
    }

    /// Replaces all queries at once, e.g. with values loaded from a config file.
    pub fn queries(&mut self, queries: JdbcQueries) -> &mut Self {
        self.queries = queries;
        self
    }

    pub fn password_encoder<E: PasswordEncoder + 'static>(&mut self, encoder: E) -> &mut Self {
        self.password_encoder = Some(Arc::new(encoder));
        self
    }

    fn create_service(&self) -> Arc<dyn UserDetailsService> {
        Arc::new(JdbcUserDetailsService::new(
            Arc::clone(&self.data_source),
            self.queries.clone(),
        ))
    }
}

impl SecurityConfigurer<AuthenticationBuilder> for JdbcUserDetailsManagerConfigurer {
    fn init(&mut self, builder: &mut AuthenticationBuilder) -> Result<(), ConfigError> {
        let service = self.create_service();
        builder.set_shared_object(Arc::clone(&service));
        self.service = Some(service);
        Ok(())
    }

    fn configure(&mut self, builder: &mut AuthenticationBuilder) -> Result<(), ConfigError> {
        let service = match &self.service {
            Some(service) => Arc::clone(service),
            None => self.create_service(),
        };
        install_dao_provider(builder, self.slot, service, self.password_encoder.clone())
    }
}

/// DAO provider around a caller-supplied lookup service.
///
/// Created by [`AuthenticationBuilder::user_details`], which records the
/// service on the builder right away.
pub struct DaoAuthenticationConfigurer {
    service: Arc<dyn UserDetailsService>,
    password_encoder: Option<Arc<dyn PasswordEncoder>>,
}

impl DaoAuthenticationConfigurer {
    pub fn new(service: Arc<dyn UserDetailsService>) -> Self {
        DaoAuthenticationConfigurer {
            service,
            password_encoder: None,
        }
    }

    pub fn password_encoder<E: PasswordEncoder + 'static>(&mut self, encoder: E) -> &mut Self {
        self.password_encoder = Some(Arc::new(encoder));
        self
    }
}

impl SecurityConfigurer<AuthenticationBuilder> for DaoAuthenticationConfigurer {
    fn configure(&mut self, builder: &mut AuthenticationBuilder) -> Result<(), ConfigError> {
        let provider = DaoAuthenticationProvider::new(Arc::clone(&self.service));
        let provider = match &self.password_encoder {
            Some(encoder) => provider.shared_password_encoder(Arc::clone(encoder)),
            None => provider,
        };
        builder.add_provider(Arc::new(provider))?;
        Ok(())
    }
}
