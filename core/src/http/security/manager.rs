//! Authentication managers.
//!
//! # Spring Security Equivalent
//! `AuthenticationManager` / `ProviderManager`

use std::sync::Arc;

use async_trait::async_trait;

use crate::http::error::AuthenticationError;
use crate::http::security::provider::{AuthenticationProvider, Credentials};
use crate::http::security::User;

/// Entry point for authenticating credentials.
#[async_trait]
pub trait AuthenticationManager: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> Result<User, AuthenticationError>;
}

/// Ordered chain of providers with an optional parent manager.
///
/// Providers are consulted in the order they were added. The first one that
/// returns a user wins. Account status failures stop the chain immediately;
/// any other failure is remembered and the next provider is tried. When no
/// provider produced a user, the parent (if any) gets a turn. The last
/// remembered failure is reported, or [`AuthenticationError::ProviderNotFound`]
/// when nobody handled the credentials.
pub struct ProviderManager {
    providers: Vec<Arc<dyn AuthenticationProvider>>,
    parent: Option<Arc<dyn AuthenticationManager>>,
}

impl ProviderManager {
    pub fn new(
        providers: Vec<Arc<dyn AuthenticationProvider>>,
        parent: Option<Arc<dyn AuthenticationManager>>,
    ) -> Self {
        ProviderManager { providers, parent }
    }

    pub fn providers(&self) -> &[Arc<dyn AuthenticationProvider>] {
        &self.providers
    }

    pub fn parent(&self) -> Option<&Arc<dyn AuthenticationManager>> {
        self.parent.as_ref()
    }
}

#[async_trait]
impl AuthenticationManager for ProviderManager {
    async fn authenticate(&self, credentials: &Credentials) -> Result<User, AuthenticationError> {
        let mut last_error = None;

        for provider in self.providers.iter().filter(|p| p.supports(credentials)) {
            log::trace!(
                "Authentication attempt for {} using {}",
                credentials.username(),
                provider.name()
            );
            match provider.authenticate(credentials).await {
                Ok(Some(user)) => return Ok(user),
                Ok(None) => {}
                Err(e) if e.is_account_status() => return Err(e),
                Err(e) => last_error = Some(e),
            }
        }

        if let Some(parent) = &self.parent {
            match parent.authenticate(credentials).await {
                Ok(user) => return Ok(user),
                Err(AuthenticationError::ProviderNotFound) => {}
                Err(e) => last_error = Some(e),
            }
        }

        let error = last_error.unwrap_or(AuthenticationError::ProviderNotFound);
        log::debug!("Authentication failed for {}: {}", credentials.username(), error);
        Err(error)
    }
}
