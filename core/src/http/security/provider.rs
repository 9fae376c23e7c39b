//! Authentication providers.
//!
//! # Spring Security Equivalent
//! `AuthenticationProvider` / `DaoAuthenticationProvider`

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::http::error::AuthenticationError;
use crate::http::security::crypto::{NoOpPasswordEncoder, PasswordEncoder};
use crate::http::security::user_details::UserDetailsService;
use crate::http::security::User;

/// A username/password pair presented by a client.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[PROTECTED]")
            .finish()
    }
}

/// Attempts to turn presented credentials into a verified [`User`].
///
/// `Ok(None)` means "not mine": the manager moves on to the next provider.
/// `Err` means the provider handled the credentials and rejected them.
#[async_trait]
pub trait AuthenticationProvider: Send + Sync {
    async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<Option<User>, AuthenticationError>;

    fn supports(&self, _credentials: &Credentials) -> bool {
        true
    }

    /// Name used in logs and diagnostics.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Provider that loads the user from a [`UserDetailsService`] and checks the
/// password with a [`PasswordEncoder`].
///
/// Unknown users and wrong passwords both yield
/// [`AuthenticationError::BadCredentials`]. Disabled or locked accounts are
/// reported as such, but only after the password matched.
///
/// ```ignore
/// let provider = DaoAuthenticationProvider::new(Arc::new(service))
///     .password_encoder(Argon2PasswordEncoder::new());
/// ```
#[derive(Clone)]
pub struct DaoAuthenticationProvider {
    user_details_service: Arc<dyn UserDetailsService>,
    password_encoder: Arc<dyn PasswordEncoder>,
}

impl DaoAuthenticationProvider {
    /// Wraps `service` with a plain-text password check.
    pub fn new(user_details_service: Arc<dyn UserDetailsService>) -> Self {
        DaoAuthenticationProvider {
            user_details_service,
            password_encoder: Arc::new(NoOpPasswordEncoder),
        }
    }

    pub fn password_encoder<E: PasswordEncoder + 'static>(mut self, encoder: E) -> Self {
        self.password_encoder = Arc::new(encoder);
        self
    }

    pub(crate) fn shared_password_encoder(mut self, encoder: Arc<dyn PasswordEncoder>) -> Self {
        self.password_encoder = encoder;
        self
    }

    pub fn user_details_service(&self) -> &Arc<dyn UserDetailsService> {
        &self.user_details_service
    }
}

#[async_trait]
impl AuthenticationProvider for DaoAuthenticationProvider {
    async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<Option<User>, AuthenticationError> {
        let user = self
            .user_details_service
            .load_user_by_username(credentials.username())
            .await
            .map_err(|e| AuthenticationError::Service(e.to_string()))?
            .ok_or(AuthenticationError::BadCredentials)?;

        if !self
            .password_encoder
            .matches(credentials.password(), user.get_password())
        {
            log::debug!("Password mismatch for user {}", credentials.username());
            return Err(AuthenticationError::BadCredentials);
        }
        if user.is_locked() {
            return Err(AuthenticationError::Locked);
        }
        if !user.is_enabled() {
            return Err(AuthenticationError::Disabled);
        }

        Ok(Some(user.erase_credentials()))
    }

    fn name(&self) -> &str {
        "DaoAuthenticationProvider"
    }
}
