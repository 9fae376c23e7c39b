//! User lookup services.
//!
//! A [`UserDetailsService`] resolves a username to the stored [`User`]
//! (encoded password, roles, account status). It never checks credentials;
//! that is the job of the provider wrapping it
//! ([`DaoAuthenticationProvider`](crate::http::security::provider::DaoAuthenticationProvider)).
//!
//! # Example
//! ```rust,ignore
//! use actix_security_config::http::security::user_details::{UserDetailsService, UserDetailsError};
//! use async_trait::async_trait;
//!
//! struct ApiUserDetailsService {
//!     client: reqwest::Client,
//! }
//!
//! #[async_trait]
//! impl UserDetailsService for ApiUserDetailsService {
//!     async fn load_user_by_username(&self, username: &str) -> Result<Option<User>, UserDetailsError> {
//!         // call the user directory...
//!         Ok(None)
//!     }
//! }
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::http::security::User;

// =============================================================================
// User Details Error
// =============================================================================

/// Failure of a lookup service's backing store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserDetailsError {
    /// User already exists
    AlreadyExists,
    /// The stored record could not be turned into a user
    InvalidRecord(String),
    /// Database, directory or other storage error
    StorageError(String),
}

impl std::fmt::Display for UserDetailsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserDetailsError::AlreadyExists => write!(f, "User already exists"),
            UserDetailsError::InvalidRecord(e) => write!(f, "Invalid user record: {}", e),
            UserDetailsError::StorageError(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl std::error::Error for UserDetailsError {}

// =============================================================================
// User Details Service Trait
// =============================================================================

/// Resolves a principal identifier to its stored credential and authority data.
#[async_trait]
pub trait UserDetailsService: Send + Sync {
    /// Returns `Ok(None)` when the user does not exist.
    async fn load_user_by_username(&self, username: &str)
        -> Result<Option<User>, UserDetailsError>;

    async fn user_exists(&self, username: &str) -> Result<bool, UserDetailsError> {
        Ok(self.load_user_by_username(username).await?.is_some())
    }
}

// =============================================================================
// In-Memory User Details Service
// =============================================================================

/// Lookup service over a map held in memory.
#[derive(Clone, Default)]
pub struct InMemoryUserDetailsService {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserDetailsService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the store pre-populated. Later duplicates of a username replace earlier ones.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let users = users
            .into_iter()
            .map(|user| (user.get_username().to_string(), user))
            .collect();
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }

    /// Adds a user, failing if the username is taken.
    pub async fn create_user(&self, user: User) -> Result<(), UserDetailsError> {
        let mut users = self.users.write().await;
        let username = user.get_username().to_string();
        if users.contains_key(&username) {
            return Err(UserDetailsError::AlreadyExists);
        }
        users.insert(username, user);
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserDetailsService for InMemoryUserDetailsService {
    async fn load_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserDetailsError> {
        let users = self.users.read().await;
        Ok(users.get(username).cloned())
    }
}
