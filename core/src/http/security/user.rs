//! User model shared by lookup services, providers and handlers.
//!
//! # Spring Equivalent
//! `UserDetails` interface

use std::fmt;

/// A principal with its stored credential, roles, authorities and account status.
///
/// Lookup services return it with the stored (usually encoded) password;
/// once a provider accepts the credentials it is bound to the request and
/// handed to handlers through the extractors.
///
/// # Example
/// ```
/// use actix_security_config::http::security::User;
///
/// let user = User::new("admin".into(), "password".into())
///     .roles(&["ADMIN".into(), "USER".into()])
///     .authorities(&["users:read".into()]);
///
/// assert!(user.has_role("ADMIN"));
/// assert!(user.is_enabled());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    username: String,
    password: String,
    roles: Vec<String>,
    authorities: Vec<String>,
    enabled: bool,
    locked: bool,
}

impl User {
    /// Creates an enabled, unlocked user with no roles.
    pub fn new(username: String, password: String) -> Self {
        User {
            username,
            password,
            roles: Vec::new(),
            authorities: Vec::new(),
            enabled: true,
            locked: false,
        }
    }

    /// Creates a user whose password has already been run through a `PasswordEncoder`.
    pub fn with_encoded_password(username: &str, encoded_password: String) -> Self {
        User::new(username.to_string(), encoded_password)
    }

    pub fn get_username(&self) -> &str {
        &self.username
    }

    pub fn get_password(&self) -> &str {
        &self.password
    }

    pub fn get_roles(&self) -> &[String] {
        &self.roles
    }

    pub fn get_authorities(&self) -> &[String] {
        &self.authorities
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Adds roles, skipping ones already present.
    pub fn roles(mut self, roles: &[String]) -> Self {
        for role in roles {
            if !self.roles.contains(role) {
                self.roles.push(role.clone());
            }
        }
        self
    }

    /// Adds authorities, skipping ones already present.
    pub fn authorities(mut self, authorities: &[String]) -> Self {
        for authority in authorities {
            if !self.authorities.contains(authority) {
                self.authorities.push(authority.clone());
            }
        }
        self
    }

    /// Sets whether the account may authenticate at all.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Marks the account as locked.
    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    /// Returns a copy without the stored password, as bound to authenticated requests.
    pub fn erase_credentials(&self) -> Self {
        User {
            password: String::new(),
            ..self.clone()
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        roles.iter().any(|role| self.has_role(role))
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.iter().any(|a| a == authority)
    }

    pub fn has_any_authority(&self, authorities: &[&str]) -> bool {
        authorities.iter().any(|auth| self.has_authority(auth))
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "User {{ username: {}, roles: {:?}, authorities: {:?}, enabled: {} }}",
            self.username, self.roles, self.authorities, self.enabled
        )
    }
}
