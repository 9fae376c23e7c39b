//! LDAP bind authentication.
//!
//! The directory is reached through an [`LdapOperations`] handle supplied by
//! the application; this module owns the bind/search sequence and the
//! mapping of directory entries to a [`User`].
//!
//! # Spring Security Equivalent
//! `LdapAuthenticationProvider` with a `BindAuthenticator` and
//! `DefaultLdapAuthoritiesPopulator`

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::http::error::AuthenticationError;
use crate::http::security::provider::{AuthenticationProvider, Credentials};
use crate::http::security::user::User;

/// LDAP search and bind settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LdapConfig {
    /// Base DN appended to the search bases (e.g. "dc=example,dc=com")
    pub base_dn: String,
    /// User search base, relative to `base_dn`
    pub user_search_base: String,
    /// User search filter, `{0}` is replaced by the escaped username
    pub user_search_filter: String,
    /// DN pattern for direct bind, `{0}` is replaced by the username. Skips the user search.
    pub user_dn_pattern: Option<String>,
    /// Group search base, relative to `base_dn`
    pub group_search_base: String,
    /// Group search filter, `{0}` is replaced by the escaped user DN
    pub group_search_filter: String,
    /// Group attribute holding the role name
    pub group_role_attribute: String,
    /// Service account used for the user search
    pub manager_dn: Option<String>,
    pub manager_password: Option<String>,
    /// Prepended to every role taken from a group
    pub role_prefix: String,
    pub convert_to_uppercase: bool,
}

impl Default for LdapConfig {
    fn default() -> Self {
        Self {
            base_dn: String::new(),
            user_search_base: "ou=people".to_string(),
            user_search_filter: "(uid={0})".to_string(),
            user_dn_pattern: None,
            group_search_base: "ou=groups".to_string(),
            group_search_filter: "(member={0})".to_string(),
            group_role_attribute: "cn".to_string(),
            manager_dn: None,
            manager_password: None,
            role_prefix: String::new(),
            convert_to_uppercase: true,
        }
    }
}

impl LdapConfig {
    pub fn new(base_dn: impl Into<String>) -> Self {
        Self {
            base_dn: base_dn.into(),
            ..Default::default()
        }
    }

    fn qualify(&self, base: &str) -> String {
        match (base.is_empty(), self.base_dn.is_empty()) {
            (true, _) => self.base_dn.clone(),
            (false, true) => base.to_string(),
            (false, false) => format!("{},{}", base, self.base_dn),
        }
    }

    pub fn full_user_search_base(&self) -> String {
        self.qualify(&self.user_search_base)
    }

    pub fn full_group_search_base(&self) -> String {
        self.qualify(&self.group_search_base)
    }

    pub fn build_user_filter(&self, username: &str) -> String {
        self.user_search_filter
            .replace("{0}", &escape_filter_value(username))
    }

    pub fn build_group_filter(&self, user_dn: &str) -> String {
        self.group_search_filter
            .replace("{0}", &escape_filter_value(user_dn))
    }

    pub fn build_user_dn(&self, username: &str) -> Option<String> {
        self.user_dn_pattern
            .as_ref()
            .map(|pattern| pattern.replace("{0}", &escape_dn_value(username)))
    }
}

/// Escapes a value for use as an attribute value inside a DN (RFC 4514).
pub fn escape_dn_value(value: &str) -> String {
    let last = value.chars().count().saturating_sub(1);
    let mut escaped = String::with_capacity(value.len());
    for (i, c) in value.chars().enumerate() {
        match c {
            ',' | '+' | '"' | '\\' | '<' | '>' | ';' | '=' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '#' if i == 0 => escaped.push_str("\\#"),
            ' ' if i == 0 || i == last => escaped.push_str("\\ "),
            '\0' => escaped.push_str("\\00"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Escapes a value for use inside a search filter (RFC 4515).
pub fn escape_filter_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '*' => escaped.push_str("\\2a"),
            '(' => escaped.push_str("\\28"),
            ')' => escaped.push_str("\\29"),
            '\\' => escaped.push_str("\\5c"),
            '\0' => escaped.push_str("\\00"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// A directory entry returned by a search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LdapEntry {
    pub dn: String,
    pub attributes: HashMap<String, Vec<String>>,
}

impl LdapEntry {
    pub fn new(dn: impl Into<String>) -> Self {
        LdapEntry {
            dn: dn.into(),
            attributes: HashMap::new(),
        }
    }

    pub fn attribute(mut self, name: &str, values: &[&str]) -> Self {
        self.attributes
            .insert(name.to_string(), values.iter().map(|v| v.to_string()).collect());
        self
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(name)
            .and_then(|values| values.first())
            .map(|s| s.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LdapError {
    /// Connection failed
    ConnectionFailed(String),
    /// Bind rejected (wrong DN or password)
    InvalidCredentials(String),
    /// Search failed
    SearchFailed(String),
    /// Timeout
    Timeout,
}

impl std::fmt::Display for LdapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LdapError::ConnectionFailed(msg) => write!(f, "LDAP connection failed: {}", msg),
            LdapError::InvalidCredentials(dn) => write!(f, "LDAP bind rejected for {}", dn),
            LdapError::SearchFailed(msg) => write!(f, "LDAP search failed: {}", msg),
            LdapError::Timeout => write!(f, "LDAP operation timed out"),
        }
    }
}

impl std::error::Error for LdapError {}

/// Directory-connection handle.
///
/// Implement it over a real client (e.g. `ldap3`) or an in-process fake for tests.
#[async_trait]
pub trait LdapOperations: Send + Sync {
    async fn bind(&self, dn: &str, password: &str) -> Result<(), LdapError>;

    /// Subtree search under `base`.
    async fn search(&self, base: &str, filter: &str) -> Result<Vec<LdapEntry>, LdapError>;
}

/// What the provider learned about an authenticated user.
#[derive(Debug, Clone)]
pub struct LdapUserContext {
    pub dn: String,
    /// Attributes of the user entry; empty when the DN came from `user_dn_pattern`.
    pub attributes: HashMap<String, Vec<String>>,
    pub groups: Vec<LdapEntry>,
}

/// Turns an authenticated directory user into a [`User`].
pub trait LdapContextMapper: Send + Sync {
    fn map_user(&self, username: &str, context: &LdapUserContext, config: &LdapConfig) -> User;
}

/// Maps each group's role attribute (or the CN of its DN) to a role.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultLdapContextMapper;

impl LdapContextMapper for DefaultLdapContextMapper {
    fn map_user(&self, username: &str, context: &LdapUserContext, config: &LdapConfig) -> User {
        let roles: Vec<String> = context
            .groups
            .iter()
            .filter_map(|group| {
                group
                    .get_attribute(&config.group_role_attribute)
                    .map(str::to_string)
                    .or_else(|| cn_of(&group.dn))
            })
            .map(|name| {
                let name = if config.convert_to_uppercase {
                    name.to_uppercase()
                } else {
                    name
                };
                format!("{}{}", config.role_prefix, name)
            })
            .collect();

        User::new(username.to_string(), String::new()).roles(&roles)
    }
}

fn cn_of(dn: &str) -> Option<String> {
    let first = dn.split(',').next()?;
    first
        .strip_prefix("cn=")
        .or_else(|| first.strip_prefix("CN="))
        .map(str::to_string)
}

fn service_error(e: LdapError) -> AuthenticationError {
    AuthenticationError::Service(e.to_string())
}

/// Provider that authenticates by binding to the directory as the user.
#[derive(Clone)]
pub struct LdapAuthenticationProvider {
    context_source: Arc<dyn LdapOperations>,
    config: Arc<LdapConfig>,
    mapper: Arc<dyn LdapContextMapper>,
}

impl LdapAuthenticationProvider {
    pub fn new(context_source: Arc<dyn LdapOperations>, config: LdapConfig) -> Self {
        LdapAuthenticationProvider {
            context_source,
            config: Arc::new(config),
            mapper: Arc::new(DefaultLdapContextMapper),
        }
    }

    pub fn context_mapper(mut self, mapper: Arc<dyn LdapContextMapper>) -> Self {
        self.mapper = mapper;
        self
    }

    pub fn config(&self) -> &LdapConfig {
        &self.config
    }

    /// Finds the user's entry with the service account. `Ok(None)` when absent.
    async fn search_user(&self, username: &str) -> Result<Option<LdapEntry>, AuthenticationError> {
        if let (Some(dn), Some(password)) = (&self.config.manager_dn, &self.config.manager_password) {
            self.context_source
                .bind(dn, password)
                .await
                .map_err(service_error)?;
        }

        let mut entries = self
            .context_source
            .search(
                &self.config.full_user_search_base(),
                &self.config.build_user_filter(username),
            )
            .await
            .map_err(service_error)?;

        match entries.len() {
            0 => Ok(None),
            1 => Ok(entries.pop()),
            n => Err(AuthenticationError::Service(format!(
                "user search for {} returned {} entries",
                username, n
            ))),
        }
    }
}

#[async_trait]
impl AuthenticationProvider for LdapAuthenticationProvider {
    async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<Option<User>, AuthenticationError> {
        // An empty password would turn into an anonymous bind.
        if credentials.password().is_empty() {
            return Err(AuthenticationError::BadCredentials);
        }
        let username = credentials.username();

        let (dn, attributes) = match self.config.build_user_dn(username) {
            Some(dn) => (dn, HashMap::new()),
            None => match self.search_user(username).await? {
                Some(entry) => (entry.dn, entry.attributes),
                None => return Err(AuthenticationError::BadCredentials),
            },
        };

        match self.context_source.bind(&dn, credentials.password()).await {
            Ok(()) => {}
            Err(LdapError::InvalidCredentials(_)) => return Err(AuthenticationError::BadCredentials),
            Err(e) => return Err(service_error(e)),
        }

        let groups = self
            .context_source
            .search(
                &self.config.full_group_search_base(),
                &self.config.build_group_filter(&dn),
            )
            .await
            .map_err(service_error)?;

        let context = LdapUserContext {
            dn,
            attributes,
            groups,
        };
        Ok(Some(self.mapper.map_user(username, &context, &self.config)))
    }

    fn name(&self) -> &str {
        "LdapAuthenticationProvider"
    }
}
