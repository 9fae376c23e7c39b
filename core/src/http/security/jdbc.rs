//! Lookup service backed by a relational database.
//!
//! The database itself is reached through a [`DataSource`] handle supplied by
//! the application (a connection pool wrapper around sqlx, diesel, ...). This
//! module only owns the queries and the row → [`User`] mapping.
//!
//! # Spring Security Equivalent
//! `JdbcDaoImpl` / `JdbcUserDetailsManager`

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::http::security::user_details::{UserDetailsError, UserDetailsService};
use crate::http::security::User;

/// A row of string columns in select-list order.
pub type Row = Vec<String>;

/// Relational connection handle.
///
/// `sql` uses `?` placeholders bound positionally from `params`.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn query(&self, sql: &str, params: &[&str]) -> Result<Vec<Row>, UserDetailsError>;
}

/// Queries and role mapping used by [`JdbcUserDetailsService`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct JdbcQueries {
    /// Must select `username, password, enabled`.
    pub users_by_username_query: String,
    /// Must select `username, authority`.
    pub authorities_by_username_query: String,
    /// Authorities carrying this prefix become roles (prefix stripped).
    pub role_prefix: String,
}

impl Default for JdbcQueries {
    fn default() -> Self {
        JdbcQueries {
            users_by_username_query:
                "select username,password,enabled from users where username = ?".to_string(),
            authorities_by_username_query:
                "select username,authority from authorities where username = ?".to_string(),
            role_prefix: "ROLE_".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct JdbcUserDetailsService {
    data_source: Arc<dyn DataSource>,
    queries: JdbcQueries,
}

impl JdbcUserDetailsService {
    pub fn new(data_source: Arc<dyn DataSource>, queries: JdbcQueries) -> Self {
        JdbcUserDetailsService {
            data_source,
            queries,
        }
    }

    pub fn queries(&self) -> &JdbcQueries {
        &self.queries
    }

    fn map_user(row: &[String]) -> Result<User, UserDetailsError> {
        let [username, password, enabled] = row else {
            return Err(UserDetailsError::InvalidRecord(format!(
                "expected 3 columns, got {}",
                row.len()
            )));
        };
        let enabled = matches!(enabled.to_ascii_lowercase().as_str(), "1" | "true" | "t" | "y");
        Ok(User::new(username.clone(), password.clone()).enabled(enabled))
    }
}

#[async_trait]
impl UserDetailsService for JdbcUserDetailsService {
    async fn load_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserDetailsError> {
        let rows = self
            .data_source
            .query(&self.queries.users_by_username_query, &[username])
            .await?;
        let Some(row) = rows.first() else {
            return Ok(None);
        };
        if rows.len() > 1 {
            log::warn!("{} rows returned for username {}, using the first", rows.len(), username);
        }
        let user = Self::map_user(row)?;

        let authority_rows = self
            .data_source
            .query(&self.queries.authorities_by_username_query, &[username])
            .await?;

        let (mut roles, mut authorities) = (Vec::new(), Vec::new());
        for authority in authority_rows.iter().filter_map(|r| r.get(1)) {
            match authority.strip_prefix(&self.queries.role_prefix) {
                Some(role) if !self.queries.role_prefix.is_empty() => roles.push(role.to_string()),
                _ => authorities.push(authority.clone()),
            }
        }

        Ok(Some(user.roles(&roles).authorities(&authorities)))
    }
}
