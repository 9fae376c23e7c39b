//! HTTP Basic Authentication support.
//!
//! # Spring Security Equivalent
//! `org.springframework.security.web.authentication.www.BasicAuthenticationFilter`

use actix_web::http::header::{HeaderMap, AUTHORIZATION};
use base64::prelude::*;
use serde::Deserialize;

use crate::http::security::provider::Credentials;

/// Extracts credentials from an `Authorization: Basic <base64(username:password)>` header.
///
/// Returns `None` when the header is absent, uses another scheme, or is malformed.
pub fn extract_basic_credentials(headers: &HeaderMap) -> Option<Credentials> {
    let auth_str = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let encoded = auth_str.strip_prefix("Basic ")?;

    let decoded = BASE64_STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;

    Some(Credentials::new(username, password))
}

/// HTTP Basic settings for a filter chain.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HttpBasicConfig {
    realm: String,
}

impl HttpBasicConfig {
    /// Creates a configuration with the realm "Restricted".
    pub fn new() -> Self {
        HttpBasicConfig {
            realm: "Restricted".to_string(),
        }
    }

    pub fn realm(mut self, realm: &str) -> Self {
        self.realm = realm.to_string();
        self
    }

    pub fn get_realm(&self) -> &str {
        &self.realm
    }

    /// Value of the `WWW-Authenticate` challenge header.
    pub fn www_authenticate_header(&self) -> String {
        format!("Basic realm=\"{}\"", self.realm)
    }
}

impl Default for HttpBasicConfig {
    fn default() -> Self {
        Self::new()
    }
}
