//! Security response headers written by a filter chain.
//!
//! # Spring Security Equivalent
//! `HttpSecurity.headers()` configuration
//!
//! Defaults:
//! - `X-Content-Type-Options: nosniff`
//! - `X-Frame-Options: DENY`
//! - `X-XSS-Protection: 0`
//! - `Referrer-Policy: strict-origin-when-cross-origin`
//!
//! HSTS, `Content-Security-Policy` and `Cache-Control` are opt-in.

use actix_web::http::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrameOptions {
    Deny,
    SameOrigin,
    Disabled,
}

impl FrameOptions {
    fn to_header_value(self) -> Option<&'static str> {
        match self {
            FrameOptions::Deny => Some("DENY"),
            FrameOptions::SameOrigin => Some("SAMEORIGIN"),
            FrameOptions::Disabled => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferrerPolicy {
    NoReferrer,
    SameOrigin,
    StrictOrigin,
    StrictOriginWhenCrossOrigin,
    Disabled,
}

impl ReferrerPolicy {
    fn to_header_value(self) -> Option<&'static str> {
        match self {
            ReferrerPolicy::NoReferrer => Some("no-referrer"),
            ReferrerPolicy::SameOrigin => Some("same-origin"),
            ReferrerPolicy::StrictOrigin => Some("strict-origin"),
            ReferrerPolicy::StrictOriginWhenCrossOrigin => Some("strict-origin-when-cross-origin"),
            ReferrerPolicy::Disabled => None,
        }
    }
}

/// Header settings carried by a `SecurityFilterChain`.
///
/// ```
/// use actix_security_config::http::security::headers::{FrameOptions, SecurityHeaders};
///
/// let headers = SecurityHeaders::new()
///     .frame_options(FrameOptions::SameOrigin)
///     .hsts(true, 31_536_000);
/// assert!(headers.hsts_enabled);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SecurityHeaders {
    pub content_type_options: bool,
    pub frame_options: FrameOptions,
    pub content_security_policy: Option<String>,
    pub hsts_enabled: bool,
    pub hsts_max_age: u64,
    pub hsts_include_subdomains: bool,
    pub referrer_policy: ReferrerPolicy,
    pub cache_control: Option<String>,
}

impl Default for SecurityHeaders {
    fn default() -> Self {
        SecurityHeaders {
            content_type_options: true,
            frame_options: FrameOptions::Deny,
            content_security_policy: None,
            hsts_enabled: false,
            hsts_max_age: 31_536_000,
            hsts_include_subdomains: false,
            referrer_policy: ReferrerPolicy::StrictOriginWhenCrossOrigin,
            cache_control: None,
        }
    }
}

impl SecurityHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame_options(mut self, options: FrameOptions) -> Self {
        self.frame_options = options;
        self
    }

    pub fn content_security_policy(mut self, policy: impl Into<String>) -> Self {
        self.content_security_policy = Some(policy.into());
        self
    }

    /// Enables or disables `Strict-Transport-Security` with the given max-age in seconds.
    pub fn hsts(mut self, enabled: bool, max_age: u64) -> Self {
        self.hsts_enabled = enabled;
        self.hsts_max_age = max_age;
        self
    }

    pub fn hsts_include_subdomains(mut self, include: bool) -> Self {
        self.hsts_include_subdomains = include;
        self
    }

    pub fn referrer_policy(mut self, policy: ReferrerPolicy) -> Self {
        self.referrer_policy = policy;
        self
    }

    pub fn cache_control(mut self, value: impl Into<String>) -> Self {
        self.cache_control = Some(value.into());
        self
    }

    pub fn disable_content_type_options(mut self) -> Self {
        self.content_type_options = false;
        self
    }

    fn hsts_value(&self) -> String {
        let mut value = format!("max-age={}", self.hsts_max_age);
        if self.hsts_include_subdomains {
            value.push_str("; includeSubDomains");
        }
        value
    }

    /// Writes the configured headers, replacing any value the handler set.
    pub fn write_to(&self, headers: &mut HeaderMap) {
        if self.content_type_options {
            headers.insert(
                HeaderName::from_static("x-content-type-options"),
                HeaderValue::from_static("nosniff"),
            );
        }
        if let Some(value) = self.frame_options.to_header_value() {
            headers.insert(
                HeaderName::from_static("x-frame-options"),
                HeaderValue::from_static(value),
            );
        }
        headers.insert(
            HeaderName::from_static("x-xss-protection"),
            HeaderValue::from_static("0"),
        );
        if let Some(value) = self.referrer_policy.to_header_value() {
            headers.insert(
                HeaderName::from_static("referrer-policy"),
                HeaderValue::from_static(value),
            );
        }

        // Free-form values that fail header validation are skipped.
        if let Some(Ok(value)) = self.content_security_policy.as_deref().map(HeaderValue::from_str) {
            headers.insert(HeaderName::from_static("content-security-policy"), value);
        }
        if self.hsts_enabled {
            if let Ok(value) = HeaderValue::from_str(&self.hsts_value()) {
                headers.insert(HeaderName::from_static("strict-transport-security"), value);
            }
        }
        if let Some(Ok(value)) = self.cache_control.as_deref().map(HeaderValue::from_str) {
            headers.insert(HeaderName::from_static("cache-control"), value);
        }
    }
}
