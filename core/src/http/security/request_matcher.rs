//! Request path matchers used by URL rules, ignore lists and chain selection.
//!
//! Ant-style patterns:
//! - `?` matches exactly one character
//! - `*` matches zero or more characters within a path segment
//! - `**` matches zero or more path segments
//!
//! ```
//! use actix_security_config::http::security::request_matcher::AntMatcher;
//!
//! let matcher = AntMatcher::new("/api/**");
//! assert!(matcher.matches("/api"));
//! assert!(matcher.matches("/api/users/42"));
//! assert!(!AntMatcher::new("/users/*/profile").matches("/users/1/2/profile"));
//! ```

use std::fmt;

use regex::Regex;

use crate::http::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    AnyPath,
    Literal(String),
    Wildcard(String),
}

#[derive(Debug, Clone)]
pub struct AntMatcher {
    pattern: String,
    segments: Vec<Segment>,
}

impl AntMatcher {
    pub fn new(pattern: &str) -> Self {
        let segments = split_path(pattern)
            .map(|part| match part {
                "**" => Segment::AnyPath,
                p if p.contains('*') || p.contains('?') => Segment::Wildcard(p.to_string()),
                p => Segment::Literal(p.to_string()),
            })
            .collect();
        AntMatcher {
            pattern: pattern.to_string(),
            segments,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn matches(&self, path: &str) -> bool {
        let parts: Vec<&str> = split_path(path).collect();
        match_segments(&self.segments, &parts)
    }
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn match_segments(segments: &[Segment], parts: &[&str]) -> bool {
    match (segments.split_first(), parts.split_first()) {
        (None, _) => parts.is_empty(),
        (Some((Segment::AnyPath, rest)), _) => {
            (0..=parts.len()).any(|skip| match_segments(rest, &parts[skip..]))
        }
        (Some(_), None) => false,
        (Some((Segment::Literal(literal), rest)), Some((part, remaining))) => {
            literal.as_str() == *part && match_segments(rest, remaining)
        }
        (Some((Segment::Wildcard(pattern), rest)), Some((part, remaining))) => {
            match_wildcard(pattern.as_bytes(), part.as_bytes()) && match_segments(rest, remaining)
        }
    }
}

fn match_wildcard(pattern: &[u8], text: &[u8]) -> bool {
    match pattern.split_first() {
        None => text.is_empty(),
        Some((b'*', rest)) => (0..=text.len()).any(|skip| match_wildcard(rest, &text[skip..])),
        Some((b'?', rest)) => !text.is_empty() && match_wildcard(rest, &text[1..]),
        Some((c, rest)) => text.first() == Some(c) && match_wildcard(rest, &text[1..]),
    }
}

/// Decides whether a request path belongs to a rule, ignore entry or chain.
#[derive(Clone)]
pub enum RequestMatcher {
    Any,
    Ant(AntMatcher),
    Regex(Regex),
}

impl RequestMatcher {
    pub fn ant(pattern: &str) -> Self {
        RequestMatcher::Ant(AntMatcher::new(pattern))
    }

    /// Compiles `pattern`, anchored so that it must match the whole path.
    pub fn regex(pattern: &str) -> Result<Self, ConfigError> {
        Regex::new(&format!("^(?:{})$", pattern))
            .map(RequestMatcher::Regex)
            .map_err(|e| ConfigError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })
    }

    pub fn matches(&self, path: &str) -> bool {
        match self {
            RequestMatcher::Any => true,
            RequestMatcher::Ant(ant) => ant.matches(path),
            RequestMatcher::Regex(re) => re.is_match(path),
        }
    }
}

impl fmt::Debug for RequestMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestMatcher::Any => write!(f, "any request"),
            RequestMatcher::Ant(ant) => write!(f, "Ant [pattern='{}']", ant.pattern()),
            RequestMatcher::Regex(re) => write!(f, "Regex [pattern='{}']", re.as_str()),
        }
    }
}
