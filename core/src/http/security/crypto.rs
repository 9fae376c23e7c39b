//! Password encoding used by the DAO provider.
//!
//! # Spring Security Equivalent
//! `org.springframework.security.crypto.password.PasswordEncoder`

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Encodes raw passwords and checks raw passwords against stored encodings.
pub trait PasswordEncoder: Send + Sync {
    fn encode(&self, raw_password: &str) -> String;

    fn matches(&self, raw_password: &str, encoded_password: &str) -> bool;
}

/// Argon2id encoder producing PHC strings.
///
/// ```
/// use actix_security_config::http::security::crypto::{Argon2PasswordEncoder, PasswordEncoder};
///
/// let encoder = Argon2PasswordEncoder::new();
/// let hash = encoder.encode("secret");
/// assert!(encoder.matches("secret", &hash));
/// assert!(!encoder.matches("wrong", &hash));
/// ```
#[derive(Clone, Default)]
pub struct Argon2PasswordEncoder {
    argon2: Argon2<'static>,
}

impl Argon2PasswordEncoder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordEncoder for Argon2PasswordEncoder {
    fn encode(&self, raw_password: &str) -> String {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(raw_password.as_bytes(), &salt)
            .expect("argon2 hashing with default params cannot fail")
            .to_string()
    }

    fn matches(&self, raw_password: &str, encoded_password: &str) -> bool {
        PasswordHash::new(encoded_password)
            .map(|hash| {
                self.argon2
                    .verify_password(raw_password.as_bytes(), &hash)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

/// Plain-text comparison. Only for tests and demos.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpPasswordEncoder;

impl PasswordEncoder for NoOpPasswordEncoder {
    fn encode(&self, raw_password: &str) -> String {
        raw_password.to_string()
    }

    fn matches(&self, raw_password: &str, encoded_password: &str) -> bool {
        raw_password == encoded_password
    }
}

/// Encoder that picks the algorithm from an `{id}` prefix on the stored value.
///
/// New passwords are encoded as `{argon2}<phc>`. Stored values prefixed with
/// `{noop}` are compared in plain text; anything without a known prefix never matches.
#[derive(Clone, Default)]
pub struct DelegatingPasswordEncoder {
    argon2: Argon2PasswordEncoder,
}

impl DelegatingPasswordEncoder {
    const ARGON2: &'static str = "{argon2}";
    const NOOP: &'static str = "{noop}";

    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordEncoder for DelegatingPasswordEncoder {
    fn encode(&self, raw_password: &str) -> String {
        format!("{}{}", Self::ARGON2, self.argon2.encode(raw_password))
    }

    fn matches(&self, raw_password: &str, encoded_password: &str) -> bool {
        if let Some(hash) = encoded_password.strip_prefix(Self::ARGON2) {
            self.argon2.matches(raw_password, hash)
        } else if let Some(plain) = encoded_password.strip_prefix(Self::NOOP) {
            NoOpPasswordEncoder.matches(raw_password, plain)
        } else {
            false
        }
    }
}
