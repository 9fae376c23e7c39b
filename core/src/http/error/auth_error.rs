use actix_web::{error, http::StatusCode, HttpResponse, HttpResponseBuilder};
use derive_more::{Display, Error};

/// Error returned by the request extractors when no user is bound to the request.
#[derive(Debug, Display, Error)]
pub enum AuthError {
    #[display("forbidden")]
    Forbidden,
    #[display("unauthorized")]
    Unauthorized,
}

impl error::ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match *self {
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponseBuilder::new(self.status_code()).body(self.to_string())
    }
}

/// Failure of an authentication attempt.
///
/// Produced by providers and by the [`ProviderManager`] that chains them.
///
/// [`ProviderManager`]: crate::http::security::ProviderManager
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum AuthenticationError {
    /// Username unknown or password mismatch. The two are not distinguished.
    #[display("Bad credentials")]
    BadCredentials,
    /// The account exists but is disabled.
    #[display("User account is disabled")]
    Disabled,
    /// The account exists but is locked.
    #[display("User account is locked")]
    Locked,
    /// No provider in the chain (nor the parent) could handle the credentials.
    #[display("No authentication provider found for the supplied credentials")]
    ProviderNotFound,
    /// A backing store (lookup service, directory, database) failed.
    #[display("Authentication service error: {_0}")]
    Service(#[error(not(source))] String),
}

impl AuthenticationError {
    /// Account status failures end the provider chain immediately.
    pub fn is_account_status(&self) -> bool {
        matches!(self, AuthenticationError::Disabled | AuthenticationError::Locked)
    }
}
