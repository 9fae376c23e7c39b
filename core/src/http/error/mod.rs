pub use auth_error::{AuthError, AuthenticationError};
pub use config_error::ConfigError;

mod auth_error;
mod config_error;
