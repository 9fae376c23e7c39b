//! Errors raised while assembling the security configuration.
//!
//! All of them are programming or wiring mistakes. None is recoverable at
//! runtime: a misconfigured security chain must stop application startup.

use derive_more::{Display, Error};

#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ConfigError {
    /// A builder was mutated after it produced its result.
    #[display("{builder} has already been built and can no longer be configured")]
    AlreadyBuilt {
        #[error(not(source))]
        builder: &'static str,
    },
    /// `build` was entered while a build was running, or after one failed part-way.
    #[display("{builder} is being built; the build cannot be restarted")]
    BuildInProgress {
        #[error(not(source))]
        builder: &'static str,
    },
    /// The bean registry fallback did not find exactly one candidate.
    #[display("Failed to find bean of type {type_name} excluding {excluded}. Got {candidates:?}")]
    NoUniqueBean {
        type_name: &'static str,
        excluded: String,
        candidates: Vec<String>,
    },
    /// The web security adapter was asked to initialise a second time.
    #[display("WebSecurityConfigurerAdapter has already been initialized")]
    AlreadyInitialized,
    /// The outer assembler was built without any filter chain.
    #[display("At least one HttpSecurity filter chain must be registered")]
    NoFilterChain,
    /// A request matcher pattern could not be compiled.
    #[display("Invalid request pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}
