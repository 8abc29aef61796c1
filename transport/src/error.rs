//! Error types for transport configuration

use thiserror::Error;

/// Errors raised while configuring the HTTP transport
#[derive(Debug, Error)]
pub enum TransportConfigError {
    /// An environment variable held a value that could not be parsed
    #[error("Invalid value for {var}: {value}")]
    InvalidValue {
        /// Variable name
        var: String,
        /// Offending value
        value: String,
    },

    /// The underlying HTTP client could not be built
    #[error("Failed to build HTTP client: {0}")]
    Build(String),

    /// A shared client was installed earlier
    #[error("Shared HTTP client is already installed")]
    AlreadyInstalled,
}
