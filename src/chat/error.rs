//! Chat error types

use thiserror::Error;

/// Configuration problems detected at startup. Non-fatal: the scene keeps
/// running and the chat shows a warning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} is not set; the chat cannot reach the model")]
    MissingCredential { var: &'static str },
}

/// Failures of a single remote call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    /// No credential configured, or the service rejected it.
    #[error("not authorized: {0}")]
    Auth(String),

    /// Network failure or timeout before a response arrived.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("service returned {status}: {message}")]
    Service { status: u16, message: String },

    /// The service answered 2xx with a body we could not read.
    #[error("malformed service response: {0}")]
    Decode(String),
}

impl From<ConfigError> for ChatError {
    fn from(e: ConfigError) -> Self {
        ChatError::Auth(e.to_string())
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(e: serde_json::Error) -> Self {
        ChatError::Decode(e.to_string())
    }
}
