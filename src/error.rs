//! Error handling and custom error types
//!
//! Provides unified error handling across the service and client using thiserror.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with an error envelope we could read a message from.
    #[error("Provider rejected request (status {status}): {message}")]
    ProviderRejected { status: u16, message: String },

    /// Provider failure with nothing worth showing to the caller.
    #[error("AI provider error: {0}")]
    AiProvider(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Dream service error (status {status}): {message}")]
    Service { status: u16, message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse classification used when logging a failed `/dream` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Provider,
    Validation,
    Internal,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::Provider => "provider",
            ErrorKind::Validation => "validation",
            ErrorKind::Internal => "internal",
        };
        f.write_str(name)
    }
}

impl Error {
    /// The provider's own error text, when the provider supplied one.
    pub fn provider_message(&self) -> Option<&str> {
        match self {
            Error::ProviderRejected { message, .. } if !message.trim().is_empty() => {
                Some(message.as_str())
            }
            _ => None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ProviderRejected { .. } | Error::AiProvider(_) | Error::Http(_) => {
                ErrorKind::Provider
            }
            Error::InvalidRequest(_) => ErrorKind::Validation,
            _ => ErrorKind::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
