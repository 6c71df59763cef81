//! Shared error types for the CityInfo service.
//!
//! Crate-specific errors (upstream, store, API) wrap these where they need
//! the common network or configuration classification.

use thiserror::Error;

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    /// Short operator-facing summary, without the underlying cause.
    pub fn summary(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => "Unable to reach upstream service",
            NetworkError::Timeout => "Upstream service timed out",
            NetworkError::ServerError { status, .. } if *status >= 500 => {
                "Upstream service is failing"
            }
            NetworkError::ServerError { .. } => "Upstream request was rejected",
            NetworkError::InvalidResponse(_) => "Upstream returned an unexpected response",
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),

    #[error("Invalid environment override {name}: {value}")]
    InvalidOverride { name: String, value: String },
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_connect() {
            NetworkError::ConnectionFailed(self.to_string())
        } else if self.is_decode() {
            NetworkError::InvalidResponse(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}
