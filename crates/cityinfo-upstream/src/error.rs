//! Upstream-specific error types.

use cityinfo_core::{NetworkError, ReqwestErrorExt};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UpstreamError {
    /// The upstream answered 404.
    #[error("Not found: {url}")]
    NotFound { url: String },

    /// Any other non-success status.
    #[error("Upstream returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Transport failure or timeout.
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    /// Body that is not JSON or does not have the expected shape.
    #[error("Invalid upstream response: {0}")]
    InvalidResponse(String),
}

impl UpstreamError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    /// Short human label for log lines.
    pub fn summary(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "Upstream resource not found",
            Self::Status { status, .. } if *status >= 500 => "Upstream service is failing",
            Self::Status { .. } => "Upstream request was rejected",
            Self::Network(e) => e.summary(),
            Self::InvalidResponse(_) => "Upstream returned an unexpected response",
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.into_network_error())
    }
}
