//! Mapping of service failures onto HTTP responses.

use cityinfo_services::ServiceError;
use serde_json::json;
use thiserror::Error;
use warp::http::StatusCode;
use warp::reply::{Reply, Response};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("City not found")]
    CityNotFound,

    #[error("Recipe not found")]
    RecipeNotFound,

    #[error("Not found")]
    RouteNotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Payload too large")]
    PayloadTooLarge,

    #[error("Content-Length required")]
    LengthRequired,

    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::CityNotFound | Self::RecipeNotFound | Self::RouteNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::LengthRequired => StatusCode::LENGTH_REQUIRED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// `{error}` for client errors, `{error, details}` for server faults.
    pub fn body(&self) -> serde_json::Value {
        match self {
            Self::Internal(details) => json!({
                "error": self.to_string(),
                "details": details,
            }),
            _ => json!({ "error": self.to_string() }),
        }
    }

    pub fn into_response(self) -> Response {
        warp::reply::with_status(warp::reply::json(&self.body()), self.status()).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            // Missing weather is reported the same way as a missing city
            ServiceError::CityNotFound(_) | ServiceError::WeatherNotFound(_) => Self::CityNotFound,
            ServiceError::Recipe(_) => Self::RecipeNotFound,
            ServiceError::Upstream(e) => {
                tracing::warn!("{}: {}", e.summary(), e);
                Self::Internal(e.to_string())
            }
        }
    }
}
