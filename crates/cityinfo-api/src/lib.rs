//! HTTP surface of the CityInfo service.
//!
//! Routes:
//! - `GET /cities/{cityId}/infos`
//! - `POST /cities/{cityId}/recipes`
//! - `DELETE /cities/{cityId}/recipes/{recipeId}`
//! - `GET /health`

pub mod error;
pub mod handlers;
pub mod routes;

pub use error::ApiError;
pub use routes::routes;

use std::sync::Arc;

use cityinfo_core::Config;
use cityinfo_services::{CityInfoService, RecipeStore};
use cityinfo_upstream::{UpstreamClient, UpstreamError};

/// State shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub service: CityInfoService,
    pub max_body_bytes: u64,
}

impl AppState {
    pub fn new(service: CityInfoService, max_body_bytes: u64) -> Self {
        Self {
            service,
            max_body_bytes,
        }
    }

    /// Build the upstream client and an empty recipe store from config.
    pub fn from_config(config: &Config) -> Result<Self, UpstreamError> {
        let upstream = UpstreamClient::new(&config.upstream)?;
        let service = CityInfoService::new(upstream, Arc::new(RecipeStore::new()));
        Ok(Self::new(service, config.limits.max_body_bytes))
    }
}
