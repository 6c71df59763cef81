//! Error types for the recipe store and the aggregation service.

use cityinfo_upstream::UpstreamError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecipeStoreError {
    #[error("No recipes for city {0}")]
    NoRecipesForCity(String),

    #[error("Recipe {recipe_id} not found for city {city_id}")]
    RecipeNotFound { city_id: String, recipe_id: u64 },
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Weather not found for city {0}")]
    WeatherNotFound(String),

    #[error(transparent)]
    Recipe(#[from] RecipeStoreError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl ServiceError {
    /// City, weather or recipe absent; everything else is a server fault.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::CityNotFound(_) | Self::WeatherNotFound(_) | Self::Recipe(_)
        )
    }
}
