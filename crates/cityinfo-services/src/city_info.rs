//! Aggregation of upstream city and weather data with local recipes.

use std::sync::Arc;

use cityinfo_upstream::{Coordinates, Population, UpstreamClient, UpstreamError, WeatherPrediction};
use serde::Serialize;
use tracing::instrument;

use crate::error::ServiceError;
use crate::recipe::{Recipe, RecipeContent};
use crate::recipe_store::RecipeStore;

/// Body of `GET /cities/{id}/infos`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityInfoResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population: Option<Population>,
    pub known_for: Vec<String>,
    pub weather_predictions: [WeatherPrediction; 2],
    pub recipes: Vec<Recipe>,
}

#[derive(Debug, Clone)]
pub struct CityInfoService {
    upstream: UpstreamClient,
    store: Arc<RecipeStore>,
}

impl CityInfoService {
    pub fn new(upstream: UpstreamClient, store: Arc<RecipeStore>) -> Self {
        Self { upstream, store }
    }

    pub fn store(&self) -> &RecipeStore {
        &self.store
    }

    pub fn upstream_base_url(&self) -> &str {
        self.upstream.base_url()
    }

    /// Merge city metadata, the two-day forecast and stored recipes.
    ///
    /// The city is fetched first; if it is unknown the Weather API is not
    /// called. Any failure fails the whole request.
    #[instrument(skip(self), level = "info")]
    pub async fn get_city_info(&self, city_id: &str) -> Result<CityInfoResponse, ServiceError> {
        let city = self
            .upstream
            .get_city(city_id)
            .await
            .map_err(|e| not_found_as(e, || ServiceError::CityNotFound(city_id.to_string())))?;

        let weather = self
            .upstream
            .get_weather(city_id)
            .await
            .map_err(|e| not_found_as(e, || ServiceError::WeatherNotFound(city_id.to_string())))?;

        Ok(CityInfoResponse {
            coordinates: city.coordinates,
            population: city.population,
            known_for: city.known_for,
            weather_predictions: weather.predictions(),
            recipes: self.store.list_for(city_id),
        })
    }

    /// Confirm the City API knows `city_id`.
    #[instrument(skip(self), level = "debug")]
    pub async fn ensure_city_exists(&self, city_id: &str) -> Result<(), ServiceError> {
        self.upstream
            .get_city(city_id)
            .await
            .map(|_| ())
            .map_err(|e| not_found_as(e, || ServiceError::CityNotFound(city_id.to_string())))
    }

    /// Store a recipe for an existing city.
    pub async fn create_recipe(
        &self,
        city_id: &str,
        content: RecipeContent,
    ) -> Result<Recipe, ServiceError> {
        self.ensure_city_exists(city_id).await?;
        let recipe = self.store.add(city_id, content);
        tracing::info!("Created recipe {} for city {}", recipe.id, city_id);
        Ok(recipe)
    }

    /// Delete a recipe of an existing city.
    pub async fn delete_recipe(&self, city_id: &str, recipe_id: u64) -> Result<(), ServiceError> {
        self.ensure_city_exists(city_id).await?;
        self.store.remove(city_id, recipe_id)?;
        tracing::info!("Deleted recipe {} for city {}", recipe_id, city_id);
        Ok(())
    }
}

fn not_found_as(err: UpstreamError, not_found: impl FnOnce() -> ServiceError) -> ServiceError {
    if err.is_not_found() {
        not_found()
    } else {
        ServiceError::Upstream(err)
    }
}
