//! In-memory recipe storage keyed by city id.
//!
//! One `RecipeStore` is built per process and shared behind an `Arc`. All
//! mutations go through a single mutex, so concurrent creates and deletes
//! against the same city never lose updates.

use std::collections::HashMap;

use chrono::Utc;
use parking_lot::Mutex;

use crate::error::RecipeStoreError;
use crate::recipe::{Recipe, RecipeContent};

#[derive(Debug, Default)]
struct StoreInner {
    recipes: HashMap<String, Vec<Recipe>>,
    last_id: u64,
}

impl StoreInner {
    /// Creation time in epoch milliseconds, bumped past the previous id so
    /// ids stay unique within the store even when created in the same
    /// millisecond.
    fn next_id(&mut self) -> u64 {
        let now_ms = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let id = now_ms.max(self.last_id + 1);
        self.last_id = id;
        id
    }
}

#[derive(Debug, Default)]
pub struct RecipeStore {
    inner: Mutex<StoreInner>,
}

impl RecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a recipe to the city's collection, creating the collection on
    /// first use. City existence is the caller's concern.
    pub fn add(&self, city_id: &str, content: RecipeContent) -> Recipe {
        let mut inner = self.inner.lock();
        let recipe = Recipe {
            id: inner.next_id(),
            content: content.into_inner(),
        };

        inner
            .recipes
            .entry(city_id.to_string())
            .or_default()
            .push(recipe.clone());

        tracing::debug!("Stored recipe {} for city {}", recipe.id, city_id);
        recipe
    }

    /// Remove the first recipe with `recipe_id` from the city's collection.
    ///
    /// # Errors
    /// `NoRecipesForCity` if the city never had a recipe, `RecipeNotFound`
    /// if no entry matches.
    pub fn remove(&self, city_id: &str, recipe_id: u64) -> Result<(), RecipeStoreError> {
        let mut inner = self.inner.lock();
        let recipes = inner
            .recipes
            .get_mut(city_id)
            .ok_or_else(|| RecipeStoreError::NoRecipesForCity(city_id.to_string()))?;

        let index = recipes
            .iter()
            .position(|r| r.id == recipe_id)
            .ok_or_else(|| RecipeStoreError::RecipeNotFound {
                city_id: city_id.to_string(),
                recipe_id,
            })?;

        recipes.remove(index);
        tracing::debug!("Removed recipe {} for city {}", recipe_id, city_id);
        Ok(())
    }

    /// Recipes for the city in insertion order; empty if none.
    pub fn list_for(&self, city_id: &str) -> Vec<Recipe> {
        self.inner
            .lock()
            .recipes
            .get(city_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Total recipes across all cities.
    pub fn len(&self) -> usize {
        self.inner.lock().recipes.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
