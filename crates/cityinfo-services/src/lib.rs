pub mod city_info;
pub mod error;
pub mod recipe;
pub mod recipe_store;

pub use city_info::{CityInfoResponse, CityInfoService};
pub use error::{RecipeStoreError, ServiceError};
pub use recipe::{ContentError, Recipe, RecipeContent, MAX_CONTENT_CHARS, MIN_CONTENT_CHARS};
pub use recipe_store::RecipeStore;
