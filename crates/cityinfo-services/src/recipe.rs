//! Recipe types and content validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum recipe length, in characters.
pub const MIN_CONTENT_CHARS: usize = 10;

/// Maximum recipe length, in characters.
pub const MAX_CONTENT_CHARS: usize = 2000;

/// A user-submitted recipe attached to a city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: u64,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("Content must be at least {} characters", MIN_CONTENT_CHARS)]
    TooShort,

    #[error("Content must not exceed {} characters", MAX_CONTENT_CHARS)]
    TooLong,
}

/// Recipe text whose length has been checked against
/// [`MIN_CONTENT_CHARS`]..=[`MAX_CONTENT_CHARS`].
///
/// Length counts Unicode scalar values, not bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeContent(String);

impl RecipeContent {
    pub fn parse(content: impl Into<String>) -> Result<Self, ContentError> {
        let content = content.into();
        let len = content.chars().count();

        if len < MIN_CONTENT_CHARS {
            return Err(ContentError::TooShort);
        }
        if len > MAX_CONTENT_CHARS {
            return Err(ContentError::TooLong);
        }

        Ok(Self(content))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}
