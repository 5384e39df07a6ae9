//! Category model and payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Category entity
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub image_url: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Column values written on insert and update
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub name: String,
    pub color: String,
    pub image_url: String,
    pub description: String,
}

/// Request body for category create/update
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryRequest {
    pub name: String,
    pub color: String,
    pub image_url: String,
    pub description: String,
}

impl CategoryRequest {
    /// Trimmed column values for the repository
    pub fn to_new_category(&self) -> NewCategory {
        NewCategory {
            name: self.name.trim().to_string(),
            color: self.color.trim().to_string(),
            image_url: self.image_url.trim().to_string(),
            description: self.description.trim().to_string(),
        }
    }
}

/// Category as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub image_url: String,
    pub description: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            color: category.color,
            image_url: category.image_url,
            description: category.description,
        }
    }
}
