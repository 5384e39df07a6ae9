//! Product model and payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Product entity, joined with the name of its category
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: i32,
    pub image_url: String,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Column values written on insert and update
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: i32,
    pub image_url: String,
    pub category_id: Option<i64>,
}

/// Request body for product create/update
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductRequest {
    pub name: String,
    pub price: Option<i32>,
    pub image_url: String,
    pub category_id: Option<i64>,
}

impl ProductRequest {
    /// Trimmed column values; a missing price becomes 0, so only write
    /// these after [`validate_product`] accepted the request
    ///
    /// [`validate_product`]: crate::validation::validate_product
    pub fn to_new_product(&self) -> NewProduct {
        NewProduct {
            name: self.name.trim().to_string(),
            price: self.price.unwrap_or_default(),
            image_url: self.image_url.trim().to_string(),
            category_id: self.category_id,
        }
    }
}

/// Product as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub price: i32,
    pub image_url: String,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            image_url: product.image_url,
            category_id: product.category_id,
            category_name: product.category_name,
        }
    }
}
