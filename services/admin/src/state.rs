//! Application state shared across handlers

use sqlx::PgPool;
use std::sync::Arc;

use crate::{
    repositories::{CategoryRepository, PgCategoryRepository, PgProductRepository, ProductRepository},
    services::{CategoryService, ProductService},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub category_service: CategoryService,
    pub product_service: ProductService,
}

impl AppState {
    /// Wire the services to the given repositories
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        products: Arc<dyn ProductRepository>,
    ) -> Self {
        Self {
            category_service: CategoryService::new(categories.clone()),
            product_service: ProductService::new(products, categories),
        }
    }

    /// State backed by PostgreSQL
    pub fn from_pool(pool: PgPool) -> Self {
        Self::new(
            Arc::new(PgCategoryRepository::new(pool.clone())),
            Arc::new(PgProductRepository::new(pool)),
        )
    }
}
