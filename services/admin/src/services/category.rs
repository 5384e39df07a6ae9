//! Category service
//!
//! Duplicate names fail immediately with [`ApiError::DuplicateName`].

use common::error::DatabaseError;
use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    error::{ApiError, ApiResult},
    models::{CategoryRequest, CategoryResponse},
    repositories::CategoryRepository,
    validation::validate_category,
};

#[derive(Clone)]
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryRepository>) -> Self {
        Self { categories }
    }

    pub async fn list_categories(&self) -> ApiResult<Vec<CategoryResponse>> {
        let categories = self.categories.find_all().await?;
        Ok(categories.into_iter().map(CategoryResponse::from).collect())
    }

    pub async fn get_category(&self, id: i64) -> ApiResult<CategoryResponse> {
        self.categories
            .find_by_id(id)
            .await?
            .map(CategoryResponse::from)
            .ok_or_else(|| ApiError::NotFound(format!("Category {}", id)))
    }

    pub async fn create_category(&self, request: &CategoryRequest) -> ApiResult<CategoryResponse> {
        let errors = validate_category(request);
        if errors.has_errors() {
            return Err(ApiError::Validation(errors));
        }

        let new_category = request.to_new_category();
        if self.categories.exists_by_name(&new_category.name).await? {
            warn!("Rejected duplicate category name: {}", new_category.name);
            return Err(ApiError::DuplicateName(new_category.name));
        }

        let category = self
            .categories
            .insert(&new_category)
            .await
            .map_err(|e| duplicate_or(e, &new_category.name))?;

        info!("Created category {} ({})", category.id, category.name);
        Ok(category.into())
    }

    pub async fn update_category(
        &self,
        id: i64,
        request: &CategoryRequest,
    ) -> ApiResult<CategoryResponse> {
        let errors = validate_category(request);
        if errors.has_errors() {
            return Err(ApiError::Validation(errors));
        }

        let new_category = request.to_new_category();
        if self
            .categories
            .exists_by_name_and_id_not(&new_category.name, id)
            .await?
        {
            warn!("Rejected duplicate category name: {}", new_category.name);
            return Err(ApiError::DuplicateName(new_category.name));
        }

        let category = self
            .categories
            .update(id, &new_category)
            .await
            .map_err(|e| duplicate_or(e, &new_category.name))?
            .ok_or_else(|| ApiError::NotFound(format!("Category {}", id)))?;

        info!("Updated category {}", category.id);
        Ok(category.into())
    }

    /// Delete a category that no product references
    pub async fn delete_category(&self, id: i64) -> ApiResult<()> {
        if self.categories.find_by_id(id).await?.is_none() {
            return Err(ApiError::NotFound(format!("Category {}", id)));
        }

        if self.categories.has_products(id).await? {
            warn!("Refusing to delete category {} with products", id);
            return Err(ApiError::CategoryInUse(id));
        }

        let deleted = self.categories.delete(id).await.map_err(|e| {
            if e.is_foreign_key_violation() {
                ApiError::CategoryInUse(id)
            } else {
                ApiError::Database(e)
            }
        })?;

        if !deleted {
            return Err(ApiError::NotFound(format!("Category {}", id)));
        }

        info!("Deleted category {}", id);
        Ok(())
    }
}

/// A unique violation that slipped past the pre-check is still a duplicate
fn duplicate_or(err: DatabaseError, name: &str) -> ApiError {
    if err.is_unique_violation() {
        ApiError::DuplicateName(name.to_string())
    } else {
        ApiError::Database(err)
    }
}
