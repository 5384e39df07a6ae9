//! Product service
//!
//! Unlike categories, a duplicate product name is reported together with the
//! field errors of the request as one [`ApiError::Validation`].

use common::error::DatabaseError;
use common::pagination::{Page, PageRequest};
use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    error::{ApiError, ApiResult},
    models::{NewProduct, ProductRequest, ProductResponse},
    repositories::{CategoryRepository, ProductRepository},
    validation::{ValidationErrors, validate_product},
};

#[derive(Clone)]
pub struct ProductService {
    products: Arc<dyn ProductRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl ProductService {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            products,
            categories,
        }
    }

    pub async fn list_products(&self, request: &PageRequest) -> ApiResult<Page<ProductResponse>> {
        let (products, total) = self.products.find_page(request).await?;
        Ok(Page::new(products, request, total).map(ProductResponse::from))
    }

    pub async fn get_product(&self, id: i64) -> ApiResult<ProductResponse> {
        self.products
            .find_by_id(id)
            .await?
            .map(ProductResponse::from)
            .ok_or_else(|| ApiError::NotFound(format!("Product {}", id)))
    }

    /// Names of the categories that currently have products
    pub async fn list_category_names_with_products(&self) -> ApiResult<Vec<String>> {
        Ok(self
            .products
            .find_distinct_category_names_with_products()
            .await?)
    }

    pub async fn create_product(&self, request: &ProductRequest) -> ApiResult<ProductResponse> {
        let new_product = request.to_new_product();

        let mut errors = validate_product(request);
        if self.products.exists_by_name(&new_product.name).await? {
            errors.add_duplicate_name(&new_product.name);
        }
        reject_if_invalid(errors)?;

        self.ensure_category_exists(&new_product).await?;

        let product = self
            .products
            .insert(&new_product)
            .await
            .map_err(|e| write_error(e, &new_product))?;

        info!("Created product {} ({})", product.id, product.name);
        Ok(product.into())
    }

    pub async fn update_product(
        &self,
        id: i64,
        request: &ProductRequest,
    ) -> ApiResult<ProductResponse> {
        let new_product = request.to_new_product();

        let mut errors = validate_product(request);
        if self
            .products
            .exists_by_name_and_id_not(&new_product.name, id)
            .await?
        {
            errors.add_duplicate_name(&new_product.name);
        }
        reject_if_invalid(errors)?;

        self.ensure_category_exists(&new_product).await?;

        let product = self
            .products
            .update(id, &new_product)
            .await
            .map_err(|e| write_error(e, &new_product))?
            .ok_or_else(|| ApiError::NotFound(format!("Product {}", id)))?;

        info!("Updated product {}", product.id);
        Ok(product.into())
    }

    /// Delete a product; the lookup runs first so a missing id has no side effect
    pub async fn delete_product(&self, id: i64) -> ApiResult<()> {
        self.get_product(id).await?;

        if !self.products.delete(id).await? {
            return Err(ApiError::NotFound(format!("Product {}", id)));
        }

        info!("Deleted product {}", id);
        Ok(())
    }

    async fn ensure_category_exists(&self, product: &NewProduct) -> ApiResult<()> {
        if let Some(category_id) = product.category_id {
            if self.categories.find_by_id(category_id).await?.is_none() {
                return Err(ApiError::NotFound(format!("Category {}", category_id)));
            }
        }
        Ok(())
    }
}

fn reject_if_invalid(errors: ValidationErrors) -> ApiResult<()> {
    if errors.has_errors() {
        warn!("Rejected product payload with {} error(s)", errors.len());
        return Err(ApiError::Validation(errors));
    }
    Ok(())
}

/// Constraint violations that slipped past the pre-checks
fn write_error(err: DatabaseError, product: &NewProduct) -> ApiError {
    if err.is_unique_violation() {
        let mut errors = ValidationErrors::new();
        errors.add_duplicate_name(&product.name);
        ApiError::Validation(errors)
    } else if err.is_foreign_key_violation() {
        ApiError::NotFound(format!(
            "Category {}",
            product.category_id.unwrap_or_default()
        ))
    } else {
        ApiError::Database(err)
    }
}
