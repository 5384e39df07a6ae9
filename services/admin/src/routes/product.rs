//! Product endpoints

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use common::pagination::PageRequest;
use serde::Deserialize;

use crate::{
    error::ApiError,
    models::ProductRequest,
    repositories::PRODUCT_SORT_FIELDS,
    state::AppState,
    validation::{CODE_INVALID_VALUE, ValidationErrors},
};

/// Query parameters for product listing
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    /// Zero-based page number
    pub page: Option<i64>,
    /// Number of items per page
    pub size: Option<i64>,
    /// Sort field (`id` or `name`)
    pub sort_by: Option<String>,
    /// Sort order (`asc` or `desc`)
    pub sort_direction: Option<String>,
}

impl ProductListQuery {
    pub fn to_page_request(&self) -> PageRequest {
        PageRequest::from_params(
            self.page,
            self.size,
            self.sort_by.as_deref(),
            self.sort_direction.as_deref(),
            PRODUCT_SORT_FIELDS,
        )
    }
}

/// Unwrap a product body; a well-formed body with wrongly typed fields is
/// reported like any other field error
fn product_body(
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<ProductRequest, ApiError> {
    match payload {
        Ok(Json(request)) => Ok(request),
        Err(JsonRejection::JsonDataError(rejection)) => {
            let mut errors = ValidationErrors::new();
            errors.add("body", CODE_INVALID_VALUE, rejection.body_text());
            Err(ApiError::Validation(errors))
        }
        Err(rejection) => Err(rejection.into()),
    }
}

/// Get products with pagination and sorting
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = state
        .product_service
        .list_products(&query.to_page_request())
        .await?;
    Ok(Json(page))
}

/// Names of categories that have at least one product
pub async fn list_category_names_with_products(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let names = state
        .product_service
        .list_category_names_with_products()
        .await?;
    Ok(Json(names))
}

/// Get a product by ID
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let product = state.product_service.get_product(id).await?;
    Ok(Json(product))
}

/// Create a new product
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let payload = product_body(payload)?;
    let product = state.product_service.create_product(&payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a product
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let payload = product_body(payload)?;
    let product = state.product_service.update_product(id, &payload).await?;
    Ok(Json(product))
}

/// Delete a product
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.product_service.delete_product(id).await?;
    Ok(StatusCode::OK)
}
