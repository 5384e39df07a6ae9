//! Custom error types for the admin service

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::error::DatabaseError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::validation::ValidationErrors;

/// Custom error type for the admin service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Requested record does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// Name already used by another record
    #[error("Name '{0}' is already in use")]
    DuplicateName(String),

    /// Category still referenced by products
    #[error("Category {0} is still referenced by products")]
    CategoryInUse(i64),

    /// Field-level validation failures
    #[error("Validation failed")]
    Validation(ValidationErrors),

    /// Request body could not be read
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::DuplicateName(_) | ApiError::CategoryInUse(_) => StatusCode::CONFLICT,
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Database(DatabaseError::UniqueViolation(_))
            | ApiError::Database(DatabaseError::ForeignKeyViolation(_)) => StatusCode::CONFLICT,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            ApiError::Validation(errors) => json!({
                "error": "Validation failed",
                "errors": errors,
            }),
            ApiError::Database(err) => {
                error!("Database error: {}", err);
                let message = if status == StatusCode::CONFLICT {
                    "Constraint violation"
                } else {
                    "Database error"
                };
                json!({ "error": message })
            }
            other => json!({ "error": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
