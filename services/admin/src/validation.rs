//! Input validation utilities
//!
//! Validators push every problem they find into a [`ValidationErrors`]
//! collection so a caller sees all field errors in one response.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

use crate::models::{CategoryRequest, ProductRequest};

pub const CATEGORY_NAME_MAX_LENGTH: usize = 255;
pub const CATEGORY_COLOR_MAX_LENGTH: usize = 7;
pub const PRODUCT_NAME_MAX_LENGTH: usize = 15;
/// Brand term that may not appear in product names
pub const RESERVED_PRODUCT_TERM: &str = "카카오";

pub const CODE_REQUIRED: &str = "required";
pub const CODE_TOO_LONG: &str = "too_long";
pub const CODE_INVALID_CHARACTERS: &str = "invalid_characters";
pub const CODE_RESERVED_TERM: &str = "reserved_term";
pub const CODE_NEGATIVE: &str = "negative";
pub const CODE_INVALID_VALUE: &str = "invalid_value";
pub const CODE_DUPLICATE_NAME: &str = "duplicate_name";

/// A single field-level problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub code: String,
    pub message: String,
}

/// Accumulated field errors
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, code: &str, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.to_string(),
            code: code.to_string(),
            message: message.into(),
        });
    }

    /// Record that `name` is already taken
    pub fn add_duplicate_name(&mut self, name: &str) {
        self.add(
            "name",
            CODE_DUPLICATE_NAME,
            format!("Name '{}' is already in use", name),
        );
    }

    pub fn has_errors(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// True if some error carries `code`
    pub fn contains_code(&self, code: &str) -> bool {
        self.0.iter().any(|e| e.code == code)
    }
}

fn check_required(errors: &mut ValidationErrors, field: &str, value: &str) -> bool {
    if value.trim().is_empty() {
        errors.add(field, CODE_REQUIRED, format!("{} is required", field));
        return false;
    }
    true
}

fn check_max_length(errors: &mut ValidationErrors, field: &str, value: &str, max: usize) {
    if value.trim().chars().count() > max {
        errors.add(
            field,
            CODE_TOO_LONG,
            format!("{} must be at most {} characters long", field, max),
        );
    }
}

/// Validate a category payload
pub fn validate_category(request: &CategoryRequest) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if check_required(&mut errors, "name", &request.name) {
        check_max_length(&mut errors, "name", &request.name, CATEGORY_NAME_MAX_LENGTH);
    }

    if check_required(&mut errors, "color", &request.color) {
        check_max_length(
            &mut errors,
            "color",
            &request.color,
            CATEGORY_COLOR_MAX_LENGTH,
        );
    }

    errors
}

/// Validate a product payload
///
/// Name uniqueness needs the database and is checked by the product service.
pub fn validate_product(request: &ProductRequest) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if check_required(&mut errors, "name", &request.name) {
        let name = request.name.trim();
        check_max_length(&mut errors, "name", name, PRODUCT_NAME_MAX_LENGTH);

        static PRODUCT_NAME_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = PRODUCT_NAME_REGEX.get_or_init(|| {
            Regex::new(r"^[\p{L}\p{N} ()\[\]+\-&/_]+$")
                .expect("Failed to compile product name regex")
        });

        if !regex.is_match(name) {
            errors.add(
                "name",
                CODE_INVALID_CHARACTERS,
                "name can only contain letters, digits, spaces and ( ) [ ] + - & / _",
            );
        }

        if name.contains(RESERVED_PRODUCT_TERM) {
            errors.add(
                "name",
                CODE_RESERVED_TERM,
                format!(
                    "name may not contain '{}' without prior approval",
                    RESERVED_PRODUCT_TERM
                ),
            );
        }
    }

    match request.price {
        None => errors.add("price", CODE_REQUIRED, "price is required"),
        Some(price) if price < 0 => {
            errors.add("price", CODE_NEGATIVE, "price must not be negative")
        }
        Some(_) => {}
    }

    check_required(&mut errors, "imageUrl", &request.image_url);

    errors
}
