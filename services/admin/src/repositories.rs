//! Repositories for database operations
//!
//! Each aggregate has a trait so services can be exercised against an
//! in-memory store in tests; the `Pg*` types are the PostgreSQL
//! implementations used by the running service.

use async_trait::async_trait;
use common::error::DatabaseResult;
use common::pagination::PageRequest;

use crate::models::{Category, NewCategory, NewProduct, NewUser, Product, User};

pub mod category;
#[cfg(test)]
pub mod memory;
pub mod product;
pub mod user;

pub use category::PgCategoryRepository;
pub use product::PgProductRepository;
pub use user::PgUserRepository;

/// Fields a product listing may be sorted by
pub const PRODUCT_SORT_FIELDS: &[&str] = &["id", "name"];

/// Category persistence
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories ordered by id
    async fn find_all(&self) -> DatabaseResult<Vec<Category>>;

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Category>>;

    async fn exists_by_name(&self, name: &str) -> DatabaseResult<bool>;

    /// True if a category other than `id` is called `name`
    async fn exists_by_name_and_id_not(&self, name: &str, id: i64) -> DatabaseResult<bool>;

    /// True if at least one product references the category
    async fn has_products(&self, id: i64) -> DatabaseResult<bool>;

    async fn insert(&self, category: &NewCategory) -> DatabaseResult<Category>;

    /// Overwrite a category; `None` if the id does not exist
    async fn update(&self, id: i64, category: &NewCategory) -> DatabaseResult<Option<Category>>;

    /// Delete a category; false if the id did not exist
    async fn delete(&self, id: i64) -> DatabaseResult<bool>;
}

/// Product persistence
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// One page of products and the total product count
    async fn find_page(&self, request: &PageRequest) -> DatabaseResult<(Vec<Product>, i64)>;

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Product>>;

    async fn exists_by_name(&self, name: &str) -> DatabaseResult<bool>;

    /// True if a product other than `id` is called `name`
    async fn exists_by_name_and_id_not(&self, name: &str, id: i64) -> DatabaseResult<bool>;

    /// Distinct names of the categories referenced by at least one product
    async fn find_distinct_category_names_with_products(&self) -> DatabaseResult<Vec<String>>;

    async fn insert(&self, product: &NewProduct) -> DatabaseResult<Product>;

    /// Overwrite a product; `None` if the id does not exist
    async fn update(&self, id: i64, product: &NewProduct) -> DatabaseResult<Option<Product>>;

    /// Delete a product; false if the id did not exist
    async fn delete(&self, id: i64) -> DatabaseResult<bool>;
}

/// User persistence
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn save(&self, user: &NewUser) -> DatabaseResult<User>;

    async fn exists_by_email_and_password(&self, email: &str, password: &str)
    -> DatabaseResult<bool>;

    async fn exists_by_email(&self, email: &str) -> DatabaseResult<bool>;

    async fn exists_by_kakao_id(&self, kakao_id: &str) -> DatabaseResult<bool>;
}
