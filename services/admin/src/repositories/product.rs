//! PostgreSQL product repository

use async_trait::async_trait;
use common::error::DatabaseResult;
use common::pagination::PageRequest;
use sqlx::PgPool;
use tracing::info;

use super::ProductRepository;
use crate::models::{NewProduct, Product};

/// Product columns joined with the category name; expects `p` and `c` aliases
const PRODUCT_COLUMNS: &str = "p.id, p.name, p.price, p.image_url, p.category_id, \
     c.name AS category_name, p.created_at, p.updated_at";

/// Product repository
#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    /// Create a new product repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map an allow-listed sort field to its column
fn sort_column(sort_by: &str) -> &'static str {
    match sort_by {
        "name" => "p.name",
        _ => "p.id",
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_page(&self, request: &PageRequest) -> DatabaseResult<(Vec<Product>, i64)> {
        let products = sqlx::query_as::<_, Product>(&format!(
            r#"
            SELECT {}
            FROM products p
            LEFT JOIN categories c ON c.id = p.category_id
            ORDER BY {} {}, p.id ASC
            LIMIT $1 OFFSET $2
            "#,
            PRODUCT_COLUMNS,
            sort_column(&request.sort_by),
            request.direction.as_sql()
        ))
        .bind(request.limit())
        .bind(request.offset())
        .fetch_all(&self.pool)
        .await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok((products, count))
    }

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            SELECT {}
            FROM products p
            LEFT JOIN categories c ON c.id = p.category_id
            WHERE p.id = $1
            "#,
            PRODUCT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn exists_by_name(&self, name: &str) -> DatabaseResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM products WHERE name = $1)")
                .bind(name)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn exists_by_name_and_id_not(&self, name: &str, id: i64) -> DatabaseResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM products WHERE name = $1 AND id <> $2)",
        )
        .bind(name)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn find_distinct_category_names_with_products(&self) -> DatabaseResult<Vec<String>> {
        let names: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT DISTINCT c.name
            FROM products p
            JOIN categories c ON c.id = p.category_id
            ORDER BY c.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(names)
    }

    async fn insert(&self, product: &NewProduct) -> DatabaseResult<Product> {
        info!("Creating new product: {}", product.name);

        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            WITH p AS (
                INSERT INTO products (name, price, image_url, category_id)
                VALUES ($1, $2, $3, $4)
                RETURNING *
            )
            SELECT {}
            FROM p
            LEFT JOIN categories c ON c.id = p.category_id
            "#,
            PRODUCT_COLUMNS
        ))
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.image_url)
        .bind(product.category_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    async fn update(&self, id: i64, product: &NewProduct) -> DatabaseResult<Option<Product>> {
        info!("Updating product {}", id);

        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            WITH p AS (
                UPDATE products
                SET name = $1, price = $2, image_url = $3, category_id = $4, updated_at = NOW()
                WHERE id = $5
                RETURNING *
            )
            SELECT {}
            FROM p
            LEFT JOIN categories c ON c.id = p.category_id
            "#,
            PRODUCT_COLUMNS
        ))
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.image_url)
        .bind(product.category_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn delete(&self, id: i64) -> DatabaseResult<bool> {
        info!("Deleting product {}", id);

        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
