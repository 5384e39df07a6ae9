//! PostgreSQL user repository

use async_trait::async_trait;
use common::error::DatabaseResult;
use sqlx::PgPool;
use tracing::info;

use super::UserRepository;
use crate::models::{NewUser, User};

/// User repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn save(&self, user: &NewUser) -> DatabaseResult<User> {
        let (email, password, kakao_id) = user.columns();
        info!(
            "Creating new {} user",
            if kakao_id.is_some() { "kakao" } else { "local" }
        );

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password, kakao_id)
            VALUES ($1, $2, $3)
            RETURNING id, email, password, kakao_id, created_at
            "#,
        )
        .bind(email)
        .bind(password)
        .bind(kakao_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn exists_by_email_and_password(
        &self,
        email: &str,
        password: &str,
    ) -> DatabaseResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM users WHERE email = $1 AND password = $2)",
        )
        .bind(email)
        .bind(password)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn exists_by_email(&self, email: &str) -> DatabaseResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn exists_by_kakao_id(&self, kakao_id: &str) -> DatabaseResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE kakao_id = $1)")
                .bind(kakao_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}
