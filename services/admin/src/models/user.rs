//! User model
//!
//! A user signs up either with an email/password pair or with a Kakao account
//! id, never both.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// User entity
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct User {
    pub id: i64,
    pub email: Option<String>,
    pub password: Option<String>,
    pub kakao_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// New user registration
#[derive(Debug, Clone, PartialEq)]
pub enum NewUser {
    Local { email: String, password: String },
    Kakao { kakao_id: String },
}

impl NewUser {
    pub fn local(email: impl Into<String>, password: impl Into<String>) -> Self {
        NewUser::Local {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn kakao(kakao_id: impl Into<String>) -> Self {
        NewUser::Kakao {
            kakao_id: kakao_id.into(),
        }
    }

    /// `(email, password, kakao_id)` column values
    pub fn columns(&self) -> (Option<&str>, Option<&str>, Option<&str>) {
        match self {
            NewUser::Local { email, password } => {
                (Some(email.as_str()), Some(password.as_str()), None)
            }
            NewUser::Kakao { kakao_id } => (None, None, Some(kakao_id.as_str())),
        }
    }
}
