//! In-memory repositories for tests
//!
//! Mirrors the schema constraints the services rely on: unique names,
//! `ON DELETE RESTRICT` from products to categories, and unique user
//! emails and Kakao ids.

use async_trait::async_trait;
use chrono::Utc;
use common::error::{DatabaseError, DatabaseResult};
use common::pagination::{PageRequest, SortDirection};
use std::sync::{Arc, Mutex, MutexGuard};

use super::{CategoryRepository, ProductRepository, UserRepository};
use crate::models::{Category, NewCategory, NewProduct, NewUser, Product, User};

#[derive(Default)]
struct State {
    next_id: i64,
    categories: Vec<Category>,
    products: Vec<Product>,
    users: Vec<User>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn category_name(&self, id: Option<i64>) -> DatabaseResult<Option<String>> {
        match id {
            None => Ok(None),
            Some(id) => self
                .categories
                .iter()
                .find(|c| c.id == id)
                .map(|c| Some(c.name.clone()))
                .ok_or_else(|| {
                    DatabaseError::ForeignKeyViolation("products_category_id_fkey".into())
                }),
        }
    }
}

/// Shared store implementing every repository trait
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("memory store poisoned")
    }

    pub fn category_count(&self) -> usize {
        self.lock().categories.len()
    }

    pub fn product_count(&self) -> usize {
        self.lock().products.len()
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn find_all(&self) -> DatabaseResult<Vec<Category>> {
        Ok(self.lock().categories.clone())
    }

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Category>> {
        Ok(self.lock().categories.iter().find(|c| c.id == id).cloned())
    }

    async fn exists_by_name(&self, name: &str) -> DatabaseResult<bool> {
        Ok(self.lock().categories.iter().any(|c| c.name == name))
    }

    async fn exists_by_name_and_id_not(&self, name: &str, id: i64) -> DatabaseResult<bool> {
        Ok(self
            .lock()
            .categories
            .iter()
            .any(|c| c.name == name && c.id != id))
    }

    async fn has_products(&self, id: i64) -> DatabaseResult<bool> {
        Ok(self
            .lock()
            .products
            .iter()
            .any(|p| p.category_id == Some(id)))
    }

    async fn insert(&self, category: &NewCategory) -> DatabaseResult<Category> {
        let mut state = self.lock();
        if state.categories.iter().any(|c| c.name == category.name) {
            return Err(DatabaseError::UniqueViolation("categories_name_key".into()));
        }

        let now = Utc::now();
        let category = Category {
            id: state.next_id(),
            name: category.name.clone(),
            color: category.color.clone(),
            image_url: category.image_url.clone(),
            description: category.description.clone(),
            created_at: now,
            updated_at: now,
        };
        state.categories.push(category.clone());
        Ok(category)
    }

    async fn update(&self, id: i64, category: &NewCategory) -> DatabaseResult<Option<Category>> {
        let mut state = self.lock();
        if state
            .categories
            .iter()
            .any(|c| c.name == category.name && c.id != id)
        {
            return Err(DatabaseError::UniqueViolation("categories_name_key".into()));
        }

        let Some(existing) = state.categories.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        existing.name = category.name.clone();
        existing.color = category.color.clone();
        existing.image_url = category.image_url.clone();
        existing.description = category.description.clone();
        existing.updated_at = Utc::now();
        let updated = existing.clone();

        for product in state.products.iter_mut() {
            if product.category_id == Some(id) {
                product.category_name = Some(updated.name.clone());
            }
        }

        Ok(Some(updated))
    }

    async fn delete(&self, id: i64) -> DatabaseResult<bool> {
        let mut state = self.lock();
        if state.products.iter().any(|p| p.category_id == Some(id)) {
            return Err(DatabaseError::ForeignKeyViolation(
                "products_category_id_fkey".into(),
            ));
        }

        let before = state.categories.len();
        state.categories.retain(|c| c.id != id);
        Ok(state.categories.len() < before)
    }
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn find_page(&self, request: &PageRequest) -> DatabaseResult<(Vec<Product>, i64)> {
        let state = self.lock();
        let mut products = state.products.clone();

        products.sort_by(|a, b| {
            let ordering = match request.sort_by.as_str() {
                "name" => a.name.cmp(&b.name),
                _ => a.id.cmp(&b.id),
            };
            let ordering = match request.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            };
            ordering.then(a.id.cmp(&b.id))
        });

        let total = products.len() as i64;
        let content = products
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.limit() as usize)
            .collect();

        Ok((content, total))
    }

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Product>> {
        Ok(self.lock().products.iter().find(|p| p.id == id).cloned())
    }

    async fn exists_by_name(&self, name: &str) -> DatabaseResult<bool> {
        Ok(self.lock().products.iter().any(|p| p.name == name))
    }

    async fn exists_by_name_and_id_not(&self, name: &str, id: i64) -> DatabaseResult<bool> {
        Ok(self
            .lock()
            .products
            .iter()
            .any(|p| p.name == name && p.id != id))
    }

    async fn find_distinct_category_names_with_products(&self) -> DatabaseResult<Vec<String>> {
        let mut names: Vec<String> = self
            .lock()
            .products
            .iter()
            .filter_map(|p| p.category_name.clone())
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    async fn insert(&self, product: &NewProduct) -> DatabaseResult<Product> {
        let mut state = self.lock();
        if state.products.iter().any(|p| p.name == product.name) {
            return Err(DatabaseError::UniqueViolation("products_name_key".into()));
        }
        let category_name = state.category_name(product.category_id)?;

        let now = Utc::now();
        let product = Product {
            id: state.next_id(),
            name: product.name.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
            category_id: product.category_id,
            category_name,
            created_at: now,
            updated_at: now,
        };
        state.products.push(product.clone());
        Ok(product)
    }

    async fn update(&self, id: i64, product: &NewProduct) -> DatabaseResult<Option<Product>> {
        let mut state = self.lock();
        if state
            .products
            .iter()
            .any(|p| p.name == product.name && p.id != id)
        {
            return Err(DatabaseError::UniqueViolation("products_name_key".into()));
        }
        let category_name = state.category_name(product.category_id)?;

        let Some(existing) = state.products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        existing.name = product.name.clone();
        existing.price = product.price;
        existing.image_url = product.image_url.clone();
        existing.category_id = product.category_id;
        existing.category_name = category_name;
        existing.updated_at = Utc::now();

        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: i64) -> DatabaseResult<bool> {
        let mut state = self.lock();
        let before = state.products.len();
        state.products.retain(|p| p.id != id);
        Ok(state.products.len() < before)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn save(&self, user: &NewUser) -> DatabaseResult<User> {
        let mut state = self.lock();
        let (email, password, kakao_id) = user.columns();

        let taken = state.users.iter().any(|u| {
            (email.is_some() && u.email.as_deref() == email)
                || (kakao_id.is_some() && u.kakao_id.as_deref() == kakao_id)
        });
        if taken {
            return Err(DatabaseError::UniqueViolation("users_email_key".into()));
        }

        let user = User {
            id: state.next_id(),
            email: email.map(str::to_string),
            password: password.map(str::to_string),
            kakao_id: kakao_id.map(str::to_string),
            created_at: Utc::now(),
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn exists_by_email_and_password(
        &self,
        email: &str,
        password: &str,
    ) -> DatabaseResult<bool> {
        Ok(self.lock().users.iter().any(|u| {
            u.email.as_deref() == Some(email) && u.password.as_deref() == Some(password)
        }))
    }

    async fn exists_by_email(&self, email: &str) -> DatabaseResult<bool> {
        Ok(self
            .lock()
            .users
            .iter()
            .any(|u| u.email.as_deref() == Some(email)))
    }

    async fn exists_by_kakao_id(&self, kakao_id: &str) -> DatabaseResult<bool> {
        Ok(self
            .lock()
            .users
            .iter()
            .any(|u| u.kakao_id.as_deref() == Some(kakao_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_local_user() {
        let store = MemoryStore::new();
        let user = store
            .save(&NewUser::local("admin@email.com", "1234"))
            .await
            .unwrap();

        assert_eq!(user.email.as_deref(), Some("admin@email.com"));
        assert_eq!(user.password.as_deref(), Some("1234"));
        assert_eq!(user.kakao_id, None);
    }

    #[tokio::test]
    async fn test_exists_by_email_and_password() {
        let store = MemoryStore::new();
        store
            .save(&NewUser::local("admin@email.com", "1234"))
            .await
            .unwrap();

        assert!(
            store
                .exists_by_email_and_password("admin@email.com", "1234")
                .await
                .unwrap()
        );
        assert!(
            !store
                .exists_by_email_and_password("admin@email.com", "2222")
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_exists_by_email() {
        let store = MemoryStore::new();
        store
            .save(&NewUser::local("admin@email.com", "1234"))
            .await
            .unwrap();

        assert!(store.exists_by_email("admin@email.com").await.unwrap());
        assert!(!store.exists_by_email("example@email.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let store = MemoryStore::new();
        store
            .save(&NewUser::local("admin@email.com", "1234"))
            .await
            .unwrap();

        let err = store
            .save(&NewUser::local("admin@email.com", "5678"))
            .await
            .unwrap_err();
        assert!(err.is_unique_violation());
    }

    #[tokio::test]
    async fn test_kakao_user_is_not_found_by_email() {
        let store = MemoryStore::new();
        store.save(&NewUser::kakao("3141592653")).await.unwrap();

        assert!(store.exists_by_kakao_id("3141592653").await.unwrap());
        assert!(!store.exists_by_email("").await.unwrap());
    }
}
