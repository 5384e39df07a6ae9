//! Entities and request/response payloads

pub mod category;
pub mod product;
pub mod user;

pub use category::{Category, CategoryRequest, CategoryResponse, NewCategory};
pub use product::{NewProduct, Product, ProductRequest, ProductResponse};
pub use user::{NewUser, User};
