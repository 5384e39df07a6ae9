//! Business logic between the HTTP handlers and the repositories

pub mod category;
pub mod product;

pub use category::CategoryService;
pub use product::ProductService;
