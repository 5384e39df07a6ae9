//! Administrative backend for the gift catalog
//!
//! Category and product CRUD over PostgreSQL, exposed as a JSON API.

pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod validation;

pub use state::AppState;
