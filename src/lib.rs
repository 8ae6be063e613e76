//! Bookstore Catalog Administration Server
//!
//! A Rust REST backend for managing a bookstore catalog: books and
//! categories with pagination, filtering, and capability-gated mutation.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
