//! Data models for the bookstore catalog

pub mod auth;
pub mod book;
pub mod category;

// Re-export commonly used types
pub use auth::StaffClaims;
pub use book::{Book, BookQuery, BookResponse, CreateBookRequest, UpdateBookRequest};
pub use category::{
    Category, CategoryQuery, CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest,
};
