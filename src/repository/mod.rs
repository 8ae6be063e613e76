//! Repository layer for database operations

pub mod books;
pub mod categories;

use sqlx::{Pool, Postgres};

/// Main repository struct holding the database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub books: books::BooksRepository,
    pub categories: categories::CategoriesRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone()),
            categories: categories::CategoriesRepository::new(pool.clone()),
            pool,
        }
    }
}
