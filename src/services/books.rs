//! Book catalog service.
//!
//! Owns the business rules: ISBN uniqueness, category existence/activity
//! checks, stock arithmetic. Every multi-step mutation runs inside a single
//! transaction so validations and writes commit or roll back together.

use std::collections::HashMap;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookQuery, BookResponse, CreateBookRequest, UpdateBookRequest},
        category::CategoryResponse,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all books ordered by title
    pub async fn list(&self, page: i64, size: i64) -> AppResult<(Vec<BookResponse>, i64)> {
        let (books, total) = self.repository.books.list(page, size).await?;
        Ok((self.to_responses(books).await?, total))
    }

    /// Search books with filters
    pub async fn search(&self, query: &BookQuery) -> AppResult<(Vec<BookResponse>, i64)> {
        let (books, total) = self.repository.books.search(query).await?;
        Ok((self.to_responses(books).await?, total))
    }

    /// List books in a category; the category must exist
    pub async fn list_by_category(
        &self,
        category_id: i64,
        page: i64,
        size: i64,
    ) -> AppResult<(Vec<BookResponse>, i64)> {
        if !self.repository.categories.exists(category_id).await? {
            return Err(AppError::NotFound(format!(
                "Category not found with id: {}",
                category_id
            )));
        }
        let (books, total) = self
            .repository
            .books
            .list_by_category(category_id, page, size)
            .await?;
        Ok((self.to_responses(books).await?, total))
    }

    /// Get a book by ID with its category embedded
    pub async fn get_by_id(&self, id: i64) -> AppResult<BookResponse> {
        let book = self.repository.books.get_by_id(&self.repository.pool, id).await?;
        let category = self
            .repository
            .categories
            .get_by_id(&self.repository.pool, book.category_id)
            .await?;
        Ok(book.into_response(Some(category.into_response())))
    }

    /// Create a new book
    pub async fn create(&self, req: &CreateBookRequest) -> AppResult<BookResponse> {
        req.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let mut tx = self.repository.pool.begin().await?;

        self.validate_book_data(&mut tx, req.isbn.as_deref(), None, req.category_id)
            .await?;

        let book = self.repository.books.insert(&mut *tx, req).await?;
        // Re-fetch so the embedded book_count includes the new row
        let category = self
            .repository
            .categories
            .get_by_id(&mut *tx, book.category_id)
            .await?;

        tx.commit().await?;
        Ok(book.into_response(Some(category.into_response())))
    }

    /// Update an existing book
    pub async fn update(&self, id: i64, req: &UpdateBookRequest) -> AppResult<BookResponse> {
        req.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let mut tx = self.repository.pool.begin().await?;

        // NotFound before any uniqueness complaint
        self.repository.books.get_by_id(&mut *tx, id).await?;
        self.validate_book_data(&mut tx, req.isbn.as_deref(), Some(id), req.category_id)
            .await?;

        let book = self.repository.books.update(&mut *tx, id, req).await?;
        let category = self
            .repository
            .categories
            .get_by_id(&mut *tx, book.category_id)
            .await?;

        tx.commit().await?;
        Ok(book.into_response(Some(category.into_response())))
    }

    /// Delete a book (unconditional hard delete)
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.books.delete(&self.repository.pool, id).await
    }

    /// Flip the availability flag
    pub async fn toggle_availability(&self, id: i64) -> AppResult<()> {
        self.repository
            .books
            .toggle_availability(&self.repository.pool, id)
            .await
    }

    /// Set the stock quantity to an absolute value
    pub async fn set_stock(&self, id: i64, quantity: i32) -> AppResult<()> {
        if quantity < 0 {
            return Err(AppError::BadRequest(
                "Stock quantity cannot be negative".to_string(),
            ));
        }
        self.repository
            .books
            .set_stock(&self.repository.pool, id, quantity)
            .await
    }

    /// Decrease stock; rejects when the requested quantity exceeds the stock
    pub async fn decrease_stock(&self, id: i64, quantity: i32) -> AppResult<()> {
        if quantity <= 0 {
            return Err(AppError::BadRequest(
                "Quantity must be greater than 0".to_string(),
            ));
        }

        let mut tx = self.repository.pool.begin().await?;
        let book = self.repository.books.get_by_id(&mut *tx, id).await?;
        if book.stock_quantity < quantity {
            return Err(AppError::BadRequest(format!(
                "Insufficient stock. Available: {}, Requested: {}",
                book.stock_quantity, quantity
            )));
        }
        self.repository
            .books
            .set_stock(&mut *tx, id, book.stock_quantity - quantity)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    /// Increase stock
    pub async fn increase_stock(&self, id: i64, quantity: i32) -> AppResult<()> {
        if quantity <= 0 {
            return Err(AppError::BadRequest(
                "Quantity must be greater than 0".to_string(),
            ));
        }

        let mut tx = self.repository.pool.begin().await?;
        let book = self.repository.books.get_by_id(&mut *tx, id).await?;
        self.repository
            .books
            .set_stock(&mut *tx, id, book.stock_quantity + quantity)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    /// Shared create/update validation: ISBN uniqueness (only when supplied)
    /// and category existence + activity.
    async fn validate_book_data(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        isbn: Option<&str>,
        exclude_book_id: Option<i64>,
        category_id: i64,
    ) -> AppResult<()> {
        if let Some(isbn) = isbn.map(str::trim).filter(|s| !s.is_empty()) {
            if self
                .repository
                .books
                .isbn_exists(&mut **tx, isbn, exclude_book_id)
                .await?
            {
                return Err(AppError::Conflict(format!("ISBN already exists: {}", isbn)));
            }
        }

        let category = self
            .repository
            .categories
            .get_by_id(&mut **tx, category_id)
            .await?;
        if !category.is_active {
            return Err(AppError::BadRequest(format!(
                "Cannot assign book to inactive category: {}",
                category.name
            )));
        }
        Ok(())
    }

    /// Map a page of books, embedding each book's category fetched in one query
    async fn to_responses(&self, books: Vec<Book>) -> AppResult<Vec<BookResponse>> {
        let mut ids: Vec<i64> = books.iter().map(|b| b.category_id).collect();
        ids.sort_unstable();
        ids.dedup();

        let categories = self.repository.categories.get_by_ids(&ids).await?;
        let by_id: HashMap<i64, CategoryResponse> = categories
            .into_iter()
            .map(|c| (c.id, c.into_response()))
            .collect();

        Ok(books
            .into_iter()
            .map(|b| {
                let category = by_id.get(&b.category_id).cloned();
                b.into_response(category)
            })
            .collect())
    }
}
