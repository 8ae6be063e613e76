//! Category catalog service.
//!
//! Name uniqueness and the delete guard (no category with live books may be
//! removed) live here; mutating operations with more than one statement run
//! inside a single transaction.

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::category::{
        CategoryQuery, CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CategoriesService {
    repository: Repository,
}

impl CategoriesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all categories ordered by name
    pub async fn list(&self, page: i64, size: i64) -> AppResult<(Vec<CategoryResponse>, i64)> {
        let (categories, total) = self.repository.categories.list(page, size).await?;
        Ok((categories.into_iter().map(|c| c.into_response()).collect(), total))
    }

    /// Search categories with filters
    pub async fn search(&self, query: &CategoryQuery) -> AppResult<(Vec<CategoryResponse>, i64)> {
        let (categories, total) = self.repository.categories.search(query).await?;
        Ok((categories.into_iter().map(|c| c.into_response()).collect(), total))
    }

    /// Unpaged active categories for dropdowns
    pub async fn list_active(&self) -> AppResult<Vec<CategoryResponse>> {
        let categories = self.repository.categories.list_active().await?;
        Ok(categories.into_iter().map(|c| c.into_response()).collect())
    }

    /// Get a category by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<CategoryResponse> {
        let category = self
            .repository
            .categories
            .get_by_id(&self.repository.pool, id)
            .await?;
        Ok(category.into_response())
    }

    /// Create a new category
    pub async fn create(&self, req: &CreateCategoryRequest) -> AppResult<CategoryResponse> {
        req.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let mut tx = self.repository.pool.begin().await?;
        if self
            .repository
            .categories
            .name_exists(&mut *tx, &req.name, None)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Category name already exists: {}",
                req.name
            )));
        }
        let category = self.repository.categories.insert(&mut *tx, req).await?;
        tx.commit().await?;
        Ok(category.into_response())
    }

    /// Update an existing category
    pub async fn update(&self, id: i64, req: &UpdateCategoryRequest) -> AppResult<CategoryResponse> {
        req.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let mut tx = self.repository.pool.begin().await?;

        self.repository.categories.get_by_id(&mut *tx, id).await?;
        if self
            .repository
            .categories
            .name_exists(&mut *tx, &req.name, Some(id))
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Category name already exists: {}",
                req.name
            )));
        }

        self.repository.categories.update(&mut *tx, id, req).await?;
        let category = self.repository.categories.get_by_id(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(category.into_response())
    }

    /// Delete a category; blocked while any book references it
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let mut tx = self.repository.pool.begin().await?;

        self.repository.categories.get_by_id(&mut *tx, id).await?;

        let book_count = self.repository.books.count_by_category(&mut *tx, id).await?;
        if book_count > 0 {
            return Err(AppError::Conflict(format!(
                "Cannot delete category because it contains {} book(s)",
                book_count
            )));
        }

        self.repository.categories.delete(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Flip the active flag
    pub async fn toggle_status(&self, id: i64) -> AppResult<()> {
        self.repository
            .categories
            .toggle_status(&self.repository.pool, id)
            .await
    }
}
