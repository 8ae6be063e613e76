//! Categories repository.
//!
//! Every SELECT carries a live book-count subquery so `Category.book_count`
//! always reflects the store at read time.

use chrono::Utc;
use sqlx::{PgExecutor, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::category::{Category, CategoryQuery, CreateCategoryRequest, UpdateCategoryRequest},
};

const CATEGORY_SELECT: &str = "SELECT c.id, c.name, c.description, c.is_active, c.created_at, c.updated_at, \
     (SELECT COUNT(*) FROM books b WHERE b.category_id = c.id) AS book_count \
     FROM categories c";

#[derive(Clone)]
pub struct CategoriesRepository {
    pool: Pool<Postgres>,
}

impl CategoriesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // =========================================================================
    // READ
    // =========================================================================

    /// List all categories ordered by name, paginated. Returns (rows, total).
    pub async fn list(&self, page: i64, size: i64) -> AppResult<(Vec<Category>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;

        let query = format!("{} ORDER BY c.name LIMIT $1 OFFSET $2", CATEGORY_SELECT);
        let categories = sqlx::query_as::<_, Category>(&query)
            .bind(size)
            .bind(page * size)
            .fetch_all(&self.pool)
            .await?;

        Ok((categories, total))
    }

    /// Search categories with null-guarded filters
    pub async fn search(&self, q: &CategoryQuery) -> AppResult<(Vec<Category>, i64)> {
        let page = q.page();
        let size = q.size();

        const WHERE_CLAUSE: &str = "($1::text IS NULL OR c.name ILIKE '%' || $1 || '%') \
             AND ($2::boolean IS NULL OR c.is_active = $2)";

        let count_query = format!("SELECT COUNT(*) FROM categories c WHERE {}", WHERE_CLAUSE);
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(&q.name)
            .bind(q.is_active)
            .fetch_one(&self.pool)
            .await?;

        let select_query = format!(
            "{} WHERE {} ORDER BY c.name LIMIT $3 OFFSET $4",
            CATEGORY_SELECT, WHERE_CLAUSE
        );
        let categories = sqlx::query_as::<_, Category>(&select_query)
            .bind(&q.name)
            .bind(q.is_active)
            .bind(size)
            .bind(page * size)
            .fetch_all(&self.pool)
            .await?;

        Ok((categories, total))
    }

    /// Unpaged list of active categories ordered by name (dropdown)
    pub async fn list_active(&self) -> AppResult<Vec<Category>> {
        let query = format!("{} WHERE c.is_active = TRUE ORDER BY c.name", CATEGORY_SELECT);
        let categories = sqlx::query_as::<_, Category>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(categories)
    }

    /// Get a category by ID
    pub async fn get_by_id(&self, conn: impl PgExecutor<'_>, id: i64) -> AppResult<Category> {
        let query = format!("{} WHERE c.id = $1", CATEGORY_SELECT);
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category not found with id: {}", id)))
    }

    /// Fetch several categories at once (used to embed categories in book lists)
    pub async fn get_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Category>> {
        let query = format!("{} WHERE c.id = ANY($1)", CATEGORY_SELECT);
        let categories = sqlx::query_as::<_, Category>(&query)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(categories)
    }

    /// Check whether a category exists
    pub async fn exists(&self, id: i64) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// Check whether a name is already used, optionally excluding one category
    pub async fn name_exists(
        &self,
        conn: impl PgExecutor<'_>,
        name: &str,
        exclude_id: Option<i64>,
    ) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE name = $1 AND ($2::bigint IS NULL OR id <> $2))",
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_one(conn)
        .await?;
        Ok(exists)
    }

    // =========================================================================
    // WRITE
    // =========================================================================

    /// Insert a new category with server-assigned timestamps
    pub async fn insert(
        &self,
        conn: impl PgExecutor<'_>,
        req: &CreateCategoryRequest,
    ) -> AppResult<Category> {
        let now = Utc::now();
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, description, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING id, name, description, is_active, created_at, updated_at, 0::bigint AS book_count
            "#,
        )
        .bind(&req.name)
        .bind(&req.description)
        .bind(req.is_active.unwrap_or(true))
        .bind(now)
        .fetch_one(conn)
        .await?;
        Ok(category)
    }

    /// Overwrite a category. `description` is written from the request, null
    /// included; `is_active` keeps its stored value when the request omits it.
    pub async fn update(
        &self,
        conn: impl PgExecutor<'_>,
        id: i64,
        req: &UpdateCategoryRequest,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE categories SET
                name = $1,
                description = $2,
                is_active = COALESCE($3, is_active),
                updated_at = $4
            WHERE id = $5
            "#,
        )
        .bind(&req.name)
        .bind(&req.description)
        .bind(req.is_active)
        .bind(Utc::now())
        .bind(id)
        .execute(conn)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Category not found with id: {}", id)));
        }
        Ok(())
    }

    /// Hard delete a category (the service guards against live book references)
    pub async fn delete(&self, conn: impl PgExecutor<'_>, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Category not found with id: {}", id)));
        }
        Ok(())
    }

    /// Flip the active flag
    pub async fn toggle_status(&self, conn: impl PgExecutor<'_>, id: i64) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE categories SET is_active = NOT is_active, updated_at = $1 WHERE id = $2",
        )
        .bind(Utc::now())
        .bind(id)
        .execute(conn)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Category not found with id: {}", id)));
        }
        Ok(())
    }
}
