//! Books repository.
//!
//! List/search methods run on the internal pool. Point queries take an
//! executor so the service layer can run them inside a transaction.

use chrono::Utc;
use sqlx::{PgExecutor, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery, CreateBookRequest, UpdateBookRequest},
};

const BOOK_COLUMNS: &str = "id, title, author, isbn, description, price, stock_quantity, \
     is_available, published_date, publisher, pages, language, created_at, updated_at, category_id";

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // =========================================================================
    // READ
    // =========================================================================

    /// List all books ordered by title, paginated. Returns (rows, total).
    pub async fn list(&self, page: i64, size: i64) -> AppResult<(Vec<Book>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;

        let query = format!(
            "SELECT {} FROM books ORDER BY title LIMIT $1 OFFSET $2",
            BOOK_COLUMNS
        );
        let books = sqlx::query_as::<_, Book>(&query)
            .bind(size)
            .bind(page * size)
            .fetch_all(&self.pool)
            .await?;

        Ok((books, total))
    }

    /// Search books with null-guarded filters. Absent filters match all rows.
    pub async fn search(&self, q: &BookQuery) -> AppResult<(Vec<Book>, i64)> {
        let page = q.page();
        let size = q.size();

        const WHERE_CLAUSE: &str = "($1::text IS NULL OR title ILIKE '%' || $1 || '%') \
             AND ($2::text IS NULL OR author ILIKE '%' || $2 || '%') \
             AND ($3::bigint IS NULL OR category_id = $3) \
             AND ($4::boolean IS NULL OR is_available = $4) \
             AND ($5::numeric IS NULL OR price >= $5) \
             AND ($6::numeric IS NULL OR price <= $6)";

        let count_query = format!("SELECT COUNT(*) FROM books WHERE {}", WHERE_CLAUSE);
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(&q.title)
            .bind(&q.author)
            .bind(q.category_id)
            .bind(q.is_available)
            .bind(q.min_price)
            .bind(q.max_price)
            .fetch_one(&self.pool)
            .await?;

        let select_query = format!(
            "SELECT {} FROM books WHERE {} ORDER BY title LIMIT $7 OFFSET $8",
            BOOK_COLUMNS, WHERE_CLAUSE
        );
        let books = sqlx::query_as::<_, Book>(&select_query)
            .bind(&q.title)
            .bind(&q.author)
            .bind(q.category_id)
            .bind(q.is_available)
            .bind(q.min_price)
            .bind(q.max_price)
            .bind(size)
            .bind(page * size)
            .fetch_all(&self.pool)
            .await?;

        Ok((books, total))
    }

    /// List books belonging to a category, ordered by title, paginated.
    pub async fn list_by_category(
        &self,
        category_id: i64,
        page: i64,
        size: i64,
    ) -> AppResult<(Vec<Book>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE category_id = $1")
            .bind(category_id)
            .fetch_one(&self.pool)
            .await?;

        let query = format!(
            "SELECT {} FROM books WHERE category_id = $1 ORDER BY title LIMIT $2 OFFSET $3",
            BOOK_COLUMNS
        );
        let books = sqlx::query_as::<_, Book>(&query)
            .bind(category_id)
            .bind(size)
            .bind(page * size)
            .fetch_all(&self.pool)
            .await?;

        Ok((books, total))
    }

    /// Get a book by ID
    pub async fn get_by_id(&self, conn: impl PgExecutor<'_>, id: i64) -> AppResult<Book> {
        let query = format!("SELECT {} FROM books WHERE id = $1", BOOK_COLUMNS);
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book not found with id: {}", id)))
    }

    /// Check whether an ISBN is already used, optionally excluding one book
    pub async fn isbn_exists(
        &self,
        conn: impl PgExecutor<'_>,
        isbn: &str,
        exclude_id: Option<i64>,
    ) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM books WHERE isbn = $1 AND ($2::bigint IS NULL OR id <> $2))",
        )
        .bind(isbn)
        .bind(exclude_id)
        .fetch_one(conn)
        .await?;
        Ok(exists)
    }

    /// Count books referencing a category (live query)
    pub async fn count_by_category(
        &self,
        conn: impl PgExecutor<'_>,
        category_id: i64,
    ) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE category_id = $1")
            .bind(category_id)
            .fetch_one(conn)
            .await?;
        Ok(count)
    }

    // =========================================================================
    // WRITE
    // =========================================================================

    /// Insert a new book with server-assigned timestamps
    pub async fn insert(
        &self,
        conn: impl PgExecutor<'_>,
        req: &CreateBookRequest,
    ) -> AppResult<Book> {
        let now = Utc::now();
        let query = format!(
            r#"
            INSERT INTO books (
                title, author, isbn, description, price, stock_quantity,
                is_available, published_date, publisher, pages, language,
                category_id, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $13)
            RETURNING {}
            "#,
            BOOK_COLUMNS
        );
        let book = sqlx::query_as::<_, Book>(&query)
            .bind(&req.title)
            .bind(&req.author)
            .bind(&req.isbn)
            .bind(&req.description)
            .bind(req.price)
            .bind(req.stock_quantity)
            .bind(req.is_available.unwrap_or(true))
            .bind(req.published_date)
            .bind(&req.publisher)
            .bind(req.pages)
            .bind(&req.language)
            .bind(req.category_id)
            .bind(now)
            .fetch_one(conn)
            .await?;
        Ok(book)
    }

    /// Overwrite a book. All columns are written from the request, null
    /// included, except `is_available` which keeps its stored value when the
    /// request omits it.
    pub async fn update(
        &self,
        conn: impl PgExecutor<'_>,
        id: i64,
        req: &UpdateBookRequest,
    ) -> AppResult<Book> {
        let now = Utc::now();
        let query = format!(
            r#"
            UPDATE books SET
                title = $1,
                author = $2,
                isbn = $3,
                description = $4,
                price = $5,
                stock_quantity = $6,
                is_available = COALESCE($7, is_available),
                published_date = $8,
                publisher = $9,
                pages = $10,
                language = $11,
                category_id = $12,
                updated_at = $13
            WHERE id = $14
            RETURNING {}
            "#,
            BOOK_COLUMNS
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(&req.title)
            .bind(&req.author)
            .bind(&req.isbn)
            .bind(&req.description)
            .bind(req.price)
            .bind(req.stock_quantity)
            .bind(req.is_available)
            .bind(req.published_date)
            .bind(&req.publisher)
            .bind(req.pages)
            .bind(&req.language)
            .bind(req.category_id)
            .bind(now)
            .bind(id)
            .fetch_optional(conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book not found with id: {}", id)))
    }

    /// Hard delete a book
    pub async fn delete(&self, conn: impl PgExecutor<'_>, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book not found with id: {}", id)));
        }
        Ok(())
    }

    /// Flip the availability flag
    pub async fn toggle_availability(&self, conn: impl PgExecutor<'_>, id: i64) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE books SET is_available = NOT is_available, updated_at = $1 WHERE id = $2",
        )
        .bind(Utc::now())
        .bind(id)
        .execute(conn)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book not found with id: {}", id)));
        }
        Ok(())
    }

    /// Set the stock quantity to an absolute value
    pub async fn set_stock(
        &self,
        conn: impl PgExecutor<'_>,
        id: i64,
        quantity: i32,
    ) -> AppResult<()> {
        let result =
            sqlx::query("UPDATE books SET stock_quantity = $1, updated_at = $2 WHERE id = $3")
                .bind(quantity)
                .bind(Utc::now())
                .bind(id)
                .execute(conn)
                .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book not found with id: {}", id)));
        }
        Ok(())
    }
}
