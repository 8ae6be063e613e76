//! Public browse endpoints.
//!
//! No token required; list and search results are pre-filtered to available
//! books. Detail lookup by ID is unfiltered, matching the admin view.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::{
        book::{BookQuery, BookResponse},
        category::CategoryResponse,
    },
};

use super::{PaginatedResponse, Pagination};

/// Public book search filters (availability is forced server-side)
#[derive(Debug, Default, serde::Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PublicBookQuery {
    pub title: Option<String>,
    pub author: Option<String>,
    pub category_id: Option<i64>,
    #[param(value_type = Option<String>)]
    pub min_price: Option<rust_decimal::Decimal>,
    #[param(value_type = Option<String>)]
    pub max_price: Option<rust_decimal::Decimal>,
    /// Zero-based page number (default: 0)
    pub page: Option<i64>,
    /// Page size (default: 20)
    pub size: Option<i64>,
}

impl PublicBookQuery {
    fn into_available_query(self) -> BookQuery {
        BookQuery {
            title: self.title,
            author: self.author,
            category_id: self.category_id,
            is_available: Some(true),
            min_price: self.min_price,
            max_price: self.max_price,
            page: self.page,
            size: self.size,
        }
    }
}

/// Browse available books
#[utoipa::path(
    get,
    path = "/public/books",
    tag = "public",
    params(Pagination),
    responses(
        (status = 200, description = "Paginated available books", body = PaginatedResponse<BookResponse>)
    )
)]
pub async fn browse_books(
    State(state): State<crate::AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<PaginatedResponse<BookResponse>>> {
    let query = BookQuery {
        is_available: Some(true),
        page: Some(pagination.page()),
        size: Some(pagination.size()),
        ..Default::default()
    };
    let (items, total) = state.services.books.search(&query).await?;
    Ok(Json(PaginatedResponse {
        items,
        total,
        page: pagination.page(),
        size: pagination.size(),
    }))
}

/// Search available books
#[utoipa::path(
    get,
    path = "/public/books/search",
    tag = "public",
    params(PublicBookQuery),
    responses(
        (status = 200, description = "Paginated available books", body = PaginatedResponse<BookResponse>)
    )
)]
pub async fn search_books(
    State(state): State<crate::AppState>,
    Query(query): Query<PublicBookQuery>,
) -> AppResult<Json<PaginatedResponse<BookResponse>>> {
    let query = query.into_available_query();
    let (items, total) = state.services.books.search(&query).await?;
    Ok(Json(PaginatedResponse {
        items,
        total,
        page: query.page(),
        size: query.size(),
    }))
}

/// Browse books in a category
#[utoipa::path(
    get,
    path = "/public/books/category/{category_id}",
    tag = "public",
    params(
        ("category_id" = i64, Path, description = "Category ID"),
        Pagination
    ),
    responses(
        (status = 200, description = "Paginated books", body = PaginatedResponse<BookResponse>),
        (status = 404, description = "Category not found")
    )
)]
pub async fn browse_books_by_category(
    State(state): State<crate::AppState>,
    Path(category_id): Path<i64>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<PaginatedResponse<BookResponse>>> {
    let (items, total) = state
        .services
        .books
        .list_by_category(category_id, pagination.page(), pagination.size())
        .await?;
    Ok(Json(PaginatedResponse {
        items,
        total,
        page: pagination.page(),
        size: pagination.size(),
    }))
}

/// Get book details
#[utoipa::path(
    get,
    path = "/public/books/{id}",
    tag = "public",
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = BookResponse),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book_details(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<BookResponse>> {
    let book = state.services.books.get_by_id(id).await?;
    Ok(Json(book))
}

/// Active categories for public browsing
#[utoipa::path(
    get,
    path = "/public/books/categories",
    tag = "public",
    responses(
        (status = 200, description = "Active categories", body = Vec<CategoryResponse>)
    )
)]
pub async fn list_active_categories(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<CategoryResponse>>> {
    let categories = state.services.categories.list_active().await?;
    Ok(Json(categories))
}
