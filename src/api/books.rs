//! Admin book endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::book::{BookQuery, BookResponse, CreateBookRequest, UpdateBookRequest},
};

use super::{AuthenticatedStaff, PaginatedResponse, Pagination, QuantityParam};

/// List all books, ordered by title
#[utoipa::path(
    get,
    path = "/admin/books",
    tag = "books",
    security(("bearer_auth" = [])),
    params(Pagination),
    responses(
        (status = 200, description = "Paginated books", body = PaginatedResponse<BookResponse>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<PaginatedResponse<BookResponse>>> {
    claims.require_read_books()?;

    let (items, total) = state
        .services
        .books
        .list(pagination.page(), pagination.size())
        .await?;
    Ok(Json(PaginatedResponse {
        items,
        total,
        page: pagination.page(),
        size: pagination.size(),
    }))
}

/// Search books with filters
#[utoipa::path(
    get,
    path = "/admin/books/search",
    tag = "books",
    security(("bearer_auth" = [])),
    params(BookQuery),
    responses(
        (status = 200, description = "Paginated books", body = PaginatedResponse<BookResponse>)
    )
)]
pub async fn search_books(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<PaginatedResponse<BookResponse>>> {
    claims.require_read_books()?;

    let (items, total) = state.services.books.search(&query).await?;
    Ok(Json(PaginatedResponse {
        items,
        total,
        page: query.page(),
        size: query.size(),
    }))
}

/// List books in a category
#[utoipa::path(
    get,
    path = "/admin/books/category/{category_id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("category_id" = i64, Path, description = "Category ID"),
        Pagination
    ),
    responses(
        (status = 200, description = "Paginated books", body = PaginatedResponse<BookResponse>),
        (status = 404, description = "Category not found")
    )
)]
pub async fn list_books_by_category(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path(category_id): Path<i64>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<PaginatedResponse<BookResponse>>> {
    claims.require_read_books()?;

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

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/admin/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = BookResponse),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path(id): Path<i64>,
) -> AppResult<Json<BookResponse>> {
    claims.require_read_books()?;

    let book = state.services.books.get_by_id(id).await?;
    Ok(Json(book))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/admin/books",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = CreateBookRequest,
    responses(
        (status = 201, description = "Book created", body = BookResponse),
        (status = 400, description = "Invalid input or inactive category"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "ISBN already exists")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Json(request): Json<CreateBookRequest>,
) -> AppResult<(StatusCode, Json<BookResponse>)> {
    claims.require_write_books()?;

    let book = state.services.books.create(&request).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Update an existing book
#[utoipa::path(
    put,
    path = "/admin/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Book ID")),
    request_body = UpdateBookRequest,
    responses(
        (status = 200, description = "Book updated", body = BookResponse),
        (status = 404, description = "Book or category not found"),
        (status = 409, description = "ISBN already exists")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path(id): Path<i64>,
    Json(request): Json<UpdateBookRequest>,
) -> AppResult<Json<BookResponse>> {
    claims.require_write_books()?;

    let book = state.services.books.update(id, &request).await?;
    Ok(Json(book))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/admin/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    claims.require_write_books()?;

    state.services.books.delete(id).await?;
    Ok(StatusCode::OK)
}

/// Toggle the availability flag
#[utoipa::path(
    patch,
    path = "/admin/books/{id}/toggle-availability",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Availability toggled"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn toggle_book_availability(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    claims.require_write_books()?;

    state.services.books.toggle_availability(id).await?;
    Ok(StatusCode::OK)
}

/// Set the stock quantity
#[utoipa::path(
    patch,
    path = "/admin/books/{id}/stock",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Book ID"), QuantityParam),
    responses(
        (status = 200, description = "Stock updated"),
        (status = 400, description = "Negative quantity"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book_stock(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path(id): Path<i64>,
    Query(param): Query<QuantityParam>,
) -> AppResult<StatusCode> {
    claims.require_write_books()?;

    state.services.books.set_stock(id, param.quantity).await?;
    Ok(StatusCode::OK)
}

/// Decrease the stock quantity
#[utoipa::path(
    patch,
    path = "/admin/books/{id}/stock/decrease",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Book ID"), QuantityParam),
    responses(
        (status = 200, description = "Stock decreased"),
        (status = 400, description = "Non-positive quantity or insufficient stock"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn decrease_book_stock(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path(id): Path<i64>,
    Query(param): Query<QuantityParam>,
) -> AppResult<StatusCode> {
    claims.require_write_books()?;

    state.services.books.decrease_stock(id, param.quantity).await?;
    Ok(StatusCode::OK)
}

/// Increase the stock quantity
#[utoipa::path(
    patch,
    path = "/admin/books/{id}/stock/increase",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Book ID"), QuantityParam),
    responses(
        (status = 200, description = "Stock increased"),
        (status = 400, description = "Non-positive quantity"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn increase_book_stock(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path(id): Path<i64>,
    Query(param): Query<QuantityParam>,
) -> AppResult<StatusCode> {
    claims.require_write_books()?;

    state.services.books.increase_stock(id, param.quantity).await?;
    Ok(StatusCode::OK)
}
