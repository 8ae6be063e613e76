//! Admin category endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::category::{
        CategoryQuery, CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest,
    },
};

use super::{AuthenticatedStaff, PaginatedResponse, Pagination};

/// List all categories, ordered by name
#[utoipa::path(
    get,
    path = "/admin/categories",
    tag = "categories",
    security(("bearer_auth" = [])),
    params(Pagination),
    responses(
        (status = 200, description = "Paginated categories", body = PaginatedResponse<CategoryResponse>)
    )
)]
pub async fn list_categories(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<PaginatedResponse<CategoryResponse>>> {
    claims.require_read_categories()?;

    let (items, total) = state
        .services
        .categories
        .list(pagination.page(), pagination.size())
        .await?;
    Ok(Json(PaginatedResponse {
        items,
        total,
        page: pagination.page(),
        size: pagination.size(),
    }))
}

/// Search categories by name and status
#[utoipa::path(
    get,
    path = "/admin/categories/search",
    tag = "categories",
    security(("bearer_auth" = [])),
    params(CategoryQuery),
    responses(
        (status = 200, description = "Paginated categories", body = PaginatedResponse<CategoryResponse>)
    )
)]
pub async fn search_categories(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Query(query): Query<CategoryQuery>,
) -> AppResult<Json<PaginatedResponse<CategoryResponse>>> {
    claims.require_read_categories()?;

    let (items, total) = state.services.categories.search(&query).await?;
    Ok(Json(PaginatedResponse {
        items,
        total,
        page: query.page(),
        size: query.size(),
    }))
}

/// Active categories for dropdown selection
#[utoipa::path(
    get,
    path = "/admin/categories/dropdown",
    tag = "categories",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Active categories", body = Vec<CategoryResponse>)
    )
)]
pub async fn list_categories_for_dropdown(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
) -> AppResult<Json<Vec<CategoryResponse>>> {
    claims.require_read_categories()?;

    let categories = state.services.categories.list_active().await?;
    Ok(Json(categories))
}

/// Get a category by ID
#[utoipa::path(
    get,
    path = "/admin/categories/{id}",
    tag = "categories",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category details", body = CategoryResponse),
        (status = 404, description = "Category not found")
    )
)]
pub async fn get_category(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path(id): Path<i64>,
) -> AppResult<Json<CategoryResponse>> {
    claims.require_read_categories()?;

    let category = state.services.categories.get_by_id(id).await?;
    Ok(Json(category))
}

/// Create a new category
#[utoipa::path(
    post,
    path = "/admin/categories",
    tag = "categories",
    security(("bearer_auth" = [])),
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 409, description = "Name already exists")
    )
)]
pub async fn create_category(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Json(request): Json<CreateCategoryRequest>,
) -> AppResult<(StatusCode, Json<CategoryResponse>)> {
    claims.require_write_categories()?;

    let category = state.services.categories.create(&request).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Update an existing category
#[utoipa::path(
    put,
    path = "/admin/categories/{id}",
    tag = "categories",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Category ID")),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Name already exists")
    )
)]
pub async fn update_category(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path(id): Path<i64>,
    Json(request): Json<UpdateCategoryRequest>,
) -> AppResult<Json<CategoryResponse>> {
    claims.require_write_categories()?;

    let category = state.services.categories.update(id, &request).await?;
    Ok(Json(category))
}

/// Delete a category (only when it has no books)
#[utoipa::path(
    delete,
    path = "/admin/categories/{id}",
    tag = "categories",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category still contains books")
    )
)]
pub async fn delete_category(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    claims.require_write_categories()?;

    state.services.categories.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Toggle the active flag
#[utoipa::path(
    patch,
    path = "/admin/categories/{id}/toggle-status",
    tag = "categories",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Status toggled"),
        (status = 404, description = "Category not found")
    )
)]
pub async fn toggle_category_status(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    claims.require_write_categories()?;

    state.services.categories.toggle_status(id).await?;
    Ok(StatusCode::OK)
}
