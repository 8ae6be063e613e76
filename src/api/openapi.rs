//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, categories, health, public};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookstore API",
        version = "0.1.0",
        description = "Bookstore catalog administration REST API",
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books (admin)
        books::list_books,
        books::search_books,
        books::list_books_by_category,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        books::toggle_book_availability,
        books::update_book_stock,
        books::decrease_book_stock,
        books::increase_book_stock,
        // Categories (admin)
        categories::list_categories,
        categories::search_categories,
        categories::list_categories_for_dropdown,
        categories::get_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        categories::toggle_category_status,
        // Public
        public::browse_books,
        public::search_books,
        public::browse_books_by_category,
        public::get_book_details,
        public::list_active_categories,
    ),
    components(
        schemas(
            health::HealthResponse,
            crate::error::ErrorResponse,
            crate::models::book::Book,
            crate::models::book::BookResponse,
            crate::models::book::CreateBookRequest,
            crate::models::book::UpdateBookRequest,
            crate::models::category::Category,
            crate::models::category::CategoryResponse,
            crate::models::category::CreateCategoryRequest,
            crate::models::category::UpdateCategoryRequest,
        )
    ),
    tags(
        (name = "health", description = "Service health"),
        (name = "books", description = "Book catalog management"),
        (name = "categories", description = "Category management"),
        (name = "public", description = "Public catalog browsing")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
