//! Bookstore Server - Catalog Administration
//!
//! REST API server for managing a bookstore catalog of books and categories.

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookstore_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            format!("bookstore_server={},tower_http=debug", config.logging.level).into()
        });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Bookstore Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Books (admin)
        .route("/admin/books", get(api::books::list_books))
        .route("/admin/books", post(api::books::create_book))
        .route("/admin/books/search", get(api::books::search_books))
        .route("/admin/books/category/:category_id", get(api::books::list_books_by_category))
        .route("/admin/books/:id", get(api::books::get_book))
        .route("/admin/books/:id", put(api::books::update_book))
        .route("/admin/books/:id", delete(api::books::delete_book))
        .route("/admin/books/:id/toggle-availability", patch(api::books::toggle_book_availability))
        .route("/admin/books/:id/stock", patch(api::books::update_book_stock))
        .route("/admin/books/:id/stock/decrease", patch(api::books::decrease_book_stock))
        .route("/admin/books/:id/stock/increase", patch(api::books::increase_book_stock))
        // Categories (admin)
        .route("/admin/categories", get(api::categories::list_categories))
        .route("/admin/categories", post(api::categories::create_category))
        .route("/admin/categories/search", get(api::categories::search_categories))
        .route("/admin/categories/dropdown", get(api::categories::list_categories_for_dropdown))
        .route("/admin/categories/:id", get(api::categories::get_category))
        .route("/admin/categories/:id", put(api::categories::update_category))
        .route("/admin/categories/:id", delete(api::categories::delete_category))
        .route("/admin/categories/:id/toggle-status", patch(api::categories::toggle_category_status))
        // Public browsing
        .route("/public/books", get(api::public::browse_books))
        .route("/public/books/search", get(api::public::search_books))
        .route("/public/books/category/:category_id", get(api::public::browse_books_by_category))
        .route("/public/books/categories", get(api::public::list_active_categories))
        .route("/public/books/:id", get(api::public::get_book_details))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
