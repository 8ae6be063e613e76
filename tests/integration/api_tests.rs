//! API integration tests.
//!
//! These run against a live server with a fresh database:
//! `cargo test -- --ignored`

use chrono::{Duration, Utc};
use reqwest::Client;
use serde_json::{json, Value};

use bookstore_server::models::auth::{CatalogRights, Rights, StaffClaims};

const BASE_URL: &str = "http://localhost:8080/api/v1";
const JWT_SECRET: &str = "change-this-secret-in-production";

/// Mint a staff token with full catalog rights, as the external identity
/// service would.
fn staff_token() -> String {
    let now = Utc::now();
    let claims = StaffClaims {
        sub: "test-staff".to_string(),
        rights: CatalogRights {
            books_rights: Rights::Write,
            categories_rights: Rights::Write,
        },
        iat: now.timestamp(),
        exp: (now + Duration::hours(1)).timestamp(),
    };
    claims.create_token(JWT_SECRET).expect("Failed to sign token")
}

async fn create_category(client: &Client, token: &str, name: &str) -> i64 {
    let response = client
        .post(format!("{}/admin/categories", BASE_URL))
        .bearer_auth(token)
        .json(&json!({ "name": name, "isActive": true }))
        .send()
        .await
        .expect("Failed to create category");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse category");
    body["categoryId"].as_i64().expect("No categoryId")
}

async fn create_book(client: &Client, token: &str, category_id: i64, title: &str, price: &str, stock: i32) -> i64 {
    let response = client
        .post(format!("{}/admin/books", BASE_URL))
        .bearer_auth(token)
        .json(&json!({
            "title": title,
            "author": "Orwell",
            "price": price,
            "stockQuantity": stock,
            "categoryId": category_id
        }))
        .send()
        .await
        .expect("Failed to create book");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse book");
    body["bookId"].as_i64().expect("No bookId")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_admin_requires_token() {
    let client = Client::new();

    let response = client
        .get(format!("{}/admin/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_list_books_paginated() {
    let client = Client::new();
    let token = staff_token();

    let response = client
        .get(format!("{}/admin/books", BASE_URL))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["items"].is_array());
    assert!(body["total"].is_number());
    assert_eq!(body["page"], 0);
    assert_eq!(body["size"], 20);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_isbn_conflict() {
    let client = Client::new();
    let token = staff_token();
    let category_id = create_category(&client, &token, "Dup ISBN Fiction").await;

    let book = json!({
        "title": "Animal Farm",
        "author": "Orwell",
        "isbn": "9780451526342",
        "price": "9.99",
        "stockQuantity": 5,
        "categoryId": category_id
    });

    let first = client
        .post(format!("{}/admin/books", BASE_URL))
        .bearer_auth(&token)
        .json(&book)
        .send()
        .await
        .expect("Failed to create book");
    assert_eq!(first.status(), 201);

    let second = client
        .post(format!("{}/admin/books", BASE_URL))
        .bearer_auth(&token)
        .json(&book)
        .send()
        .await
        .expect("Failed to create duplicate");
    assert_eq!(second.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_insufficient_stock_leaves_quantity_unchanged() {
    let client = Client::new();
    let token = staff_token();
    let category_id = create_category(&client, &token, "Stock Fiction").await;
    let book_id = create_book(&client, &token, category_id, "1984", "13.99", 35).await;

    let response = client
        .patch(format!("{}/admin/books/{}/stock/decrease?quantity=40", BASE_URL, book_id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to decrease stock");
    assert_eq!(response.status(), 400);

    let book: Value = client
        .get(format!("{}/admin/books/{}", BASE_URL, book_id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to fetch book")
        .json()
        .await
        .expect("Failed to parse book");
    assert_eq!(book["stockQuantity"], 35);
    assert_eq!(book["inStock"], true);
}

#[tokio::test]
#[ignore]
async fn test_stock_increase_decrease_round_trip() {
    let client = Client::new();
    let token = staff_token();
    let category_id = create_category(&client, &token, "RoundTrip Fiction").await;
    let book_id = create_book(&client, &token, category_id, "Homage to Catalonia", "11.50", 10).await;

    for path in ["increase", "decrease"] {
        let response = client
            .patch(format!("{}/admin/books/{}/stock/{}?quantity=7", BASE_URL, book_id, path))
            .bearer_auth(&token)
            .send()
            .await
            .expect("Failed to adjust stock");
        assert_eq!(response.status(), 200);
    }

    let book: Value = client
        .get(format!("{}/admin/books/{}", BASE_URL, book_id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to fetch book")
        .json()
        .await
        .expect("Failed to parse book");
    assert_eq!(book["stockQuantity"], 10);
}

#[tokio::test]
#[ignore]
async fn test_category_delete_blocked_by_books() {
    let client = Client::new();
    let token = staff_token();
    let category_id = create_category(&client, &token, "Guarded Fiction").await;
    create_book(&client, &token, category_id, "Burmese Days", "8.25", 3).await;

    let blocked = client
        .delete(format!("{}/admin/categories/{}", BASE_URL, category_id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to delete category");
    assert_eq!(blocked.status(), 409);

    let empty_id = create_category(&client, &token, "Empty Fiction").await;
    let deleted = client
        .delete(format!("{}/admin/categories/{}", BASE_URL, empty_id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to delete empty category");
    assert_eq!(deleted.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_category_partial_update_keeps_is_active() {
    let client = Client::new();
    let token = staff_token();
    let category_id = create_category(&client, &token, "Partial Fiction").await;

    // Explicitly deactivate
    let response = client
        .put(format!("{}/admin/categories/{}", BASE_URL, category_id))
        .bearer_auth(&token)
        .json(&json!({ "name": "Partial Fiction", "isActive": false }))
        .send()
        .await
        .expect("Failed to update category");
    assert_eq!(response.status(), 200);

    // Omitting isActive must leave it false
    let response = client
        .put(format!("{}/admin/categories/{}", BASE_URL, category_id))
        .bearer_auth(&token)
        .json(&json!({ "name": "Partial Fiction Renamed" }))
        .send()
        .await
        .expect("Failed to update category");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse category");
    assert_eq!(body["isActive"], false);
    assert_eq!(body["name"], "Partial Fiction Renamed");
}

#[tokio::test]
#[ignore]
async fn test_inactive_category_rejects_books() {
    let client = Client::new();
    let token = staff_token();
    let category_id = create_category(&client, &token, "Dormant Fiction").await;

    let response = client
        .patch(format!("{}/admin/categories/{}/toggle-status", BASE_URL, category_id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to toggle status");
    assert_eq!(response.status(), 200);

    let response = client
        .post(format!("{}/admin/books", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({
            "title": "Coming Up for Air",
            "author": "Orwell",
            "price": "10.00",
            "stockQuantity": 2,
            "categoryId": category_id
        }))
        .send()
        .await
        .expect("Failed to create book");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_price_range_search_inclusive() {
    let client = Client::new();
    let token = staff_token();
    let category_id = create_category(&client, &token, "Priced Fiction").await;
    create_book(&client, &token, category_id, "Cheap Read", "19.99", 1).await;
    create_book(&client, &token, category_id, "Fair Read", "20.00", 1).await;
    create_book(&client, &token, category_id, "Solid Read", "30.00", 1).await;
    create_book(&client, &token, category_id, "Pricey Read", "30.01", 1).await;

    let response = client
        .get(format!(
            "{}/admin/books/search?categoryId={}&minPrice=20&maxPrice=30",
            BASE_URL, category_id
        ))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to search");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let titles: Vec<&str> = body["items"]
        .as_array()
        .expect("items array")
        .iter()
        .map(|b| b["title"].as_str().expect("title"))
        .collect();
    assert_eq!(titles, vec!["Fair Read", "Solid Read"]);
}

#[tokio::test]
#[ignore]
async fn test_search_clamps_negative_pagination() {
    let client = Client::new();
    let token = staff_token();

    let response = client
        .get(format!("{}/admin/books/search?page=-1&size=-1", BASE_URL))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to search");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["page"], 0);
    assert_eq!(body["size"], 1);

    let response = client
        .get(format!("{}/public/books/search?page=-1", BASE_URL))
        .send()
        .await
        .expect("Failed to search");
    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_book_partial_update_keeps_is_available() {
    let client = Client::new();
    let token = staff_token();
    let category_id = create_category(&client, &token, "Asymmetry Fiction").await;

    let response = client
        .post(format!("{}/admin/books", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({
            "title": "Down and Out",
            "author": "Orwell",
            "isbn": "9780156262248",
            "price": "12.00",
            "stockQuantity": 4,
            "isAvailable": false,
            "categoryId": category_id
        }))
        .send()
        .await
        .expect("Failed to create book");
    assert_eq!(response.status(), 201);
    let book: Value = response.json().await.expect("Failed to parse book");
    let book_id = book["bookId"].as_i64().expect("No bookId");

    // Omitting isAvailable must keep it false; omitting isbn must null it
    let response = client
        .put(format!("{}/admin/books/{}", BASE_URL, book_id))
        .bearer_auth(&token)
        .json(&json!({
            "title": "Down and Out in Paris and London",
            "author": "Orwell",
            "price": "12.00",
            "stockQuantity": 4,
            "categoryId": category_id
        }))
        .send()
        .await
        .expect("Failed to update book");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse book");
    assert_eq!(body["isAvailable"], false);
    assert_eq!(body["isbn"], Value::Null);
    assert_eq!(body["title"], "Down and Out in Paris and London");
}

#[tokio::test]
#[ignore]
async fn test_public_browse_hides_unavailable() {
    let client = Client::new();
    let token = staff_token();
    let category_id = create_category(&client, &token, "Public Fiction").await;
    let hidden_id = create_book(&client, &token, category_id, "Hidden Read", "5.00", 1).await;

    let response = client
        .patch(format!("{}/admin/books/{}/toggle-availability", BASE_URL, hidden_id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to toggle availability");
    assert_eq!(response.status(), 200);

    let body: Value = client
        .get(format!("{}/public/books/search?title=Hidden Read", BASE_URL))
        .send()
        .await
        .expect("Failed to browse")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["total"], 0);
}
