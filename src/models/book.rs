//! Book model and request/response shapes.
//!
//! The `books` table holds a foreign key to `categories`; the category
//! relation is loaded separately by the service layer when building
//! responses. `in_stock` is derived at mapping time, never stored.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use super::category::CategoryResponse;

/// Book row as persisted
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = String)]
    pub price: Decimal,
    pub stock_quantity: i32,
    pub is_available: bool,
    pub published_date: Option<NaiveDate>,
    pub publisher: Option<String>,
    pub pages: Option<i32>,
    pub language: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category_id: i64,
}

impl Book {
    /// Map to the external shape with the category embedded.
    pub fn into_response(self, category: Option<CategoryResponse>) -> BookResponse {
        let in_stock = self.stock_quantity > 0;
        BookResponse {
            book_id: self.id,
            title: self.title,
            author: self.author,
            isbn: self.isbn,
            description: self.description,
            price: self.price,
            stock_quantity: self.stock_quantity,
            is_available: self.is_available,
            published_date: self.published_date,
            publisher: self.publisher,
            pages: self.pages,
            language: self.language,
            created_at: self.created_at,
            updated_at: self.updated_at,
            category,
            in_stock,
        }
    }

}

/// Price must be positive, with at most 8 integer and 2 fraction digits.
fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() || price.is_zero() {
        return Err(ValidationError::new("price_not_positive"));
    }
    let scaled = price.normalize();
    if scaled.scale() > 2 {
        return Err(ValidationError::new("price_too_many_fraction_digits"));
    }
    if scaled.trunc() >= Decimal::from(100_000_000u64) {
        return Err(ValidationError::new("price_too_many_integer_digits"));
    }
    Ok(())
}

/// Create book request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    #[validate(length(min = 2, max = 200, message = "Title must be between 2 and 200 characters"))]
    pub title: String,
    #[validate(length(min = 2, max = 100, message = "Author must be between 2 and 100 characters"))]
    pub author: String,
    #[validate(length(max = 20, message = "ISBN must not exceed 20 characters"))]
    pub isbn: Option<String>,
    #[validate(length(max = 2000, message = "Description must not exceed 2000 characters"))]
    pub description: Option<String>,
    #[schema(value_type = String)]
    #[validate(custom(function = validate_price, message = "Price must be greater than 0 with at most 8 integer and 2 fraction digits"))]
    pub price: Decimal,
    #[validate(range(min = 0, message = "Stock quantity must be at least 0"))]
    pub stock_quantity: i32,
    /// Defaults to true when omitted
    pub is_available: Option<bool>,
    pub published_date: Option<NaiveDate>,
    #[validate(length(max = 100, message = "Publisher must not exceed 100 characters"))]
    pub publisher: Option<String>,
    #[validate(range(min = 1, message = "Pages must be at least 1"))]
    pub pages: Option<i32>,
    #[validate(length(max = 50, message = "Language must not exceed 50 characters"))]
    pub language: Option<String>,
    pub category_id: i64,
}

/// Update book request.
///
/// Optional columns (isbn, description, published_date, publisher, pages,
/// language) are overwritten unconditionally, null included. `is_available`
/// is the exception: omitting it leaves the stored value untouched.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookRequest {
    #[validate(length(min = 2, max = 200, message = "Title must be between 2 and 200 characters"))]
    pub title: String,
    #[validate(length(min = 2, max = 100, message = "Author must be between 2 and 100 characters"))]
    pub author: String,
    #[validate(length(max = 20, message = "ISBN must not exceed 20 characters"))]
    pub isbn: Option<String>,
    #[validate(length(max = 2000, message = "Description must not exceed 2000 characters"))]
    pub description: Option<String>,
    #[schema(value_type = String)]
    #[validate(custom(function = validate_price, message = "Price must be greater than 0 with at most 8 integer and 2 fraction digits"))]
    pub price: Decimal,
    #[validate(range(min = 0, message = "Stock quantity must be at least 0"))]
    pub stock_quantity: i32,
    pub is_available: Option<bool>,
    pub published_date: Option<NaiveDate>,
    #[validate(length(max = 100, message = "Publisher must not exceed 100 characters"))]
    pub publisher: Option<String>,
    #[validate(range(min = 1, message = "Pages must be at least 1"))]
    pub pages: Option<i32>,
    #[validate(length(max = 50, message = "Language must not exceed 50 characters"))]
    pub language: Option<String>,
    pub category_id: i64,
}

/// Book search filters (admin and public search endpoints)
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookQuery {
    pub title: Option<String>,
    pub author: Option<String>,
    pub category_id: Option<i64>,
    pub is_available: Option<bool>,
    #[param(value_type = Option<String>)]
    pub min_price: Option<Decimal>,
    #[param(value_type = Option<String>)]
    pub max_price: Option<Decimal>,
    /// Zero-based page number (default: 0)
    pub page: Option<i64>,
    /// Page size (default: 20)
    pub size: Option<i64>,
}

impl BookQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(0).max(0)
    }

    pub fn size(&self) -> i64 {
        self.size.unwrap_or(20).max(1)
    }
}

/// Book API response
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub book_id: i64,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = String)]
    pub price: Decimal,
    pub stock_quantity: i32,
    pub is_available: bool,
    pub published_date: Option<NaiveDate>,
    pub publisher: Option<String>,
    pub pages: Option<i32>,
    pub language: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryResponse>,
    pub in_stock: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::category::Category;

    fn sample_book(stock: i32) -> Book {
        let now = Utc::now();
        Book {
            id: 1,
            title: "1984".into(),
            author: "Orwell".into(),
            isbn: Some("9780451524935".into()),
            description: None,
            price: Decimal::new(1399, 2),
            stock_quantity: stock,
            is_available: true,
            published_date: None,
            publisher: None,
            pages: Some(328),
            language: Some("English".into()),
            created_at: now,
            updated_at: now,
            category_id: 7,
        }
    }

    #[test]
    fn in_stock_follows_stock_quantity() {
        assert!(sample_book(35).into_response(None).in_stock);
        assert!(!sample_book(0).into_response(None).in_stock);
    }

    #[test]
    fn response_embeds_category_when_given() {
        let now = Utc::now();
        let category = Category {
            id: 7,
            name: "Fiction".into(),
            description: None,
            is_active: true,
            created_at: now,
            updated_at: now,
            book_count: 12,
        };
        let response = sample_book(35).into_response(Some(category.into_response()));
        let embedded = response.category.expect("category embedded");
        assert_eq!(embedded.category_id, 7);
        assert_eq!(embedded.book_count, 12);
    }

    #[test]
    fn price_must_be_positive() {
        assert!(validate_price(&Decimal::new(1399, 2)).is_ok());
        assert!(validate_price(&Decimal::ZERO).is_err());
        assert!(validate_price(&Decimal::new(-100, 2)).is_err());
    }

    #[test]
    fn price_digit_limits() {
        // 3 fraction digits
        assert!(validate_price(&Decimal::new(12345, 3)).is_err());
        // 9 integer digits
        assert!(validate_price(&Decimal::from(100_000_000u64)).is_err());
        assert!(validate_price(&Decimal::from(99_999_999u64)).is_ok());
    }

    #[test]
    fn query_clamps_negative_pagination() {
        let q = BookQuery {
            page: Some(-1),
            size: Some(-1),
            ..Default::default()
        };
        assert_eq!(q.page(), 0);
        assert_eq!(q.size(), 1);

        let defaults = BookQuery::default();
        assert_eq!(defaults.page(), 0);
        assert_eq!(defaults.size(), 20);
    }

    #[test]
    fn create_request_rejects_short_title() {
        let req = CreateBookRequest {
            title: "x".into(),
            author: "Orwell".into(),
            isbn: None,
            description: None,
            price: Decimal::new(1399, 2),
            stock_quantity: 1,
            is_available: None,
            published_date: None,
            publisher: None,
            pages: None,
            language: None,
            category_id: 1,
        };
        assert!(req.validate().is_err());
    }
}
