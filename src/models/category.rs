//! Category model and request/response shapes.
//!
//! `book_count` is not a stored column: every category SELECT carries a live
//! `COUNT(*)` subquery over `books`, so the value reflects the store at read
//! time rather than a cached collection size.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Category row plus its live book count
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Computed by the repository, never stored
    pub book_count: i64,
}

impl Category {
    /// Map to the external shape.
    pub fn into_response(self) -> CategoryResponse {
        CategoryResponse {
            category_id: self.id,
            name: self.name,
            description: self.description,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
            book_count: self.book_count,
        }
    }
}

/// Create category request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 100, message = "Category name must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(length(max = 500, message = "Description must not exceed 500 characters"))]
    pub description: Option<String>,
    /// Defaults to true when omitted
    pub is_active: Option<bool>,
}

/// Update category request.
///
/// `description` is overwritten unconditionally, null included; `is_active`
/// is only overwritten when explicitly supplied.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, max = 100, message = "Category name must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(length(max = 500, message = "Description must not exceed 500 characters"))]
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// Category search filters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryQuery {
    pub name: Option<String>,
    pub is_active: Option<bool>,
    /// Zero-based page number (default: 0)
    pub page: Option<i64>,
    /// Page size (default: 20)
    pub size: Option<i64>,
}

impl CategoryQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(0).max(0)
    }

    pub fn size(&self) -> i64 {
        self.size.unwrap_or(20).max(1)
    }
}

/// Category API response
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub category_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub book_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_carries_book_count() {
        let now = Utc::now();
        let category = Category {
            id: 3,
            name: "Science".into(),
            description: Some("Science books".into()),
            is_active: false,
            created_at: now,
            updated_at: now,
            book_count: 4,
        };
        let response = category.into_response();
        assert_eq!(response.category_id, 3);
        assert_eq!(response.book_count, 4);
        assert!(!response.is_active);
    }

    #[test]
    fn query_clamps_negative_pagination() {
        let q = CategoryQuery {
            page: Some(-3),
            size: Some(0),
            ..Default::default()
        };
        assert_eq!(q.page(), 0);
        assert_eq!(q.size(), 1);
    }

    #[test]
    fn create_request_requires_name() {
        let req = CreateCategoryRequest {
            name: String::new(),
            description: None,
            is_active: None,
        };
        assert!(req.validate().is_err());
    }
}
