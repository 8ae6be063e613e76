//! API handlers for the bookstore REST endpoints

pub mod books;
pub mod categories;
pub mod health;
pub mod openapi;
pub mod public;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{error::AppError, models::auth::StaffClaims, AppState};

/// Extractor for authenticated staff from a bearer JWT
pub struct AuthenticatedStaff(pub StaffClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedStaff {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // Get the Authorization header
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        // Check for Bearer token
        if !auth_header.starts_with("Bearer ") {
            return Err(AppError::Authentication("Invalid authorization header format".to_string()));
        }

        let token = &auth_header[7..];

        // Validate JWT token using the secret from configuration
        let claims = StaffClaims::from_token(token, &state.config.auth.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        Ok(AuthenticatedStaff(claims))
    }
}

/// Paginated response wrapper
#[derive(Serialize, ToSchema)]
pub struct PaginatedResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    /// Page of items
    pub items: Vec<T>,
    /// Total number of matching items
    pub total: i64,
    /// Zero-based page number
    pub page: i64,
    /// Items per page
    pub size: i64,
}

/// Pagination query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct Pagination {
    /// Zero-based page number (default: 0)
    pub page: Option<i64>,
    /// Page size (default: 20)
    pub size: Option<i64>,
}

impl Pagination {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(0).max(0)
    }

    pub fn size(&self) -> i64 {
        self.size.unwrap_or(20).max(1)
    }
}

/// Quantity query parameter for the stock endpoints
#[derive(Debug, Deserialize, IntoParams)]
pub struct QuantityParam {
    pub quantity: i32,
}
