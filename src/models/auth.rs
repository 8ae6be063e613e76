//! Staff token claims and catalog rights.
//!
//! Tokens are issued by an external identity service; this server only
//! verifies them and checks the embedded rights.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Access level for a catalog area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rights {
    None = 0,
    Read = 1,
    Write = 2,
}

/// Per-area rights carried in staff tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRights {
    pub books_rights: Rights,
    pub categories_rights: Rights,
}

impl Default for CatalogRights {
    fn default() -> Self {
        Self {
            books_rights: Rights::None,
            categories_rights: Rights::None,
        }
    }
}

/// JWT claims for authenticated staff
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffClaims {
    pub sub: String,
    pub rights: CatalogRights,
    pub exp: i64,
    pub iat: i64,
}

impl StaffClaims {
    /// Sign a JWT token for these claims
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse and verify a JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    // Authorization checks
    pub fn require_read_books(&self) -> Result<(), AppError> {
        if self.rights.books_rights as u8 >= Rights::Read as u8 {
            Ok(())
        } else {
            Err(AppError::Authorization("Insufficient rights to read books".to_string()))
        }
    }

    pub fn require_write_books(&self) -> Result<(), AppError> {
        if self.rights.books_rights as u8 >= Rights::Write as u8 {
            Ok(())
        } else {
            Err(AppError::Authorization("Insufficient rights to write books".to_string()))
        }
    }

    pub fn require_read_categories(&self) -> Result<(), AppError> {
        if self.rights.categories_rights as u8 >= Rights::Read as u8 {
            Ok(())
        } else {
            Err(AppError::Authorization("Insufficient rights to read categories".to_string()))
        }
    }

    pub fn require_write_categories(&self) -> Result<(), AppError> {
        if self.rights.categories_rights as u8 >= Rights::Write as u8 {
            Ok(())
        } else {
            Err(AppError::Authorization("Insufficient rights to write categories".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(books: Rights, categories: Rights) -> StaffClaims {
        StaffClaims {
            sub: "staff".into(),
            rights: CatalogRights {
                books_rights: books,
                categories_rights: categories,
            },
            exp: 0,
            iat: 0,
        }
    }

    #[test]
    fn write_rights_imply_read() {
        let c = claims(Rights::Write, Rights::None);
        assert!(c.require_read_books().is_ok());
        assert!(c.require_write_books().is_ok());
        assert!(c.require_read_categories().is_err());
    }

    #[test]
    fn token_round_trip() {
        let mut c = claims(Rights::Write, Rights::Write);
        c.exp = (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp();
        let token = c.create_token("secret").expect("sign");
        let parsed = StaffClaims::from_token(&token, "secret").expect("verify");
        assert_eq!(parsed.sub, "staff");
        assert!(parsed.require_write_books().is_ok());
    }

    #[test]
    fn rejects_wrong_secret() {
        let mut c = claims(Rights::Read, Rights::Read);
        c.exp = (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp();
        let token = c.create_token("secret").expect("sign");
        assert!(StaffClaims::from_token(&token, "other").is_err());
    }

    #[test]
    fn read_rights_do_not_allow_write() {
        let c = claims(Rights::Read, Rights::Read);
        assert!(c.require_read_books().is_ok());
        assert!(c.require_write_books().is_err());
        assert!(c.require_write_categories().is_err());
    }
}
