//! API request/response models for books.

use crate::db::models::books::{BookCreateDBRequest, BookDBResponse};
use crate::errors::{Error, Result};
use crate::types::BookId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query parameters for listing books
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ListBooksQuery {
    /// Only books in the category with exactly this name. Empty means no filter.
    pub category: Option<String>,
}

/// Query parameters for the newest-books listing
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct NewestBooksQuery {
    /// Maximum number of books to return (at least 1, default 5)
    pub limit: Option<i64>,
}

/// Query parameters for searching books
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct SearchBooksQuery {
    /// Keyword matched case-insensitively as a literal substring of title or author.
    /// Leading and trailing whitespace is ignored, and a blank keyword is rejected.
    pub q: Option<String>,
}

/// Request body for creating or replacing a book.
///
/// Updates are a full replace: omitted optional fields reset to their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookCreate {
    #[schema(example = "Dune")]
    pub title: String,
    #[schema(example = "Frank Herbert")]
    pub author: String,
    #[serde(default)]
    #[schema(example = "9780441013593")]
    pub isbn: Option<String>,
    #[serde(default)]
    #[schema(example = 1965)]
    pub year: Option<i32>,
    /// Non-negative price, defaults to 0
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>, example = 19.99)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub is_featured: bool,
    /// Percentage between 0 and 100, defaults to 0
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>, example = 10)]
    pub discount_percentage: Option<Decimal>,
}

pub type BookUpdate = BookCreate;

/// Prices are stored as `NUMERIC(10, 2)`, discounts as `NUMERIC(5, 2)`.
const MAX_PRICE_EXCLUSIVE: i64 = 100_000_000;
const MAX_SCALE: u32 = 2;

/// Whether `value` has more fractional digits than the store keeps.
fn exceeds_scale(value: Decimal) -> bool {
    value.normalize().scale() > MAX_SCALE
}

impl BookCreate {
    /// Validate the body and convert it into a store request.
    pub fn into_db_request(self) -> Result<BookCreateDBRequest> {
        if self.title.trim().is_empty() {
            return Err(Error::bad_request("title is required"));
        }
        if self.author.trim().is_empty() {
            return Err(Error::bad_request("author is required"));
        }

        let price = self.price.unwrap_or(Decimal::ZERO);
        if price < Decimal::ZERO {
            return Err(Error::bad_request("price must not be negative"));
        }
        if price >= Decimal::from(MAX_PRICE_EXCLUSIVE) {
            return Err(Error::bad_request("price must be less than 100000000"));
        }
        if exceeds_scale(price) {
            return Err(Error::bad_request("price must have at most 2 decimal places"));
        }

        let discount_percentage = self.discount_percentage.unwrap_or(Decimal::ZERO);
        if discount_percentage < Decimal::ZERO || discount_percentage > Decimal::ONE_HUNDRED {
            return Err(Error::bad_request("discount_percentage must be between 0 and 100"));
        }
        if exceeds_scale(discount_percentage) {
            return Err(Error::bad_request("discount_percentage must have at most 2 decimal places"));
        }

        Ok(BookCreateDBRequest {
            title: self.title,
            author: self.author,
            isbn: self.isbn,
            year: self.year,
            price,
            is_featured: self.is_featured,
            discount_percentage,
        })
    }
}

/// A book as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookResponse {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub year: Option<i32>,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub is_featured: bool,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub discount_percentage: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BookDBResponse> for BookResponse {
    fn from(db: BookDBResponse) -> Self {
        Self {
            id: db.id,
            title: db.title,
            author: db.author,
            isbn: db.isbn,
            year: db.year,
            price: db.price,
            is_featured: db.is_featured,
            discount_percentage: db.discount_percentage,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
