//! Database models for books.

use crate::types::BookId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Database representation of a book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub year: Option<i32>,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_featured: bool,
    pub discount_percentage: Decimal,
}

/// Request to create a new book. The store assigns `id`, `created_at` and `updated_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookCreateDBRequest {
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub year: Option<i32>,
    pub price: Decimal,
    pub is_featured: bool,
    pub discount_percentage: Decimal,
}

/// Request to update a book. Updates replace every mutable column, so the shape is the
/// same as creation.
pub type BookUpdateDBRequest = BookCreateDBRequest;

/// Response from database after reading, creating or updating a book
pub type BookDBResponse = Book;
