//! Row-to-record mapping.
//!
//! Converts raw PostgreSQL rows into typed records. A row that fails to decode, or that
//! decodes into a record breaking a table invariant, is reported as [`DbError::Decode`]
//! so callers can tell it apart from a failure of the query itself.

use crate::db::{
    errors::{DbError, Result},
    models::{books::Book, categories::Category},
};
use rust_decimal::Decimal;
use sqlx::{FromRow, postgres::PgRow};

/// Maps a row to a [`Book`], checking `price >= 0` and `updated_at >= created_at`.
pub(crate) fn book_from_row(row: &PgRow) -> Result<Book> {
    let book = Book::from_row(row)?;
    check_book(&book)?;
    Ok(book)
}

/// Maps a row to a [`Category`].
pub(crate) fn category_from_row(row: &PgRow) -> Result<Category> {
    Ok(Category::from_row(row)?)
}

fn check_book(book: &Book) -> Result<()> {
    if book.price < Decimal::ZERO {
        return Err(DbError::decode(format!("book {} has negative price {}", book.id, book.price)));
    }
    if book.updated_at < book.created_at {
        return Err(DbError::decode(format!(
            "book {} was updated ({}) before it was created ({})",
            book.id, book.updated_at, book.created_at
        )));
    }
    Ok(())
}
