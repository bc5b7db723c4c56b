//! Repository implementations for database access.
//!
//! Each repository wraps a borrowed SQLx connection (a pooled connection or a
//! transaction) and exposes strongly-typed operations over one table:
//!
//! - [`Books`]: Catalog items, listed through a [`books::BookFilter`]
//! - [`Categories`]: Category listing
//!
//! ```ignore
//! use bookshelf::db::handlers::{Books, Repository, books::BookFilter};
//!
//! let mut conn = pool.acquire().await?;
//! let featured = Books::new(&mut conn).list(&BookFilter::Featured).await?;
//! ```

pub mod books;
pub mod categories;
pub mod repository;

pub use books::Books;
pub use categories::Categories;
pub use repository::Repository;
