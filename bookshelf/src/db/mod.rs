//! Database layer for data persistence and access.
//!
//! This module implements the data access layer using SQLx with PostgreSQL.
//! It follows the Repository pattern to provide clean abstractions over database operations.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  (API request handlers)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │ Repositories│  (db::handlers - filters, queries & mutations)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │ Row mapping │  (db::mapping - rows to checked records)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │  PostgreSQL │  (through db::pools::DbPool)
//! └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`handlers`]: Repository implementations
//! - [`mapping`]: Row-to-record conversion with invariant checks
//! - [`models`]: Database record structures matching table schemas
//! - [`pools`]: Bounded connection pool and liveness probe
//! - [`errors`]: Database-specific error types
//!
//! ## Example Usage
//!
//! ```ignore
//! use bookshelf::db::handlers::{Books, Repository};
//!
//! let mut conn = state.db.acquire().await?;
//! let mut books = Books::new(&mut conn);
//!
//! match books.get_by_id(7).await? {
//!     Some(book) => println!("{}", book.title),
//!     None => println!("no such book"),
//! }
//! ```
//!
//! Repositories take any `&mut PgConnection`, so they work the same on a pooled
//! connection or inside a transaction.

pub mod errors;
pub mod handlers;
pub mod mapping;
pub mod models;
pub mod pools;
