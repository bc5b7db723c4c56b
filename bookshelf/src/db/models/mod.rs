//! Database record models matching table schemas.
//!
//! These structs correspond directly to table rows and derive `sqlx::FromRow`. They are
//! kept distinct from the API models in [`crate::api::models`] so storage and the public
//! contract can evolve independently.
//!
//! - [`books`]: The `books` table and its create/update requests
//! - [`categories`]: The read-only `categories` table

pub mod books;
pub mod categories;
