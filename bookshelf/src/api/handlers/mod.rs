//! HTTP request handlers for all API endpoints.
//!
//! Handlers validate query parameters and bodies, run the matching repository
//! operation on a pooled connection, and shape the result into API models.
//!
//! - [`books`]: Book listings, search and mutations
//! - [`categories`]: Category listing
//! - [`health`]: Store liveness probe

pub mod books;
pub mod categories;
pub mod health;
