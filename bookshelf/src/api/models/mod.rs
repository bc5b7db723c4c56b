//! API request and response data models.
//!
//! API models are distinct from the database records in [`crate::db::models`], so the
//! wire format can evolve independently of storage. All models derive `utoipa::ToSchema`
//! for the generated OpenAPI document.
//!
//! - [`books`]: Book bodies, listing query parameters and write validation
//! - [`categories`]: Category listing
//! - [`messages`]: Plain `{ "message": ... }` bodies

pub mod books;
pub mod categories;
pub mod messages;
