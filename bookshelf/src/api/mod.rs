//! API layer for HTTP request handling and data models.
//!
//! - **[`extractors`]**: Body, query and path extractors with JSON 400 rejections
//! - **[`handlers`]**: Axum route handlers
//! - **[`models`]**: Request/response data structures
//!
//! # API Structure
//!
//! - **Books** (`/api/v1/books/*`): Listings, search, and create/replace/delete
//! - **Categories** (`/api/v1/categories`): Category listing
//! - **Health** (`/health`): Store liveness
//!
//! All endpoints are documented with `utoipa`. The document is served at
//! `/api-docs/openapi.json` and rendered at `/docs`.

pub mod extractors;
pub mod handlers;
pub mod models;
