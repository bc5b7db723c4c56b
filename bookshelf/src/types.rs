//! Common type definitions.
//!
//! # ID Types
//!
//! Catalog identifiers are `SERIAL` columns, so they are plain `i32` values wrapped in
//! type aliases for readability:
//!
//! - [`BookId`]: Book identifier (server-assigned, immutable)
//! - [`CategoryId`]: Category identifier

use serde::Deserialize;

// Type aliases for IDs
pub type BookId = i32;
pub type CategoryId = i32;

/// How list queries treat a row that cannot be mapped to its typed record.
///
/// Single-row fetches always surface decode failures regardless of this setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodePolicy {
    /// Abort the whole listing on the first undecodable row
    #[default]
    Strict,
    /// Log and skip the offending row, then continue
    Lenient,
}
