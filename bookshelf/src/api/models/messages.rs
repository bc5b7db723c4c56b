//! Plain message bodies.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single human-readable message, used for errors, deletions and health checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "book deleted successfully")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
