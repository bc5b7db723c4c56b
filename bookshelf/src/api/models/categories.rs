//! API response models for categories.

use crate::db::models::categories::CategoryDBResponse;
use crate::types::CategoryId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: CategoryId,
    #[schema(example = "Sci-Fi")]
    pub name: String,
}

impl From<CategoryDBResponse> for CategoryResponse {
    fn from(db: CategoryDBResponse) -> Self {
        Self { id: db.id, name: db.name }
    }
}
