//! Database models for categories.

use crate::types::CategoryId;
use serde::{Deserialize, Serialize};

/// Database representation of a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

pub type CategoryDBResponse = Category;
