//! Database repository for categories.

use crate::db::{errors::Result, mapping::category_from_row, models::categories::CategoryDBResponse};
use sqlx::PgConnection;
use tracing::instrument;

pub struct Categories<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Categories<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// List every category ordered by id.
    #[instrument(skip(self), err)]
    pub async fn list(&mut self) -> Result<Vec<CategoryDBResponse>> {
        let rows = sqlx::query("SELECT id, name FROM categories ORDER BY id")
            .fetch_all(&mut *self.db)
            .await?;

        rows.iter().map(category_from_row).collect()
    }
}
