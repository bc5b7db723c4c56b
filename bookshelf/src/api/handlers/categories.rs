use crate::api::models::{categories::CategoryResponse, messages::MessageResponse};
use crate::db::handlers::Categories;
use crate::errors::{Error, Result};
use crate::AppState;
use axum::{Json, extract::State};

#[utoipa::path(
    get,
    path = "/api/v1/categories",
    tag = "categories",
    summary = "List categories",
    responses(
        (status = 200, description = "Every category, ordered by ID", body = Vec<CategoryResponse>),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<CategoryResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let categories = Categories::new(&mut conn).list().await?;

    Ok(Json(categories.into_iter().map(CategoryResponse::from).collect()))
}
