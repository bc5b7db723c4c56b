use crate::AppState;
use crate::api::models::messages::MessageResponse;
use crate::db::pools::PoolHealth;
use axum::{Json, extract::State, http::StatusCode};

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    summary = "Store liveness",
    responses(
        (status = 200, description = "The store answers", body = MessageResponse),
        (status = 503, description = "The store is unreachable", body = MessageResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<MessageResponse>) {
    match state.db.probe().await {
        PoolHealth::Healthy => (StatusCode::OK, Json(MessageResponse::new("healthy"))),
        PoolHealth::Unreachable => (StatusCode::SERVICE_UNAVAILABLE, Json(MessageResponse::new("unhealthy"))),
    }
}
