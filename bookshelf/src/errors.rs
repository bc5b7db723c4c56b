use crate::api::models::messages::MessageResponse;
use crate::db::errors::DbError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
    /// Invalid request data: a missing or malformed parameter or body field
    #[error("{message}")]
    BadRequest { message: String },

    /// Requested resource not found
    #[error("{resource} with ID {id} not found")]
    NotFound { resource: String, id: String },

    /// Configuration rejected at startup
    #[error("{message}")]
    Config { message: String },

    /// Database operation error
    #[error(transparent)]
    Database(#[from] DbError),

    /// Unexpected error with full context chain
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Error::BadRequest { message: message.into() }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } | Error::Database(DbError::NotFound) => StatusCode::NOT_FOUND,
            Error::Config { .. } | Error::Database(_) | Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Log full error details for debugging - different log levels based on severity
        match &self {
            Error::Database(DbError::NotFound) | Error::BadRequest { .. } | Error::NotFound { .. } => {
                tracing::debug!("Client error: {}", self);
            }
            Error::Database(_) | Error::Config { .. } | Error::Other(_) => {
                tracing::error!("Internal service error: {:#}", self);
            }
        }

        let body = MessageResponse::new(self.to_string());
        (self.status_code(), Json(body)).into_response()
    }
}

/// Type alias for service operation results
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::bad_request("q is required").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            Error::NotFound {
                resource: "Book".to_string(),
                id: "7".to_string()
            }
            .status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(Error::Database(DbError::NotFound).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            Error::Database(DbError::decode("bad row")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            Error::Database(DbError::UniqueViolation {
                constraint: Some("books_isbn_unique".to_string()),
                table: Some("books".to_string()),
                message: "duplicate key".to_string(),
            })
            .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_not_found_body_is_json_message() {
        let response = Error::NotFound {
            resource: "Book".to_string(),
            id: "42".to_string(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_of(response).await;
        assert_eq!(body, serde_json::json!({ "message": "Book with ID 42 not found" }));
    }

    #[tokio::test]
    async fn test_store_failure_carries_its_message() {
        let response = Error::Other(anyhow::anyhow!("connection refused")).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_of(response).await;
        assert_eq!(body["message"], "connection refused");
    }
}
