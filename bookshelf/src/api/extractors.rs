//! Request extractors that report malformed input as [`Error::BadRequest`].
//!
//! Axum's own `Json`, `Query` and `Path` reject with plain-text bodies and, for bodies that
//! parse but miss fields, a 422. These wrappers delegate to them and turn every rejection
//! into a 400 with the usual `{ "message": ... }` body.

use crate::errors::Error;
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

/// JSON request body.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| Error::bad_request(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Query string parameters.
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| Error::bad_request(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Path segments.
pub struct PathParam<T>(pub T);

impl<S, T> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| Error::bad_request(rejection.body_text()))?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        http::StatusCode,
        routing::{get, post},
    };
    use axum_test::TestServer;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Payload {
        name: String,
    }

    #[derive(Deserialize)]
    struct Paging {
        limit: Option<i64>,
    }

    fn server() -> TestServer {
        let router = Router::new()
            .route(
                "/items",
                post(|JsonBody(body): JsonBody<Payload>| async move { body.name })
                    .get(|QueryParams(paging): QueryParams<Paging>| async move { paging.limit.unwrap_or(0).to_string() }),
            )
            .route("/items/{id}", get(|PathParam(id): PathParam<i32>| async move { id.to_string() }));
        TestServer::new(router.into_make_service()).unwrap()
    }

    fn assert_json_bad_request(response: &axum_test::TestResponse, mentions: &str) {
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.header("content-type"), "application/json");
        let body: serde_json::Value = response.json();
        let message = body["message"].as_str().unwrap();
        assert!(message.contains(mentions), "unexpected message: {message}");
    }

    #[tokio::test]
    async fn test_valid_input_passes_through() {
        let server = server();

        server.post("/items").json(&json!({ "name": "dune" })).await.assert_text("dune");
        server.get("/items?limit=3").await.assert_text("3");
        server.get("/items/7").await.assert_text("7");
    }

    #[tokio::test]
    async fn test_missing_body_field_is_bad_request() {
        let response = server().post("/items").json(&json!({ "other": 1 })).await;
        assert_json_bad_request(&response, "name");
    }

    #[tokio::test]
    async fn test_unparseable_body_is_bad_request() {
        let response = server()
            .post("/items")
            .content_type("application/json")
            .text("{not json")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_query_is_bad_request() {
        let response = server().get("/items?limit=abc").await;
        assert_json_bad_request(&response, "limit");
    }

    #[tokio::test]
    async fn test_malformed_path_is_bad_request() {
        let response = server().get("/items/abc").await;
        assert_json_bad_request(&response, "abc");
    }
}
