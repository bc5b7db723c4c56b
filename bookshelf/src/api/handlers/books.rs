use crate::api::extractors::{JsonBody, PathParam, QueryParams};
use crate::api::models::books::{BookCreate, BookResponse, BookUpdate, ListBooksQuery, NewestBooksQuery, SearchBooksQuery};
use crate::api::models::messages::MessageResponse;
use crate::db::handlers::{
    Books, Repository,
    books::{BookFilter, SearchTerm},
};
use crate::errors::{Error, Result};
use crate::{AppState, types::BookId};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
};

fn book_not_found(id: BookId) -> Error {
    Error::NotFound {
        resource: "Book".to_string(),
        id: id.to_string(),
    }
}

/// Run a listing with the configured decode policy.
async fn list_matching(state: &AppState, filter: BookFilter) -> Result<Json<Vec<BookResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Books::new(&mut conn).with_decode_policy(state.config.catalog.decode_policy);

    let books = repo.list(&filter).await?;
    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/books",
    tag = "books",
    summary = "List books",
    description = "Lists every book, or only the books in the named category.",
    params(ListBooksQuery),
    responses(
        (status = 200, description = "Matching books (possibly empty)", body = Vec<BookResponse>),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_books(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListBooksQuery>,
) -> Result<Json<Vec<BookResponse>>> {
    list_matching(&state, BookFilter::for_category(query.category.as_deref())).await
}

#[utoipa::path(
    get,
    path = "/api/v1/books/new",
    tag = "books",
    summary = "List newest books",
    params(NewestBooksQuery),
    responses(
        (status = 200, description = "Most recently created books, newest first", body = Vec<BookResponse>),
        (status = 400, description = "Limit below 1 or not a number", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_newest_books(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<NewestBooksQuery>,
) -> Result<Json<Vec<BookResponse>>> {
    let limit = state
        .config
        .catalog
        .newest_limit(query.limit)
        .ok_or_else(|| Error::bad_request("limit must be at least 1"))?;

    list_matching(&state, BookFilter::Newest { limit }).await
}

#[utoipa::path(
    get,
    path = "/api/v1/books/search",
    tag = "books",
    summary = "Search books",
    description = "Case-insensitive substring match of the keyword against title or author.",
    params(SearchBooksQuery),
    responses(
        (status = 200, description = "Matching books (possibly empty)", body = Vec<BookResponse>),
        (status = 400, description = "Missing or blank keyword", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn search_books(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<SearchBooksQuery>,
) -> Result<Json<Vec<BookResponse>>> {
    let term = query
        .q
        .as_deref()
        .and_then(SearchTerm::new)
        .ok_or_else(|| Error::bad_request("query parameter 'q' is required"))?;

    list_matching(&state, BookFilter::Search(term)).await
}

#[utoipa::path(
    get,
    path = "/api/v1/books/featured",
    tag = "books",
    summary = "List featured books",
    responses(
        (status = 200, description = "Featured books (possibly empty)", body = Vec<BookResponse>),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_featured_books(State(state): State<AppState>) -> Result<Json<Vec<BookResponse>>> {
    list_matching(&state, BookFilter::Featured).await
}

#[utoipa::path(
    get,
    path = "/api/v1/books/discounted",
    tag = "books",
    summary = "List discounted books",
    responses(
        (status = 200, description = "Books with a positive discount (possibly empty)", body = Vec<BookResponse>),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_discounted_books(State(state): State<AppState>) -> Result<Json<Vec<BookResponse>>> {
    list_matching(&state, BookFilter::Discounted).await
}

#[utoipa::path(
    get,
    path = "/api/v1/books/{id}",
    tag = "books",
    summary = "Get book",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "The book", body = BookResponse),
        (status = 400, description = "Malformed ID", body = MessageResponse),
        (status = 404, description = "No book with this ID", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
#[tracing::instrument(skip_all, fields(book_id = id))]
pub async fn get_book(State(state): State<AppState>, PathParam(id): PathParam<BookId>) -> Result<Json<BookResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Books::new(&mut conn);

    match repo.get_by_id(id).await? {
        Some(book) => Ok(Json(BookResponse::from(book))),
        None => Err(book_not_found(id)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/books",
    tag = "books",
    summary = "Create book",
    request_body = BookCreate,
    responses(
        (status = 201, description = "Book created", body = BookResponse),
        (status = 400, description = "Invalid book", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_book(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<BookCreate>,
) -> Result<(StatusCode, Json<BookResponse>)> {
    let request = body.into_db_request()?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Books::new(&mut conn);

    let book = repo.create(&request).await?;
    Ok((StatusCode::CREATED, Json(BookResponse::from(book))))
}

#[utoipa::path(
    put,
    path = "/api/v1/books/{id}",
    tag = "books",
    summary = "Replace book",
    description = "Replaces every mutable field. Omitted optional fields reset to their defaults.",
    params(("id" = i32, Path, description = "Book ID")),
    request_body = BookUpdate,
    responses(
        (status = 200, description = "Book updated", body = BookResponse),
        (status = 400, description = "Invalid book", body = MessageResponse),
        (status = 404, description = "No book with this ID", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
#[tracing::instrument(skip_all, fields(book_id = id))]
pub async fn update_book(
    State(state): State<AppState>,
    PathParam(id): PathParam<BookId>,
    JsonBody(body): JsonBody<BookUpdate>,
) -> Result<Json<BookResponse>> {
    let request = body.into_db_request()?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Books::new(&mut conn);

    match repo.update(id, &request).await? {
        Some(book) => Ok(Json(BookResponse::from(book))),
        None => Err(book_not_found(id)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/books/{id}",
    tag = "books",
    summary = "Delete book",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 400, description = "Malformed ID", body = MessageResponse),
        (status = 404, description = "No book with this ID", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
#[tracing::instrument(skip_all, fields(book_id = id))]
pub async fn delete_book(
    State(state): State<AppState>,
    PathParam(id): PathParam<BookId>,
) -> Result<Json<MessageResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Books::new(&mut conn);

    if repo.delete(id).await? {
        Ok(Json(MessageResponse::new("book deleted successfully")))
    } else {
        Err(book_not_found(id))
    }
}
