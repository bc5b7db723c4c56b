//! OpenAPI documentation for the catalog API.

use utoipa::OpenApi;

use crate::api;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookshelf",
        description = "Catalog queries and mutations for books and their categories."
    ),
    paths(
        api::handlers::books::list_books,
        api::handlers::books::list_newest_books,
        api::handlers::books::search_books,
        api::handlers::books::list_featured_books,
        api::handlers::books::list_discounted_books,
        api::handlers::books::get_book,
        api::handlers::books::create_book,
        api::handlers::books::update_book,
        api::handlers::books::delete_book,
        api::handlers::categories::list_categories,
        api::handlers::health::health,
    ),
    components(schemas(
        api::models::books::BookResponse,
        api::models::books::BookCreate,
        api::models::categories::CategoryResponse,
        api::models::messages::MessageResponse,
    )),
    tags(
        (name = "books", description = "Book listings, search and mutations"),
        (name = "categories", description = "Category listing"),
        (name = "health", description = "Store liveness"),
    )
)]
pub struct ApiDoc;
