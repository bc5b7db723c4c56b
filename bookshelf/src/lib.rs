//! # bookshelf: Catalog query service
//!
//! `bookshelf` answers filtered, searched and ordered queries over a PostgreSQL catalog of
//! books and their categories, and performs create, replace and delete on books.
//!
//! ## Architecture
//!
//! The HTTP layer is built on [Axum](https://github.com/tokio-rs/axum). Handlers in [`api`]
//! validate their input, acquire a connection from the shared [`db::pools::DbPool`] and call a
//! repository in [`db::handlers`]. Every book listing is described by a
//! [`db::handlers::books::BookFilter`] and executed through one path that streams rows through
//! the row mapper in [`db::mapping`]. Rows that break a record invariant are rejected or skipped
//! according to the configured [`types::DecodePolicy`].
//!
//! Mutations are single statements: an update that matches no row returns nothing, and a delete
//! reports how many rows it removed, so there is no separate existence check.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use bookshelf::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = bookshelf::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     bookshelf::telemetry::init_telemetry()?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Database Setup
//!
//! The service expects the schema in `migrations/` to be applied already. It never migrates
//! on its own; the migrations are applied automatically by `#[sqlx::test]` in tests.
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.
pub mod api;
pub mod config;
pub mod db;
pub mod errors;
mod openapi;
pub mod telemetry;
pub mod types;

#[cfg(all(test, feature = "postgres-tests"))]
mod test_utils;

use crate::{
    api::handlers::{books, categories, health},
    db::pools::DbPool,
    openapi::ApiDoc,
};
use axum::{Json, Router, http::HeaderValue, routing::get};
use bon::Builder;
pub use config::Config;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

/// Application state shared across all request handlers.
///
/// # Example
///
/// ```ignore
/// let state = AppState::builder()
///     .db(DbPool::new(pool))
///     .config(config)
///     .build();
/// ```
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: DbPool,
    pub config: Config,
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let origins = &config.cors.allowed_origins;

    let allow_origin = if origins.iter().any(|origin| origin == "*") {
        AllowOrigin::any()
    } else {
        let mut values = Vec::with_capacity(origins.len());
        for origin in origins {
            values.push(origin.parse::<HeaderValue>()?);
        }
        AllowOrigin::list(values)
    };

    Ok(CorsLayer::new().allow_origin(allow_origin).allow_methods(Any).allow_headers(Any))
}

/// Build the application router with all endpoints and middleware.
///
/// - Catalog routes under `/api/v1`
/// - `/health` backed by the pool probe
/// - OpenAPI JSON at `/api-docs/openapi.json`, rendered at `/docs`
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let cors_layer = create_cors_layer(&state.config)?;

    let api_routes = Router::new()
        .route("/books", get(books::list_books).post(books::create_book))
        .route("/books/new", get(books::list_newest_books))
        .route("/books/search", get(books::search_books))
        .route("/books/featured", get(books::list_featured_books))
        .route("/books/discounted", get(books::list_discounted_books))
        .route(
            "/books/{id}",
            get(books::get_book).put(books::update_book).delete(books::delete_book),
        )
        .route("/categories", get(categories::list_categories));

    let router = Router::new()
        .route("/health", get(health::health))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .nest("/api/v1", api_routes)
        .with_state(state)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        .layer(cors_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    Ok(router)
}

pub struct Application {
    router: Router,
    config: Config,
    db: DbPool,
}

impl Application {
    /// Create a new application instance, connecting to the configured store.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        Self::new_with_pool(config, None).await
    }

    /// Create an application on an existing pool, or connect if none is given.
    pub async fn new_with_pool(config: Config, pool: Option<PgPool>) -> anyhow::Result<Self> {
        debug!("Starting bookshelf with configuration: {:#?}", config);

        let db = match pool {
            Some(pool) => DbPool::new(pool),
            None => DbPool::connect(&config.database).await?,
        };

        let state = AppState::builder().db(db.clone()).config(config.clone()).build();
        let router = build_router(state)?;

        Ok(Self { router, config, db })
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router.into_make_service()).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!("Bookshelf listening on http://{}", bind_addr);

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing database connections...");
        self.db.close().await;

        Ok(())
    }
}
