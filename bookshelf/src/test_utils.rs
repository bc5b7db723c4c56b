//! Test utilities for store-backed tests (built with the `postgres-tests` feature).

use crate::config::{Config, DatabaseConfig, PoolSettings};
use crate::db::{
    handlers::{Books, Repository},
    models::{
        books::{Book, BookCreateDBRequest},
        categories::Category,
    },
};
use crate::types::{BookId, CategoryId};
use axum_test::TestServer;
use rust_decimal::Decimal;
use sqlx::PgPool;

pub async fn create_test_app(pool: PgPool) -> TestServer {
    create_test_app_with_config(pool, create_test_config()).await
}

pub async fn create_test_app_with_config(pool: PgPool, config: Config) -> TestServer {
    let app = crate::Application::new_with_pool(config, Some(pool))
        .await
        .expect("Failed to create application");

    app.into_test_server()
}

pub fn create_test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        database: DatabaseConfig {
            pool: PoolSettings {
                max_connections: 2,
                max_idle_connections: 2,
                ..Default::default()
            },
            ..Default::default()
        },
        ..Default::default()
    }
}

/// A valid create request with every optional field at its default.
pub fn book_request(title: &str, author: &str) -> BookCreateDBRequest {
    BookCreateDBRequest {
        title: title.to_string(),
        author: author.to_string(),
        isbn: None,
        year: None,
        price: Decimal::ZERO,
        is_featured: false,
        discount_percentage: Decimal::ZERO,
    }
}

pub async fn create_test_book(pool: &PgPool, title: &str, author: &str) -> Book {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    Books::new(&mut conn)
        .create(&book_request(title, author))
        .await
        .expect("Failed to create test book")
}

pub async fn create_test_category(pool: &PgPool, name: &str) -> Category {
    sqlx::query_as::<_, Category>("INSERT INTO categories (name) VALUES ($1) RETURNING id, name")
        .bind(name)
        .fetch_one(pool)
        .await
        .expect("Failed to create test category")
}

pub async fn assign_category(pool: &PgPool, book_id: BookId, category_id: CategoryId) {
    sqlx::query("INSERT INTO book_categories (book_id, category_id) VALUES ($1, $2)")
        .bind(book_id)
        .bind(category_id)
        .execute(pool)
        .await
        .expect("Failed to assign category");
}
