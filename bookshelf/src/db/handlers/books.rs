//! Database repository for books.
//!
//! Every read goes through a single execution path: a [`BookFilter`] names the query
//! shape, [`BookFilter::to_query`] renders it with all caller input bound as parameters,
//! and [`Books::list`] streams the resulting rows through the row mapper under the
//! repository's [`DecodePolicy`].
//!
//! Mutations are single statements. `update` relies on `RETURNING` and `delete` on the
//! affected-row count to detect a missing book, so there is no read-then-write window.

use crate::{
    db::{
        errors::Result,
        handlers::repository::Repository,
        mapping::book_from_row,
        models::books::{BookCreateDBRequest, BookDBResponse, BookUpdateDBRequest},
    },
    types::{BookId, DecodePolicy},
};
use futures::TryStreamExt;
use rust_decimal::Decimal;
use sqlx::{PgConnection, Postgres, QueryBuilder};
use tracing::{instrument, warn};

macro_rules! book_columns {
    () => {
        "b.id, b.title, b.author, b.isbn, b.year, b.price, b.created_at, b.updated_at, b.is_featured, b.discount_percentage"
    };
}

/// A non-blank search keyword, matched literally and case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Returns `None` for a blank keyword.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `ILIKE` pattern matching the keyword anywhere, with LIKE metacharacters escaped.
    fn like_pattern(&self) -> String {
        format!("%{}%", escape_like(&self.0))
    }
}

/// Escape `\`, `%` and `_` for use with `LIKE ... ESCAPE '\'`.
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// The shape of a book listing.
#[derive(Debug, Clone, PartialEq)]
pub enum BookFilter {
    /// Every book, in the store's natural order
    All,
    /// Books associated with the category whose name equals this exactly
    Category(String),
    /// The most recently created books, newest first
    Newest { limit: i64 },
    /// Books whose title or author contains the term
    Search(SearchTerm),
    /// Books flagged as featured
    Featured,
    /// Books with a positive discount percentage
    Discounted,
}

impl BookFilter {
    /// Listing for an optional category name. An empty name counts as absent.
    pub fn for_category(category: Option<&str>) -> Self {
        match category {
            Some(name) if !name.is_empty() => BookFilter::Category(name.to_string()),
            _ => BookFilter::All,
        }
    }

    /// Render the filter as a parameterised query.
    pub fn to_query(&self) -> QueryBuilder<'_, Postgres> {
        let mut query = QueryBuilder::new(concat!("SELECT ", book_columns!(), " FROM books b"));

        match self {
            BookFilter::All => {}
            BookFilter::Category(name) => {
                query.push(" JOIN book_categories bc ON bc.book_id = b.id");
                query.push(" JOIN categories c ON c.id = bc.category_id");
                query.push(" WHERE c.name = ");
                query.push_bind(name.as_str());
            }
            BookFilter::Newest { limit } => {
                query.push(" ORDER BY b.created_at DESC LIMIT ");
                query.push_bind(*limit);
            }
            BookFilter::Search(term) => {
                let pattern = term.like_pattern();
                query.push(" WHERE b.title ILIKE ");
                query.push_bind(pattern.clone());
                query.push(" ESCAPE '\\' OR b.author ILIKE ");
                query.push_bind(pattern);
                query.push(" ESCAPE '\\'");
            }
            BookFilter::Featured => {
                query.push(" WHERE b.is_featured = ");
                query.push_bind(true);
            }
            BookFilter::Discounted => {
                query.push(" WHERE b.discount_percentage > ");
                query.push_bind(Decimal::ZERO);
            }
        }

        query
    }

    fn kind(&self) -> &'static str {
        match self {
            BookFilter::All => "all",
            BookFilter::Category(_) => "category",
            BookFilter::Newest { .. } => "newest",
            BookFilter::Search(_) => "search",
            BookFilter::Featured => "featured",
            BookFilter::Discounted => "discounted",
        }
    }
}

pub struct Books<'c> {
    db: &'c mut PgConnection,
    decode_policy: DecodePolicy,
}

impl<'c> Books<'c> {
    /// Create a new Books repository instance with the strict decode policy
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self {
            db,
            decode_policy: DecodePolicy::default(),
        }
    }

    pub fn with_decode_policy(mut self, decode_policy: DecodePolicy) -> Self {
        self.decode_policy = decode_policy;
        self
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Books<'c> {
    type CreateRequest = BookCreateDBRequest;
    type UpdateRequest = BookUpdateDBRequest;
    type Response = BookDBResponse;
    type Id = BookId;
    type Filter = BookFilter;

    #[instrument(skip(self, request), fields(title = %request.title), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let row = sqlx::query(concat!(
            "INSERT INTO books AS b (title, author, isbn, year, price, is_featured, discount_percentage) ",
            "VALUES ($1, $2, $3, $4, $5, $6, $7) ",
            "RETURNING ",
            book_columns!()
        ))
        .bind(&request.title)
        .bind(&request.author)
        .bind(&request.isbn)
        .bind(request.year)
        .bind(request.price)
        .bind(request.is_featured)
        .bind(request.discount_percentage)
        .fetch_one(&mut *self.db)
        .await?;

        book_from_row(&row)
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let row = sqlx::query(concat!("SELECT ", book_columns!(), " FROM books b WHERE b.id = $1"))
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        row.as_ref().map(book_from_row).transpose()
    }

    #[instrument(skip(self, filter), fields(kind = filter.kind()), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let policy = self.decode_policy;
        let mut query = filter.to_query();
        let mut rows = query.build().fetch(&mut *self.db);

        let mut books = Vec::new();
        while let Some(row) = rows.try_next().await? {
            match book_from_row(&row) {
                Ok(book) => books.push(book),
                Err(err) if policy == DecodePolicy::Lenient => {
                    warn!(error = %err, "Skipping undecodable book row");
                }
                Err(err) => return Err(err),
            }
        }

        Ok(books)
    }

    #[instrument(skip(self), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Option<Self::Response>> {
        let row = sqlx::query(concat!(
            "UPDATE books AS b SET title = $1, author = $2, isbn = $3, year = $4, price = $5, ",
            "is_featured = $6, discount_percentage = $7, ",
            "updated_at = GREATEST(NOW(), b.updated_at + INTERVAL '1 microsecond') ",
            "WHERE b.id = $8 ",
            "RETURNING ",
            book_columns!()
        ))
        .bind(&request.title)
        .bind(&request.author)
        .bind(&request.isbn)
        .bind(request.year)
        .bind(request.price)
        .bind(request.is_featured)
        .bind(request.discount_percentage)
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?;

        row.as_ref().map(book_from_row).transpose()
    }
}
