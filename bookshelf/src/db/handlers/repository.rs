//! Base repository trait for database operations.

use crate::db::errors::Result;

/// Base repository trait providing common database operations
///
/// A repository is the data access layer for one postgres table. It creates, reads,
/// updates and deletes entities, and lists them through a filter value that selects the
/// query shape.
///
/// Absence is explicit in the return types: `get_by_id` and `update` yield `None` and
/// `delete` yields `false` when no row carries the identifier. Listing never yields an
/// absent collection, only a possibly empty one.
#[async_trait::async_trait]
pub trait Repository {
    /// The request type for creating entities
    type CreateRequest;

    /// The request type for updating entities
    type UpdateRequest;

    /// The response/DTO type returned by operations
    type Response;

    /// The identifier type for lookups
    type Id: Send + Sync;

    /// The filter type for list operations
    type Filter: Send + Sync;

    /// Create a new entity
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response>;

    /// Get an entity by ID
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>>;

    /// List entities matching a filter
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>>;

    /// Delete an entity by ID, returning whether a row was removed
    async fn delete(&mut self, id: Self::Id) -> Result<bool>;

    /// Update an entity by ID
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Option<Self::Response>>;
}
