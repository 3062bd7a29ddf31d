//! Persistence port for product documents.
//!
//! The service layer only sees [`ProductRepository`]; which document store
//! sits behind it is decided once, at start-up.

use crate::models;
use async_trait::async_trait;
use uuid::Uuid;

pub mod memory;
pub mod postgres;

pub use memory::InMemoryProductRepository;
pub use postgres::PgProductRepository;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// A document with the same `id` is already stored.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),
    #[error("{0}")]
    Storage(String),
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn insert(&self, product: &models::Product) -> Result<(), StoreError>;

    async fn find_one(&self, id: Uuid) -> Result<Option<models::Product>, StoreError>;

    /// Documents whose price lies strictly inside `range`, in insertion order.
    async fn find_many(
        &self,
        range: models::PriceRange,
    ) -> Result<Vec<models::Product>, StoreError>;

    /// Applies `changes` atomically and returns the document after the update.
    async fn find_one_and_update(
        &self,
        id: Uuid,
        changes: &models::ProductChanges,
    ) -> Result<Option<models::Product>, StoreError>;

    /// `true` when a document was actually removed.
    async fn delete_one(&self, id: Uuid) -> Result<bool, StoreError>;
}
