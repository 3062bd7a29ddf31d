use super::{ProductRepository, StoreError};
use crate::db;
use crate::models;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// Products stored as JSONB documents in the `products` table.
#[derive(Debug, Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn insert(&self, product: &models::Product) -> Result<(), StoreError> {
        db::product::insert(&self.pool, product).await
    }

    async fn find_one(&self, id: Uuid) -> Result<Option<models::Product>, StoreError> {
        db::product::fetch(&self.pool, id).await
    }

    async fn find_many(
        &self,
        range: models::PriceRange,
    ) -> Result<Vec<models::Product>, StoreError> {
        db::product::fetch_by_price(&self.pool, range).await
    }

    async fn find_one_and_update(
        &self,
        id: Uuid,
        changes: &models::ProductChanges,
    ) -> Result<Option<models::Product>, StoreError> {
        db::product::update_fields(&self.pool, id, changes).await
    }

    async fn delete_one(&self, id: Uuid) -> Result<bool, StoreError> {
        db::product::delete(&self.pool, id).await
    }
}
