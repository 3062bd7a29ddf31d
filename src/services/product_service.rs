//! Product use-cases.
//!
//! Owns the business rules around the repository: id and timestamp
//! generation, not-found semantics and translation of storage failures into
//! [`ProductError`]. Nothing from the storage backend leaks past this layer.

use crate::forms::{ProductForm, ProductUpdateForm};
use crate::models::{PriceRange, Product, ProductChanges};
use crate::repository::{ProductRepository, StoreError};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Result type for product operations
pub type Result<T> = std::result::Result<T, ProductError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProductError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Insertion(String),
    #[error("No valid fields to update")]
    NoFieldsToUpdate,
    #[error("{0}")]
    Storage(String),
}

impl ProductError {
    fn not_found(id: Uuid) -> Self {
        Self::NotFound(format!("Product not found with filter: {}", id))
    }
}

impl From<StoreError> for ProductError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey(_) => {
                Self::Insertion("A product with the same ID already exists.".to_string())
            }
            StoreError::Storage(msg) => Self::Storage(msg),
        }
    }
}

#[derive(Clone)]
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    #[tracing::instrument(name = "Create product.", skip(self, form))]
    pub async fn create(&self, form: ProductForm) -> Result<Product> {
        let product = Product::new(form.name, form.quantity, form.price, form.status);

        self.repository
            .insert(&product)
            .await
            .map_err(|err| match err {
                StoreError::Storage(msg) => {
                    ProductError::Insertion(format!("Error inserting product: {}", msg))
                }
                duplicate => duplicate.into(),
            })?;

        tracing::info!("Product {} has been created", product.id);
        Ok(product)
    }

    #[tracing::instrument(name = "Get product.", skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<Product> {
        self.repository
            .find_one(id)
            .await?
            .ok_or_else(|| ProductError::not_found(id))
    }

    #[tracing::instrument(name = "Query products.", skip(self))]
    pub async fn query(&self, range: PriceRange) -> Result<Vec<Product>> {
        let products = self.repository.find_many(range).await?;
        tracing::debug!("Fetched {} products", products.len());
        Ok(products)
    }

    #[tracing::instrument(name = "Update product.", skip(self, form))]
    pub async fn update(&self, id: Uuid, form: ProductUpdateForm) -> Result<Product> {
        let mut changes: ProductChanges = form.into();
        if changes.is_empty() {
            return Err(ProductError::NoFieldsToUpdate);
        }
        changes.updated_at = Some(Utc::now());

        self.repository
            .find_one_and_update(id, &changes)
            .await?
            .ok_or_else(|| ProductError::not_found(id))
    }

    /// Looks the product up first so a missing id is reported as not found
    /// rather than as a delete that removed nothing.
    #[tracing::instrument(name = "Delete product.", skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        if self.repository.find_one(id).await?.is_none() {
            return Err(ProductError::not_found(id));
        }

        Ok(self.repository.delete_one(id).await?)
    }
}
