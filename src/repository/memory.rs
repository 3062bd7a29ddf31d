use super::{ProductRepository, StoreError};
use crate::models;
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-local document collection. Keeps insertion order; every operation
/// takes the lock once, so each one is atomic per document.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    documents: RwLock<Vec<models::Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn insert(&self, product: &models::Product) -> Result<(), StoreError> {
        let mut documents = self.documents.write().await;
        if documents.iter().any(|doc| doc.id == product.id) {
            return Err(StoreError::DuplicateKey(product.id.to_string()));
        }

        documents.push(product.clone());
        Ok(())
    }

    async fn find_one(&self, id: Uuid) -> Result<Option<models::Product>, StoreError> {
        let documents = self.documents.read().await;
        Ok(documents.iter().find(|doc| doc.id == id).cloned())
    }

    async fn find_many(
        &self,
        range: models::PriceRange,
    ) -> Result<Vec<models::Product>, StoreError> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .filter(|doc| range.contains(&doc.price))
            .cloned()
            .collect())
    }

    async fn find_one_and_update(
        &self,
        id: Uuid,
        changes: &models::ProductChanges,
    ) -> Result<Option<models::Product>, StoreError> {
        let mut documents = self.documents.write().await;
        Ok(documents.iter_mut().find(|doc| doc.id == id).map(|doc| {
            doc.apply(changes);
            doc.clone()
        }))
    }

    async fn delete_one(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut documents = self.documents.write().await;
        let before = documents.len();
        documents.retain(|doc| doc.id != id);
        Ok(documents.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Price, PriceRange, Product, ProductChanges};

    fn product(name: &str, price: &str) -> Product {
        Product::new(name.to_string(), 1, Price::parse(price).unwrap(), true)
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_id() {
        let repository = InMemoryProductRepository::new();
        let item = product("Produto A", "6.000");

        repository.insert(&item).await.unwrap();
        let result = repository.insert(&item).await;

        assert!(matches!(result, Err(StoreError::DuplicateKey(_))));
    }

    #[tokio::test]
    async fn find_many_keeps_insertion_order_and_filters() {
        let repository = InMemoryProductRepository::new();
        for (name, price) in [("A", "6000"), ("B", "9000.5"), ("C", "4999.99"), ("D", "7000")] {
            repository.insert(&product(name, price)).await.unwrap();
        }

        let all = repository.find_many(PriceRange::default()).await.unwrap();
        let names: Vec<&str> = all.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C", "D"]);

        let ranged = repository
            .find_many(PriceRange {
                min: Some(5000),
                max: Some(8000),
            })
            .await
            .unwrap();
        let names: Vec<&str> = ranged.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "D"]);
    }

    #[tokio::test]
    async fn find_one_and_update_returns_document_after_update() {
        let repository = InMemoryProductRepository::new();
        let item = product("Produto A", "6.000");
        repository.insert(&item).await.unwrap();

        let changes = ProductChanges {
            quantity: Some(42),
            ..Default::default()
        };
        let updated = repository
            .find_one_and_update(item.id, &changes)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.quantity, 42);
        assert_eq!(repository.find_one(item.id).await.unwrap(), Some(updated));
        assert!(repository
            .find_one_and_update(Uuid::new_v4(), &changes)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn delete_one_reports_removal() {
        let repository = InMemoryProductRepository::new();
        let item = product("Produto A", "6.000");
        repository.insert(&item).await.unwrap();

        assert!(repository.delete_one(item.id).await.unwrap());
        assert!(!repository.delete_one(item.id).await.unwrap());
        assert!(repository.find_one(item.id).await.unwrap().is_none());
    }
}
