use super::Price;
use chrono::{DateTime, Duration, Utc};
use serde_derive::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored product document. Serialized as-is into the `products` collection
/// and returned verbatim by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub quantity: i32,
    pub price: Price,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// A fresh document with a new id; both timestamps are the same instant.
    pub fn new(name: String, quantity: i32, price: Price, status: bool) -> Self {
        let now = Utc::now();
        Product {
            id: Uuid::new_v4(),
            name,
            quantity,
            price,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a `$set`-style change in place. Fields left as `None` stay untouched.
    pub fn apply(&mut self, changes: &ProductChanges) {
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(quantity) = changes.quantity {
            self.quantity = quantity;
        }
        if let Some(price) = &changes.price {
            self.price = price.clone();
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(updated_at) = changes.updated_at {
            // Never move backwards, even if the clock did
            self.updated_at = updated_at.max(self.updated_at + Duration::nanoseconds(1));
        }
    }
}

/// The field set of a partial update. Serializes to a JSON object holding only
/// the present fields, which is what the document store merges in.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProductChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.quantity.is_none()
            && self.price.is_none()
            && self.status.is_none()
            && self.updated_at.is_none()
    }
}

/// Strict price bounds for listing. `None` on both sides means no filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceRange {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl PriceRange {
    pub fn contains(&self, price: &Price) -> bool {
        use std::cmp::Ordering;

        match (self.min, self.max) {
            (None, None) => true,
            (Some(min), None) => price.cmp_integer(min) == Ordering::Greater,
            (None, Some(max)) => price.cmp_integer(max) == Ordering::Less,
            (Some(min), Some(max)) => {
                price.cmp_integer(min) == Ordering::Greater
                    && price.cmp_integer(max) == Ordering::Less
            }
        }
    }
}
