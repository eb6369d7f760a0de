//! Persistence port for the product catalog.
//!
//! The conversation engine only sees the [`ProductStore`] trait; the JSON
//! file store and the Postgres store are interchangeable behind it.

mod json_store;
mod postgres;

pub use json_store::JsonProductStore;
pub use postgres::PgProductStore;

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use thiserror::Error;

use crate::catalog::{NewProduct, Product, ProductPatch};

/// Storage failures, wrapped per backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("corrupt stored record: {0}")]
    Corrupt(String),
}

/// CRUD operations over the product catalog.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<Product>, StoreError>;

    async fn list(&self) -> Result<Vec<Product>, StoreError>;

    /// Persists a new product, assigning its id and timestamps. `views`
    /// starts at zero.
    async fn create(&self, fields: NewProduct) -> Result<Product, StoreError>;

    /// Applies the `Some` fields of `patch` and bumps `updatedAt`. Returns
    /// `None` when no product has this id.
    async fn update(&self, id: &str, patch: ProductPatch) -> Result<Option<Product>, StoreError>;

    /// Returns whether a product with this id existed.
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;
}

/// Product ids are a millisecond timestamp plus a random suffix, so two
/// creations in the same millisecond stay distinct.
pub(crate) fn generate_product_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix: u16 = rand::thread_rng().gen_range(0..1000);
    format!("{millis}{suffix:03}")
}

pub(crate) fn apply_patch(product: &mut Product, patch: ProductPatch) {
    if let Some(name) = patch.name {
        product.name = name;
    }
    if let Some(price) = patch.price {
        product.price = price;
    }
    if let Some(description) = patch.description {
        product.description = description;
    }
    if let Some(category) = patch.category {
        product.category = category;
    }
    if let Some(photos) = patch.photos {
        product.photos = photos;
    }
    product.updated_at = Some(Utc::now());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_id_shape() {
        let id = generate_product_id();
        assert!(id.chars().all(|c| c.is_ascii_digit()));
        assert!(id.len() >= 16);
    }
}
