//! Flat-file JSON product store.
//!
//! Keeps the whole catalog in one pretty-printed JSON array, read and
//! rewritten on every mutation. Suitable for a shop of a few hundred
//! products and for running without a database.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use async_trait::async_trait;

use crate::catalog::{NewProduct, Product, ProductPatch};

use super::{apply_patch, generate_product_id, ProductStore, StoreError};

pub struct JsonProductStore {
    path: PathBuf,
    // Serializes the read-modify-write cycle across concurrent chats.
    file_lock: Mutex<()>,
}

impl JsonProductStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonProductStore {
            path: path.into(),
            file_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Vec<Product>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, products: &[Product]) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                tokio::fs::create_dir_all(dir).await?;
            }
        }
        let json = serde_json::to_vec_pretty(products)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }

    fn fresh_id(products: &[Product]) -> String {
        loop {
            let id = generate_product_id();
            if !products.iter().any(|p| p.id == id) {
                return id;
            }
        }
    }
}

#[async_trait]
impl ProductStore for JsonProductStore {
    async fn get(&self, id: &str) -> Result<Option<Product>, StoreError> {
        let _guard = self.file_lock.lock().await;
        let products = self.load().await?;
        Ok(products.into_iter().find(|p| p.id == id))
    }

    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let _guard = self.file_lock.lock().await;
        self.load().await
    }

    async fn create(&self, fields: NewProduct) -> Result<Product, StoreError> {
        let _guard = self.file_lock.lock().await;
        let mut products = self.load().await?;

        let product = Product {
            id: Self::fresh_id(&products),
            name: fields.name,
            price: fields.price,
            description: fields.description,
            category: fields.category,
            photos: fields.photos,
            views: 0,
            created_at: Utc::now(),
            updated_at: None,
        };
        info!(product_id = %product.id, name = %product.name, "Creating product in JSON store");

        products.push(product.clone());
        self.save(&products).await?;
        Ok(product)
    }

    async fn update(&self, id: &str, patch: ProductPatch) -> Result<Option<Product>, StoreError> {
        let _guard = self.file_lock.lock().await;
        let mut products = self.load().await?;

        let Some(product) = products.iter_mut().find(|p| p.id == id) else {
            debug!(product_id = %id, "Update requested for unknown product");
            return Ok(None);
        };
        apply_patch(product, patch);
        let updated = product.clone();

        self.save(&products).await?;
        info!(product_id = %id, "Product updated in JSON store");
        Ok(Some(updated))
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let _guard = self.file_lock.lock().await;
        let mut products = self.load().await?;

        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() == before {
            return Ok(false);
        }

        self.save(&products).await?;
        info!(product_id = %id, "Product deleted from JSON store");
        Ok(true)
    }
}
