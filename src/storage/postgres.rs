//! Postgres product store backed by an sqlx connection pool.

use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;
use tracing::{debug, info};

use async_trait::async_trait;

use crate::catalog::{Category, NewProduct, Product, ProductPatch};

use super::{apply_patch, generate_product_id, ProductStore, StoreError};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS products (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    price       DOUBLE PRECISION NOT NULL,
    description TEXT NOT NULL,
    category    TEXT NOT NULL,
    photos      JSONB NOT NULL,
    views       BIGINT NOT NULL DEFAULT 0,
    created_at  TIMESTAMPTZ NOT NULL,
    updated_at  TIMESTAMPTZ
)";

pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    /// Connects and makes sure the products table exists.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        info!("Connecting to Postgres product store");
        let pool = PgPool::connect(database_url).await?;
        sqlx::query(SCHEMA).execute(&pool).await?;
        Ok(PgProductStore { pool })
    }
}

fn row_to_product(row: &PgRow) -> Result<Product, StoreError> {
    let category_label: String = row.try_get("category")?;
    let category = Category::from_label(&category_label)
        .ok_or_else(|| StoreError::Corrupt(format!("unknown category '{category_label}'")))?;

    let photos: serde_json::Value = row.try_get("photos")?;
    let photos: Vec<String> = serde_json::from_value(photos)?;

    let views: i64 = row.try_get("views")?;

    Ok(Product {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        price: row.try_get("price")?,
        description: row.try_get("description")?,
        category,
        photos,
        views: views.max(0) as u64,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<Option<DateTime<Utc>>, _>("updated_at")?,
    })
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn get(&self, id: &str) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_product).transpose()
    }

    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let rows = sqlx::query("SELECT * FROM products ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_product).collect()
    }

    async fn create(&self, fields: NewProduct) -> Result<Product, StoreError> {
        let product = Product {
            id: generate_product_id(),
            name: fields.name,
            price: fields.price,
            description: fields.description,
            category: fields.category,
            photos: fields.photos,
            views: 0,
            created_at: Utc::now(),
            updated_at: None,
        };

        sqlx::query(
            "INSERT INTO products (id, name, price, description, category, photos, views, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.description)
        .bind(product.category.label())
        .bind(serde_json::to_value(&product.photos)?)
        .bind(product.views as i64)
        .bind(product.created_at)
        .execute(&self.pool)
        .await?;

        info!(product_id = %product.id, name = %product.name, "Product created in Postgres store");
        Ok(product)
    }

    async fn update(&self, id: &str, patch: ProductPatch) -> Result<Option<Product>, StoreError> {
        let Some(mut product) = self.get(id).await? else {
            debug!(product_id = %id, "Update requested for unknown product");
            return Ok(None);
        };
        apply_patch(&mut product, patch);

        sqlx::query(
            "UPDATE products
             SET name = $2, price = $3, description = $4, category = $5, photos = $6, updated_at = $7
             WHERE id = $1",
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.description)
        .bind(product.category.label())
        .bind(serde_json::to_value(&product.photos)?)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        info!(product_id = %id, "Product updated in Postgres store");
        Ok(Some(product))
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(product_id = %id, "Product deleted from Postgres store");
        }
        Ok(deleted)
    }
}
