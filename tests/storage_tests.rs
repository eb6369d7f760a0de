//! Integration tests for the JSON file product store.

use tempfile::TempDir;

use shopbot::catalog::{Category, NewProduct, ProductPatch};
use shopbot::storage::{JsonProductStore, ProductStore};

fn store_in(dir: &TempDir) -> JsonProductStore {
    JsonProductStore::new(dir.path().join("products.json"))
}

fn jacket() -> NewProduct {
    NewProduct {
        name: "Blue Jacket".to_string(),
        price: 2990.0,
        description: "Warm winter jacket".to_string(),
        category: Category::Hoodies,
        photos: vec!["https://cdn.test/jacket.jpg".to_string()],
    }
}

fn cap() -> NewProduct {
    NewProduct {
        name: "Cap".to_string(),
        price: 990.0,
        description: "Plain cap".to_string(),
        category: Category::Headwear,
        photos: vec!["https://cdn.test/cap.jpg".to_string()],
    }
}

#[tokio::test]
async fn create_assigns_id_and_defaults() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let product = store.create(jacket()).await.unwrap();

    assert!(!product.id.is_empty());
    assert!(product.id.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(product.name, "Blue Jacket");
    assert_eq!(product.price, 2990.0);
    assert_eq!(product.category, Category::Hoodies);
    assert_eq!(product.views, 0);
    assert!(product.updated_at.is_none());
}

#[tokio::test]
async fn get_and_list_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    assert!(store.list().await.unwrap().is_empty());
    assert!(store.get("missing").await.unwrap().is_none());

    let a = store.create(jacket()).await.unwrap();
    let b = store.create(cap()).await.unwrap();

    let listed = store.list().await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_ne!(a.id, b.id);

    let fetched = store.get(&a.id).await.unwrap().unwrap();
    assert_eq!(fetched, a);
}

#[tokio::test]
async fn update_applies_only_patched_fields() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let product = store.create(jacket()).await.unwrap();

    let patch = ProductPatch {
        price: Some(1990.0),
        ..ProductPatch::default()
    };
    let updated = store.update(&product.id, patch).await.unwrap().unwrap();

    assert_eq!(updated.price, 1990.0);
    assert_eq!(updated.name, product.name);
    assert_eq!(updated.description, product.description);
    assert_eq!(updated.category, product.category);
    assert_eq!(updated.photos, product.photos);
    assert!(updated.updated_at.is_some());

    // The change is persisted, not just returned.
    let fetched = store.get(&product.id).await.unwrap().unwrap();
    assert_eq!(fetched.price, 1990.0);
}

#[tokio::test]
async fn update_replaces_the_photo_list() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let product = store.create(jacket()).await.unwrap();

    let new_photos = vec![
        "https://cdn.test/x.jpg".to_string(),
        "https://cdn.test/y.jpg".to_string(),
    ];
    let patch = ProductPatch {
        photos: Some(new_photos.clone()),
        ..ProductPatch::default()
    };
    let updated = store.update(&product.id, patch).await.unwrap().unwrap();
    assert_eq!(updated.photos, new_photos);
}

#[tokio::test]
async fn update_of_unknown_id_is_none() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store.create(jacket()).await.unwrap();

    let patch = ProductPatch {
        name: Some("Renamed".to_string()),
        ..ProductPatch::default()
    };
    assert!(store.update("missing", patch).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_reports_whether_the_product_existed() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let product = store.create(jacket()).await.unwrap();

    assert!(store.delete(&product.id).await.unwrap());
    assert!(store.get(&product.id).await.unwrap().is_none());
    assert!(!store.delete(&product.id).await.unwrap());
}

#[tokio::test]
async fn catalog_survives_a_store_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("products.json");

    let first = JsonProductStore::new(path.clone());
    let product = first.create(jacket()).await.unwrap();
    drop(first);

    let second = JsonProductStore::new(path);
    let fetched = second.get(&product.id).await.unwrap().unwrap();
    assert_eq!(fetched, product);
    assert_eq!(second.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn create_makes_the_parent_directory() {
    let dir = TempDir::new().unwrap();
    let store = JsonProductStore::new(dir.path().join("nested").join("data").join("products.json"));

    store.create(cap()).await.unwrap();
    assert!(store.path().exists());
}
