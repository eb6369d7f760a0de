//! Catalog data model: products, the fixed category set and shop statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The fixed set of product categories.
///
/// Free text never becomes a category: parsing goes through [`Category::from_label`]
/// and the wizards only accept keyboard selections carrying one of these labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Footwear,
    Hoodies,
    #[serde(rename = "T-Shirts")]
    TShirts,
    Accessories,
    Jeans,
    Headwear,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Footwear,
        Category::Hoodies,
        Category::TShirts,
        Category::Accessories,
        Category::Jeans,
        Category::Headwear,
    ];

    /// Display label, also the serialized form in stored product records.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Footwear => "Footwear",
            Category::Hoodies => "Hoodies",
            Category::TShirts => "T-Shirts",
            Category::Accessories => "Accessories",
            Category::Jeans => "Jeans",
            Category::Headwear => "Headwear",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Category::Footwear => "👟",
            Category::Hoodies => "👕",
            Category::TShirts => "👔",
            Category::Accessories => "🎒",
            Category::Jeans => "👖",
            Category::Headwear => "🧢",
        }
    }

    pub fn from_label(label: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.label() == label)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A persisted catalog entry.
///
/// Field names serialize in camelCase so the JSON file store stays compatible
/// with data produced by earlier versions of the shop backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub category: Category,
    pub photos: Vec<String>,
    /// Incremented by the storefront web app, never by the bot.
    #[serde(default)]
    pub views: u64,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fields supplied when a creation wizard commits.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub description: String,
    pub category: Category,
    pub photos: Vec<String>,
}

/// A partial update: `None` fields are left untouched by the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub photos: Option<Vec<String>>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.photos.is_none()
    }

    /// Patch that turns `original` into `draft`, field by field.
    pub fn diff(original: &Product, draft: &Product) -> ProductPatch {
        ProductPatch {
            name: (draft.name != original.name).then(|| draft.name.clone()),
            price: (draft.price != original.price).then_some(draft.price),
            description: (draft.description != original.description)
                .then(|| draft.description.clone()),
            category: (draft.category != original.category).then_some(draft.category),
            photos: (draft.photos != original.photos).then(|| draft.photos.clone()),
        }
    }
}

/// Aggregated catalog numbers for the `/stats` command.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogStats {
    pub total_products: usize,
    pub total_views: u64,
    pub by_category: Vec<(Category, usize)>,
    pub top_viewed: Vec<Product>,
}

/// Summarize the catalog: totals, per-category counts and the five most
/// viewed products.
pub fn summarize(products: &[Product]) -> CatalogStats {
    let total_views = products.iter().map(|p| p.views).sum();

    let by_category = Category::ALL
        .iter()
        .map(|&c| (c, products.iter().filter(|p| p.category == c).count()))
        .filter(|(_, n)| *n > 0)
        .collect();

    let mut top_viewed: Vec<Product> = products.iter().filter(|p| p.views > 0).cloned().collect();
    top_viewed.sort_by(|a, b| b.views.cmp(&a.views));
    top_viewed.truncate(5);

    CatalogStats {
        total_products: products.len(),
        total_views,
        by_category,
        top_viewed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, category: Category, views: u64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            price: 1000.0,
            description: "test".to_string(),
            category,
            photos: vec!["https://example.com/p.jpg".to_string()],
            views,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_category_label_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_label(category.label()), Some(category));
        }
        assert_eq!(Category::from_label("Socks"), None);
        assert_eq!(Category::from_label(""), None);
    }

    #[test]
    fn test_category_serializes_as_label() {
        let json = serde_json::to_string(&Category::TShirts).unwrap();
        assert_eq!(json, "\"T-Shirts\"");
        let back: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Category::TShirts);
    }

    #[test]
    fn test_product_json_field_names() {
        let p = product("1", Category::Jeans, 3);
        let value = serde_json::to_value(&p).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("views").is_some());
        // updatedAt is omitted until the first edit
        assert!(value.get("updatedAt").is_none());
    }

    #[test]
    fn test_diff_only_changed_fields() {
        let original = product("1", Category::Jeans, 0);
        let mut draft = original.clone();
        draft.price = 2990.0;

        let patch = ProductPatch::diff(&original, &draft);
        assert_eq!(patch.price, Some(2990.0));
        assert!(patch.name.is_none());
        assert!(patch.description.is_none());
        assert!(patch.category.is_none());
        assert!(patch.photos.is_none());
    }

    #[test]
    fn test_diff_identical_is_empty() {
        let original = product("1", Category::Jeans, 0);
        assert!(ProductPatch::diff(&original, &original.clone()).is_empty());
    }

    #[test]
    fn test_summarize_counts_and_top() {
        let products = vec![
            product("1", Category::Footwear, 10),
            product("2", Category::Footwear, 2),
            product("3", Category::Hoodies, 7),
            product("4", Category::Jeans, 0),
        ];

        let stats = summarize(&products);
        assert_eq!(stats.total_products, 4);
        assert_eq!(stats.total_views, 19);
        assert!(stats.by_category.contains(&(Category::Footwear, 2)));
        assert!(stats.by_category.contains(&(Category::Jeans, 1)));
        // zero-view products never appear in the top list
        assert_eq!(stats.top_viewed.len(), 3);
        assert_eq!(stats.top_viewed[0].id, "1");
        assert_eq!(stats.top_viewed[1].id, "3");
    }
}
