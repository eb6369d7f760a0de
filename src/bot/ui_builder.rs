//! UI Builder module for creating keyboards and formatting messages

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::catalog::{CatalogStats, Category, Product};

/// Callback token prefix for category selection in the creation wizard.
pub const CREATE_CATEGORY_PREFIX: &str = "cat_";
/// Callback token prefix for category selection in the edit wizard.
pub const EDIT_CATEGORY_PREFIX: &str = "editcat_";

/// Prices are whole in the common case; show decimals only when present.
pub fn format_price(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("{}", price as i64)
    } else {
        format!("{price:.2}")
    }
}

/// One button per fixed category, carrying `{prefix}{label}` as its token.
pub fn category_keyboard(prefix: &str) -> InlineKeyboardMarkup {
    let buttons = Category::ALL
        .iter()
        .map(|category| {
            vec![InlineKeyboardButton::callback(
                format!("{} {}", category.emoji(), category.label()),
                format!("{prefix}{}", category.label()),
            )]
        })
        .collect::<Vec<_>>();
    InlineKeyboardMarkup::new(buttons)
}

/// Field menu for the edit wizard.
pub fn edit_menu_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("📌 Name", "edit_name")],
        vec![InlineKeyboardButton::callback("💰 Price", "edit_price")],
        vec![InlineKeyboardButton::callback(
            "📝 Description",
            "edit_description",
        )],
        vec![InlineKeyboardButton::callback(
            "🏷️ Category",
            "edit_category",
        )],
        vec![InlineKeyboardButton::callback("📸 Photos", "edit_photos")],
        vec![InlineKeyboardButton::callback("✅ Save", "edit_done")],
        vec![InlineKeyboardButton::callback("❌ Cancel", "edit_cancel")],
    ])
}

pub fn delete_confirm_keyboard(product_id: &str) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("✅ Delete", format!("confirm_delete_{product_id}")),
        InlineKeyboardButton::callback("❌ Cancel", "cancel_delete"),
    ]])
}

/// Edit/Delete shortcuts under each `/list_products` card.
pub fn product_card_keyboard(product_id: &str) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback(
            "✏️ Edit",
            format!("edit_{product_id}"),
        )],
        vec![InlineKeyboardButton::callback(
            "🗑️ Delete",
            format!("delete_{product_id}"),
        )],
    ])
}

pub fn format_product_card(product: &Product) -> String {
    format!(
        "📌 {}\n💰 Price: {}\n🏷️ Category: {}\n👁️ Views: {}\n🆔 ID: {}",
        product.name,
        format_price(product.price),
        product.category,
        product.views,
        product.id
    )
}

/// Current field values shown above the edit menu.
pub fn format_edit_summary(draft: &Product) -> String {
    format!(
        "📝 Editing product {}\n\nCurrent values:\n━━━━━━━━━━━━━━\n\
         📌 Name: {}\n💰 Price: {}\n📝 Description: {}\n🏷️ Category: {}\n📸 Photos: {}\n\
         ━━━━━━━━━━━━━━\n\nWhat would you like to change?",
        draft.id,
        draft.name,
        format_price(draft.price),
        draft.description,
        draft.category,
        draft.photos.len()
    )
}

pub fn format_creation_summary(product: &Product) -> String {
    format!(
        "✅ Product added!\n\nID: {}\nName: {}\nPrice: {}\nCategory: {}\nPhotos: {}",
        product.id,
        product.name,
        format_price(product.price),
        product.category,
        product.photos.len()
    )
}

pub fn format_stats(stats: &CatalogStats) -> String {
    let mut message = format!(
        "📊 Shop statistics\n\n📦 Products: {}\n👁️ Total views: {}\n",
        stats.total_products, stats.total_views
    );

    if !stats.by_category.is_empty() {
        message.push_str("\n📊 By category:\n");
        for (category, count) in &stats.by_category {
            message.push_str(&format!("   {category}: {count}\n"));
        }
    }

    if !stats.top_viewed.is_empty() {
        message.push_str("\n🏆 Most viewed:\n");
        for (i, product) in stats.top_viewed.iter().enumerate() {
            message.push_str(&format!(
                "   {}. {} - {} 👁️\n",
                i + 1,
                product.name,
                product.views
            ));
        }
    }

    message
}

pub fn format_categories() -> String {
    let lines = Category::ALL
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}. {} {}", i + 1, c.emoji(), c.label()))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "🏷️ Available categories:\n\n{lines}\n\nTotal: {} categories",
        Category::ALL.len()
    )
}

pub fn format_admin_menu() -> String {
    "🔧 Admin panel\n\nAvailable commands:\n━━━━━━━━━━━━━━\n\
     📦 Product management:\n\
     /add_product - Add a product\n\
     /edit_product [ID] - Edit a product\n\
     /list_products - List products\n\
     /delete_product [ID] - Delete a product\n\n\
     📊 Statistics:\n\
     /stats - Shop statistics\n\
     /categories - Category list\n\
     ━━━━━━━━━━━━━━"
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(2990.0), "2990");
        assert_eq!(format_price(49.9), "49.90");
    }

    #[test]
    fn test_category_keyboard_tokens() {
        let keyboard = category_keyboard(CREATE_CATEGORY_PREFIX);
        assert_eq!(keyboard.inline_keyboard.len(), Category::ALL.len());

        let first = &keyboard.inline_keyboard[0][0];
        assert!(first.text.contains("Footwear"));
        match &first.kind {
            teloxide::types::InlineKeyboardButtonKind::CallbackData(data) => {
                assert_eq!(data, "cat_Footwear");
            }
            other => panic!("unexpected button kind: {other:?}"),
        }
    }
}
