//! Admin conversation engine: the state machine behind the product
//! creation and edit wizards.
//!
//! The engine is transport-agnostic. It consumes [`Event`] values handed
//! over by the Telegram adapters, keeps per-chat wizard state in the
//! injected [`SessionStore`], and talks back through the [`ChatOutbox`]
//! port. Persistence and media-upload failures are caught here and turned
//! into chat messages; they never propagate to the dispatcher.

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, error, info, warn};

use crate::catalog::{self, Category, NewProduct, ProductPatch};
use crate::media::PhotoUploader;
use crate::session::{
    ConversationRecord, CreateDraft, CreateStep, EditField, EditSession, EditStep, SessionStore,
    WizardMode,
};
use crate::storage::ProductStore;
use crate::validation::{validate_description, validate_name, validate_price};

use super::outbound::ChatOutbox;
use super::ui_builder::{
    category_keyboard, delete_confirm_keyboard, edit_menu_keyboard, format_admin_menu,
    format_categories, format_creation_summary, format_edit_summary, format_price,
    format_product_card, format_stats, product_card_keyboard, CREATE_CATEGORY_PREFIX,
    EDIT_CATEGORY_PREFIX,
};

const DENIED: &str = "❌ You do not have access to the admin panel";

/// An inbound chat event, already stripped of transport details.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A `/command`, name without the slash, arguments split on whitespace.
    Command { name: String, args: Vec<String> },
    /// Plain text.
    Text(String),
    /// A photo, resolved by the adapter to a fetchable download URL.
    Photo { source: String },
    /// An inline-keyboard button press carrying its callback token.
    Selection(String),
}

pub struct AdminEngine {
    sessions: SessionStore,
    store: Arc<dyn ProductStore>,
    uploader: Arc<dyn PhotoUploader>,
    outbox: Arc<dyn ChatOutbox>,
    admin_ids: Vec<i64>,
    manager_username: String,
}

impl AdminEngine {
    pub fn new(
        sessions: SessionStore,
        store: Arc<dyn ProductStore>,
        uploader: Arc<dyn PhotoUploader>,
        outbox: Arc<dyn ChatOutbox>,
        admin_ids: Vec<i64>,
        manager_username: String,
    ) -> Self {
        AdminEngine {
            sessions,
            store,
            uploader,
            outbox,
            admin_ids,
            manager_username,
        }
    }

    /// Wizard state, exposed for assertions in tests.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    fn is_authorized(&self, sender_id: i64) -> bool {
        self.admin_ids.contains(&sender_id)
    }

    /// Single entry point for every inbound event of a chat.
    pub async fn handle_event(&self, chat_id: i64, sender_id: i64, event: Event) -> Result<()> {
        match event {
            Event::Command { name, args } => {
                self.handle_command(chat_id, sender_id, &name, &args).await
            }
            Event::Text(text) => {
                if !self.is_authorized(sender_id) {
                    return Ok(());
                }
                self.handle_text(chat_id, &text).await
            }
            Event::Photo { source } => {
                if !self.is_authorized(sender_id) {
                    return Ok(());
                }
                self.handle_photo(chat_id, &source).await
            }
            Event::Selection(token) => {
                if !self.is_authorized(sender_id) {
                    self.outbox.send_text(chat_id, DENIED).await?;
                    return Ok(());
                }
                self.handle_selection(chat_id, &token).await
            }
        }
    }

    // ---- commands ----

    async fn handle_command(
        &self,
        chat_id: i64,
        sender_id: i64,
        name: &str,
        args: &[String],
    ) -> Result<()> {
        if name == "start" {
            return self.send_welcome(chat_id, sender_id).await;
        }

        if !self.is_authorized(sender_id) {
            debug!(chat_id, sender_id, command = name, "Denied admin command");
            self.outbox.send_text(chat_id, DENIED).await?;
            return Ok(());
        }

        match name {
            "admin" => self.outbox.send_text(chat_id, &format_admin_menu()).await,
            "add_product" => self.begin_creation(chat_id).await,
            "edit_product" => match args.first() {
                Some(id) => self.open_edit_menu(chat_id, id).await,
                None => {
                    self.outbox
                        .send_text(chat_id, "Usage: /edit_product <product id>")
                        .await
                }
            },
            "delete_product" => match args.first() {
                Some(id) => self.confirm_delete(chat_id, id).await,
                None => {
                    self.outbox
                        .send_text(chat_id, "Usage: /delete_product <product id>")
                        .await
                }
            },
            "list_products" => self.list_products(chat_id).await,
            "stats" => self.send_stats(chat_id).await,
            "categories" => self.outbox.send_text(chat_id, &format_categories()).await,
            "done" => self.finish_creation(chat_id).await,
            "done_photos" => self.finish_photo_replacement(chat_id).await,
            "cancel" => self.cancel_creation(chat_id).await,
            other => {
                debug!(chat_id, command = other, "Ignoring unknown command");
                Ok(())
            }
        }
    }

    async fn send_welcome(&self, chat_id: i64, sender_id: i64) -> Result<()> {
        let welcome = format!(
            "👋 Welcome to our shop!\n\n🛍️ Stylish clothing and footwear\n\n\
             Browse the catalog in the shop app, and message @{} with any question.",
            self.manager_username
        );
        self.outbox.send_text(chat_id, &welcome).await?;

        if self.is_authorized(sender_id) {
            self.outbox
                .send_text(chat_id, "🔧 Admin panel available. Send /admin")
                .await?;
        }
        Ok(())
    }

    // ---- creation wizard ----

    async fn begin_creation(&self, chat_id: i64) -> Result<()> {
        info!(chat_id, "Starting product creation wizard");
        self.sessions
            .put(chat_id, ConversationRecord::Creating(CreateDraft::new()));
        self.outbox
            .send_text(chat_id, "📝 Send the product name:")
            .await
    }

    async fn cancel_creation(&self, chat_id: i64) -> Result<()> {
        if self.sessions.remove(chat_id, WizardMode::Create).is_some() {
            info!(chat_id, "Product creation cancelled");
            self.outbox
                .send_text(chat_id, "❌ Product creation cancelled")
                .await?;
        }
        Ok(())
    }

    /// Feeds one text message into the creation wizard. Validation failures
    /// re-prompt and keep both the step and the draft untouched.
    async fn advance_creation(&self, chat_id: i64, mut draft: CreateDraft, text: &str) -> Result<()> {
        match draft.step {
            CreateStep::Name => match validate_name(text) {
                Ok(name) => {
                    draft.name = Some(name);
                    draft.step = CreateStep::Price;
                    self.sessions.put(chat_id, ConversationRecord::Creating(draft));
                    self.outbox
                        .send_text(chat_id, "💰 Send the product price (just a number):")
                        .await
                }
                Err(e) => {
                    debug!(chat_id, error = %e, "Rejected product name");
                    self.outbox
                        .send_text(chat_id, "❌ That name will not work. Send a short, non-empty name:")
                        .await
                }
            },
            CreateStep::Price => match validate_price(text) {
                Ok(price) => {
                    draft.price = Some(price);
                    draft.step = CreateStep::Description;
                    self.sessions.put(chat_id, ConversationRecord::Creating(draft));
                    self.outbox
                        .send_text(chat_id, "📄 Send the product description:")
                        .await
                }
                Err(e) => {
                    debug!(chat_id, error = %e, "Rejected product price");
                    self.outbox
                        .send_text(chat_id, "❌ Invalid price. Send a number like 2990:")
                        .await
                }
            },
            CreateStep::Description => match validate_description(text) {
                Ok(description) => {
                    draft.description = Some(description);
                    draft.step = CreateStep::Category;
                    self.sessions.put(chat_id, ConversationRecord::Creating(draft));
                    self.outbox
                        .send_text_with_keyboard(
                            chat_id,
                            "🏷️ Pick a category:",
                            category_keyboard(CREATE_CATEGORY_PREFIX),
                        )
                        .await
                }
                Err(e) => {
                    debug!(chat_id, error = %e, "Rejected product description");
                    self.outbox
                        .send_text(chat_id, "❌ Description must not be empty. Try again:")
                        .await
                }
            },
            // Category is selection-only and photos arrive as photo events;
            // stray text in these steps is ignored without a transition.
            CreateStep::Category | CreateStep::Photos => Ok(()),
        }
    }

    async fn select_creation_category(
        &self,
        chat_id: i64,
        mut draft: CreateDraft,
        category: Category,
    ) -> Result<()> {
        if draft.step != CreateStep::Category {
            debug!(chat_id, "Category selection outside the category step");
            return Ok(());
        }
        draft.category = Some(category);
        draft.photos = Vec::new();
        draft.step = CreateStep::Photos;
        self.sessions.put(chat_id, ConversationRecord::Creating(draft));

        self.outbox
            .send_text(
                chat_id,
                "📸 Send product photos (one or more).\n\nSend /done when finished.",
            )
            .await
    }

    /// `/done`: the only trigger that leaves the photo step, rejected while
    /// no photo has been collected. The record is removed before the
    /// persistence call and stays gone whatever the outcome.
    async fn finish_creation(&self, chat_id: i64) -> Result<()> {
        let Some(ConversationRecord::Creating(draft)) =
            self.sessions.get(chat_id, WizardMode::Create)
        else {
            return Ok(());
        };

        if draft.step != CreateStep::Photos {
            self.outbox
                .send_text(
                    chat_id,
                    "❌ /done only applies at the photo step. Finish the current step first.",
                )
                .await?;
            return Ok(());
        }
        if draft.photos.is_empty() {
            self.outbox
                .send_text(chat_id, "❌ Add at least one photo before /done")
                .await?;
            return Ok(());
        }

        self.sessions.remove(chat_id, WizardMode::Create);

        let (Some(name), Some(price), Some(description), Some(category)) =
            (draft.name, draft.price, draft.description, draft.category)
        else {
            // Fields fill strictly in step order; a photo-step record with a
            // hole is corrupt and only recoverable by starting over.
            warn!(chat_id, "Discarding incomplete creation draft at commit");
            self.outbox
                .send_text(chat_id, "❌ Something went wrong. Start again with /add_product")
                .await?;
            return Ok(());
        };

        let fields = NewProduct {
            name,
            price,
            description,
            category,
            photos: draft.photos,
        };

        match self.store.create(fields).await {
            Ok(product) => {
                info!(chat_id, product_id = %product.id, "Product created");
                self.outbox
                    .send_text(chat_id, &format_creation_summary(&product))
                    .await
            }
            Err(e) => {
                error!(chat_id, error = %e, "Failed to persist new product");
                self.outbox
                    .send_text(
                        chat_id,
                        "❌ Failed to save the product. Start again with /add_product",
                    )
                    .await
            }
        }
    }

    // ---- edit wizard ----

    /// Loads the product and opens the field menu. No record is created
    /// when the id is unknown.
    async fn open_edit_menu(&self, chat_id: i64, product_id: &str) -> Result<()> {
        let product = match self.store.get(product_id).await {
            Ok(Some(product)) => product,
            Ok(None) => {
                self.outbox
                    .send_text(chat_id, &format!("❌ Product {product_id} not found"))
                    .await?;
                return Ok(());
            }
            Err(e) => {
                error!(chat_id, product_id, error = %e, "Failed to load product for editing");
                self.outbox
                    .send_text(chat_id, "❌ Failed to load the product")
                    .await?;
                return Ok(());
            }
        };

        info!(chat_id, product_id, "Starting product edit wizard");
        let session = EditSession::new(product);
        let summary = format_edit_summary(&session.draft);
        self.sessions
            .put(chat_id, ConversationRecord::Editing(session));
        self.outbox
            .send_text_with_keyboard(chat_id, &summary, edit_menu_keyboard())
            .await
    }

    async fn show_edit_menu(&self, chat_id: i64, session: &EditSession) -> Result<()> {
        self.outbox
            .send_text_with_keyboard(
                chat_id,
                &format_edit_summary(&session.draft),
                edit_menu_keyboard(),
            )
            .await
    }

    async fn begin_field_edit(
        &self,
        chat_id: i64,
        mut session: EditSession,
        field: EditField,
    ) -> Result<()> {
        if session.step != EditStep::Menu {
            debug!(chat_id, "Field selection outside the edit menu");
            return Ok(());
        }

        match field {
            EditField::Category => {
                session.step = EditStep::AwaitingValue(EditField::Category);
                self.sessions
                    .put(chat_id, ConversationRecord::Editing(session));
                self.outbox
                    .send_text_with_keyboard(
                        chat_id,
                        "🏷️ Pick the new category:",
                        category_keyboard(EDIT_CATEGORY_PREFIX),
                    )
                    .await
            }
            field => {
                let prompt = match field {
                    EditField::Name => "📌 Send the new name:",
                    EditField::Price => "💰 Send the new price (just a number):",
                    EditField::Description => "📝 Send the new description:",
                    EditField::Category => unreachable!(),
                };
                session.step = EditStep::AwaitingValue(field);
                self.sessions
                    .put(chat_id, ConversationRecord::Editing(session));
                self.outbox.send_text(chat_id, prompt).await
            }
        }
    }

    async fn begin_photo_replacement(&self, chat_id: i64, mut session: EditSession) -> Result<()> {
        if session.step != EditStep::Menu {
            debug!(chat_id, "Photo replacement requested outside the edit menu");
            return Ok(());
        }
        session.step = EditStep::CollectingPhotos(Vec::new());
        self.sessions
            .put(chat_id, ConversationRecord::Editing(session));
        self.outbox
            .send_text(
                chat_id,
                "📸 Send the new photos (they replace the current ones).\n\nSend /done_photos when finished.",
            )
            .await
    }

    /// One text message while a field prompt is open. On success the value
    /// lands in the draft and the menu returns; on validation failure the
    /// prompt repeats in place.
    async fn apply_edit_value(
        &self,
        chat_id: i64,
        mut session: EditSession,
        field: EditField,
        text: &str,
    ) -> Result<()> {
        match field {
            EditField::Name => match validate_name(text) {
                Ok(name) => {
                    session.draft.name = name;
                    self.finish_field_edit(chat_id, session, "✅ Name updated").await
                }
                Err(_) => {
                    self.outbox
                        .send_text(chat_id, "❌ That name will not work. Send a short, non-empty name:")
                        .await
                }
            },
            EditField::Price => match validate_price(text) {
                Ok(price) => {
                    session.draft.price = price;
                    self.finish_field_edit(chat_id, session, "✅ Price updated").await
                }
                Err(_) => {
                    self.outbox
                        .send_text(chat_id, "❌ Invalid price. Send a number like 2990:")
                        .await
                }
            },
            EditField::Description => match validate_description(text) {
                Ok(description) => {
                    session.draft.description = description;
                    self.finish_field_edit(chat_id, session, "✅ Description updated")
                        .await
                }
                Err(_) => {
                    self.outbox
                        .send_text(chat_id, "❌ Description must not be empty. Try again:")
                        .await
                }
            },
            // The category prompt only reacts to keyboard selections.
            EditField::Category => Ok(()),
        }
    }

    async fn finish_field_edit(
        &self,
        chat_id: i64,
        mut session: EditSession,
        confirmation: &str,
    ) -> Result<()> {
        session.step = EditStep::Menu;
        // Commit the record first; a failed send must not drop the value.
        self.sessions
            .put(chat_id, ConversationRecord::Editing(session.clone()));
        self.outbox.send_text(chat_id, confirmation).await?;
        self.show_edit_menu(chat_id, &session).await
    }

    async fn select_edit_category(
        &self,
        chat_id: i64,
        mut session: EditSession,
        category: Category,
    ) -> Result<()> {
        if session.step != EditStep::AwaitingValue(EditField::Category) {
            debug!(chat_id, "Edit category selection outside its prompt");
            return Ok(());
        }
        session.draft.category = category;
        self.finish_field_edit(chat_id, session, "✅ Category updated")
            .await
    }

    /// `/done_photos`: swaps the draft's photo list for the collected one.
    /// The old photos are discarded entirely, never appended to.
    async fn finish_photo_replacement(&self, chat_id: i64) -> Result<()> {
        let Some(ConversationRecord::Editing(mut session)) =
            self.sessions.get(chat_id, WizardMode::Edit)
        else {
            return Ok(());
        };
        let EditStep::CollectingPhotos(pending) = session.step.clone() else {
            return Ok(());
        };

        if pending.is_empty() {
            self.outbox
                .send_text(chat_id, "❌ Add at least one photo first")
                .await?;
            return Ok(());
        }

        let count = pending.len();
        session.draft.photos = pending;
        session.step = EditStep::Menu;
        self.sessions
            .put(chat_id, ConversationRecord::Editing(session.clone()));
        self.outbox
            .send_text(chat_id, &format!("✅ Photos updated ({count})"))
            .await?;
        self.show_edit_menu(chat_id, &session).await
    }

    /// Save button: persist the accumulated field changes as a patch. The
    /// record is removed whatever the outcome; a failed save means starting
    /// the edit over.
    async fn save_edit(&self, chat_id: i64) -> Result<()> {
        let Some(ConversationRecord::Editing(session)) =
            self.sessions.remove(chat_id, WizardMode::Edit)
        else {
            return Ok(());
        };

        let patch = ProductPatch::diff(&session.original, &session.draft);
        if patch.is_empty() {
            self.outbox
                .send_text(chat_id, "Nothing changed, the product is untouched")
                .await?;
            return Ok(());
        }

        match self.store.update(&session.product_id, patch).await {
            Ok(Some(product)) => {
                info!(chat_id, product_id = %product.id, "Product updated");
                self.outbox
                    .send_text(
                        chat_id,
                        &format!(
                            "✅ Product updated!\n\n{}",
                            format_product_card(&product)
                        ),
                    )
                    .await
            }
            Ok(None) => {
                warn!(chat_id, product_id = %session.product_id, "Edited product vanished before save");
                self.outbox
                    .send_text(chat_id, "❌ The product no longer exists")
                    .await
            }
            Err(e) => {
                error!(chat_id, product_id = %session.product_id, error = %e, "Failed to save product edit");
                self.outbox
                    .send_text(chat_id, "❌ Failed to save the changes")
                    .await
            }
        }
    }

    async fn cancel_edit(&self, chat_id: i64) -> Result<()> {
        if self.sessions.remove(chat_id, WizardMode::Edit).is_some() {
            info!(chat_id, "Product edit cancelled");
            self.outbox.send_text(chat_id, "❌ Edit cancelled").await?;
        }
        Ok(())
    }

    // ---- shared event routing ----

    async fn handle_text(&self, chat_id: i64, text: &str) -> Result<()> {
        // An open field prompt takes priority over a paused creation wizard.
        if let Some(ConversationRecord::Editing(session)) =
            self.sessions.get(chat_id, WizardMode::Edit)
        {
            if let EditStep::AwaitingValue(field) = session.step {
                return self.apply_edit_value(chat_id, session, field, text).await;
            }
        }

        if let Some(ConversationRecord::Creating(draft)) =
            self.sessions.get(chat_id, WizardMode::Create)
        {
            return self.advance_creation(chat_id, draft, text).await;
        }

        debug!(chat_id, "Text outside any wizard, ignoring");
        Ok(())
    }

    async fn handle_photo(&self, chat_id: i64, source: &str) -> Result<()> {
        if let Some(ConversationRecord::Editing(mut session)) =
            self.sessions.get(chat_id, WizardMode::Edit)
        {
            if let EditStep::CollectingPhotos(mut pending) = session.step.clone() {
                self.outbox.send_text(chat_id, "⏳ Uploading photo...").await?;
                match self.uploader.upload_photo(source).await {
                    Ok(url) => {
                        pending.push(url);
                        let count = pending.len();
                        session.step = EditStep::CollectingPhotos(pending);
                        self.sessions
                            .put(chat_id, ConversationRecord::Editing(session));
                        self.outbox
                            .send_text(
                                chat_id,
                                &format!("✅ Photo added ({count})\n\nSend /done_photos when finished"),
                            )
                            .await?;
                    }
                    Err(e) => {
                        error!(chat_id, error = %e, "Photo upload failed during edit");
                        self.outbox
                            .send_text(chat_id, "❌ Photo upload failed, send it again")
                            .await?;
                    }
                }
                return Ok(());
            }
        }

        if let Some(ConversationRecord::Creating(mut draft)) =
            self.sessions.get(chat_id, WizardMode::Create)
        {
            if draft.step != CreateStep::Photos {
                // Photos before the photo step are ignored, no transition.
                return Ok(());
            }
            self.outbox.send_text(chat_id, "⏳ Uploading photo...").await?;
            match self.uploader.upload_photo(source).await {
                Ok(url) => {
                    draft.photos.push(url);
                    let count = draft.photos.len();
                    self.sessions.put(chat_id, ConversationRecord::Creating(draft));
                    self.outbox
                        .send_text(
                            chat_id,
                            &format!("✅ Photo added ({count})\n\nAdd more or send /done"),
                        )
                        .await?;
                }
                Err(e) => {
                    error!(chat_id, error = %e, "Photo upload failed during creation");
                    self.outbox
                        .send_text(chat_id, "❌ Photo upload failed, send it again")
                        .await?;
                }
            }
            return Ok(());
        }

        debug!(chat_id, "Photo outside any wizard, ignoring");
        Ok(())
    }

    async fn handle_selection(&self, chat_id: i64, token: &str) -> Result<()> {
        // Creation wizard category pick.
        if let Some(label) = token.strip_prefix(CREATE_CATEGORY_PREFIX) {
            // "cat_" is unambiguous; "editcat_" and card tokens do not share it.
            if let Some(category) = Category::from_label(label) {
                if let Some(ConversationRecord::Creating(draft)) =
                    self.sessions.get(chat_id, WizardMode::Create)
                {
                    return self.select_creation_category(chat_id, draft, category).await;
                }
                return Ok(());
            }
        }

        if let Some(label) = token.strip_prefix(EDIT_CATEGORY_PREFIX) {
            if let Some(category) = Category::from_label(label) {
                if let Some(ConversationRecord::Editing(session)) =
                    self.sessions.get(chat_id, WizardMode::Edit)
                {
                    return self.select_edit_category(chat_id, session, category).await;
                }
                return Ok(());
            }
        }

        // Edit menu buttons.
        let field = match token {
            "edit_name" => Some(EditField::Name),
            "edit_price" => Some(EditField::Price),
            "edit_description" => Some(EditField::Description),
            "edit_category" => Some(EditField::Category),
            _ => None,
        };
        if let Some(field) = field {
            if let Some(ConversationRecord::Editing(session)) =
                self.sessions.get(chat_id, WizardMode::Edit)
            {
                return self.begin_field_edit(chat_id, session, field).await;
            }
            return Ok(());
        }

        match token {
            "edit_photos" => {
                if let Some(ConversationRecord::Editing(session)) =
                    self.sessions.get(chat_id, WizardMode::Edit)
                {
                    return self.begin_photo_replacement(chat_id, session).await;
                }
                Ok(())
            }
            "edit_done" => self.save_edit(chat_id).await,
            "edit_cancel" => self.cancel_edit(chat_id).await,
            "cancel_delete" => self.outbox.send_text(chat_id, "❌ Delete cancelled").await,
            _ => {
                if let Some(product_id) = token.strip_prefix("confirm_delete_") {
                    return self.delete_product(chat_id, product_id).await;
                }
                // Card shortcuts call straight into the flows instead of
                // re-injecting synthetic commands.
                if let Some(product_id) = token.strip_prefix("edit_") {
                    return self.open_edit_menu(chat_id, product_id).await;
                }
                if let Some(product_id) = token.strip_prefix("delete_") {
                    return self.confirm_delete(chat_id, product_id).await;
                }
                debug!(chat_id, token, "Ignoring unknown callback token");
                Ok(())
            }
        }
    }

    // ---- catalog commands ----

    async fn list_products(&self, chat_id: i64) -> Result<()> {
        let products = match self.store.list().await {
            Ok(products) => products,
            Err(e) => {
                error!(chat_id, error = %e, "Failed to list products");
                self.outbox
                    .send_text(chat_id, "❌ Failed to load the product list")
                    .await?;
                return Ok(());
            }
        };

        if products.is_empty() {
            self.outbox.send_text(chat_id, "📦 No products yet").await?;
            return Ok(());
        }

        self.outbox
            .send_text(chat_id, &format!("📦 Total products: {}", products.len()))
            .await?;

        for product in &products {
            let caption = format_product_card(product);
            let keyboard = product_card_keyboard(&product.id);
            match product.photos.first() {
                Some(photo_url) => {
                    self.outbox
                        .send_photo_card(chat_id, photo_url, &caption, Some(keyboard))
                        .await?;
                }
                None => {
                    self.outbox
                        .send_text_with_keyboard(chat_id, &caption, keyboard)
                        .await?;
                }
            }
        }
        Ok(())
    }

    async fn confirm_delete(&self, chat_id: i64, product_id: &str) -> Result<()> {
        let product = match self.store.get(product_id).await {
            Ok(Some(product)) => product,
            Ok(None) => {
                self.outbox
                    .send_text(chat_id, &format!("❌ Product {product_id} not found"))
                    .await?;
                return Ok(());
            }
            Err(e) => {
                error!(chat_id, product_id, error = %e, "Failed to load product for deletion");
                self.outbox
                    .send_text(chat_id, "❌ Failed to load the product")
                    .await?;
                return Ok(());
            }
        };

        self.outbox
            .send_text_with_keyboard(
                chat_id,
                &format!(
                    "⚠️ Confirm deletion:\n\nName: {}\nPrice: {}",
                    product.name,
                    format_price(product.price)
                ),
                delete_confirm_keyboard(product_id),
            )
            .await
    }

    async fn delete_product(&self, chat_id: i64, product_id: &str) -> Result<()> {
        match self.store.delete(product_id).await {
            Ok(true) => {
                info!(chat_id, product_id, "Product deleted");
                self.outbox.send_text(chat_id, "✅ Product deleted").await
            }
            Ok(false) => {
                self.outbox
                    .send_text(chat_id, &format!("❌ Product {product_id} not found"))
                    .await
            }
            Err(e) => {
                error!(chat_id, product_id, error = %e, "Failed to delete product");
                self.outbox
                    .send_text(chat_id, "❌ Failed to delete the product")
                    .await
            }
        }
    }

    async fn send_stats(&self, chat_id: i64) -> Result<()> {
        match self.store.list().await {
            Ok(products) => {
                let stats = catalog::summarize(&products);
                self.outbox.send_text(chat_id, &format_stats(&stats)).await
            }
            Err(e) => {
                error!(chat_id, error = %e, "Failed to compute stats");
                self.outbox
                    .send_text(chat_id, "❌ Failed to load statistics")
                    .await
            }
        }
    }
}
