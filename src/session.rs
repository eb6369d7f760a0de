//! In-memory conversation state for the admin wizards.
//!
//! Each chat may hold at most one creation record and one edit record at a
//! time; the two are stored under distinct keys and never interfere. Records
//! are ephemeral: created when a wizard starts, dropped on commit or cancel,
//! and lost on restart by design.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::catalog::{Category, Product};

/// Which wizard a record belongs to; part of the storage key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardMode {
    Create,
    Edit,
}

/// Position inside the linear creation wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateStep {
    Name,
    Price,
    Description,
    Category,
    Photos,
}

/// Working memory of an in-flight `/add_product` run. Fields fill in as
/// steps complete; `photos` only accumulates once a category is chosen.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateDraft {
    pub step: CreateStep,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub photos: Vec<String>,
}

impl CreateDraft {
    pub fn new() -> Self {
        CreateDraft {
            step: CreateStep::Name,
            name: None,
            price: None,
            description: None,
            category: None,
            photos: Vec::new(),
        }
    }
}

impl Default for CreateDraft {
    fn default() -> Self {
        CreateDraft::new()
    }
}

/// Which field an edit-wizard prompt is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Name,
    Price,
    Description,
    Category,
}

/// Position inside the edit wizard. Photo replacement carries its own
/// pending list so the draft's photos stay intact until `/done_photos`.
#[derive(Debug, Clone, PartialEq)]
pub enum EditStep {
    Menu,
    AwaitingValue(EditField),
    CollectingPhotos(Vec<String>),
}

/// Working memory of an in-flight `/edit_product` run. `original` is the
/// product as loaded; `draft` takes the field updates until save.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    pub product_id: String,
    pub original: Product,
    pub draft: Product,
    pub step: EditStep,
}

impl EditSession {
    pub fn new(product: Product) -> Self {
        EditSession {
            product_id: product.id.clone(),
            draft: product.clone(),
            original: product,
            step: EditStep::Menu,
        }
    }
}

/// One active wizard. The sum type keeps illegal combinations (a creation
/// record with a target product id, an edit record without one) out of the
/// type space entirely.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversationRecord {
    Creating(CreateDraft),
    Editing(EditSession),
}

impl ConversationRecord {
    pub fn mode(&self) -> WizardMode {
        match self {
            ConversationRecord::Creating(_) => WizardMode::Create,
            ConversationRecord::Editing(_) => WizardMode::Edit,
        }
    }
}

/// Chat-keyed holder of in-flight wizard records.
///
/// The lock is only held for the map operation itself, never across an
/// await, so one chat's pending upload or database call cannot stall
/// another chat's events.
#[derive(Debug, Default)]
pub struct SessionStore {
    records: Mutex<HashMap<(i64, WizardMode), ConversationRecord>>,
}

impl SessionStore {
    pub fn new() -> Self {
        SessionStore::default()
    }

    pub fn get(&self, chat_id: i64, mode: WizardMode) -> Option<ConversationRecord> {
        self.lock().get(&(chat_id, mode)).cloned()
    }

    /// Stores `record` under the chat and the mode implied by its variant,
    /// replacing any previous record of that mode.
    pub fn put(&self, chat_id: i64, record: ConversationRecord) {
        let mode = record.mode();
        self.lock().insert((chat_id, mode), record);
    }

    pub fn remove(&self, chat_id: i64, mode: WizardMode) -> Option<ConversationRecord> {
        self.lock().remove(&(chat_id, mode))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<(i64, WizardMode), ConversationRecord>> {
        // Every map operation is a single insert/get/remove, so the map is
        // never left half-updated and a poisoned guard is safe to reuse.
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_product() -> Product {
        Product {
            id: "100".to_string(),
            name: "Cap".to_string(),
            price: 990.0,
            description: "plain cap".to_string(),
            category: Category::Headwear,
            photos: vec!["https://example.com/cap.jpg".to_string()],
            views: 0,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_put_get_remove() {
        let store = SessionStore::new();
        assert!(store.get(1, WizardMode::Create).is_none());

        store.put(1, ConversationRecord::Creating(CreateDraft::new()));
        assert!(store.get(1, WizardMode::Create).is_some());
        assert!(store.get(2, WizardMode::Create).is_none());

        assert!(store.remove(1, WizardMode::Create).is_some());
        assert!(store.get(1, WizardMode::Create).is_none());
        assert!(store.remove(1, WizardMode::Create).is_none());
    }

    #[test]
    fn test_create_and_edit_records_coexist() {
        let store = SessionStore::new();
        store.put(7, ConversationRecord::Creating(CreateDraft::new()));
        store.put(7, ConversationRecord::Editing(EditSession::new(sample_product())));

        assert!(store.get(7, WizardMode::Create).is_some());
        assert!(store.get(7, WizardMode::Edit).is_some());

        store.remove(7, WizardMode::Edit);
        assert!(store.get(7, WizardMode::Create).is_some());
        assert!(store.get(7, WizardMode::Edit).is_none());
    }

    #[test]
    fn test_records_are_chat_scoped() {
        let store = SessionStore::new();
        let mut draft = CreateDraft::new();
        draft.name = Some("Sneakers".to_string());
        draft.step = CreateStep::Price;
        store.put(1, ConversationRecord::Creating(draft));
        store.put(2, ConversationRecord::Creating(CreateDraft::new()));

        match store.get(1, WizardMode::Create) {
            Some(ConversationRecord::Creating(d)) => {
                assert_eq!(d.name.as_deref(), Some("Sneakers"));
                assert_eq!(d.step, CreateStep::Price);
            }
            other => panic!("unexpected record: {other:?}"),
        }
        match store.get(2, WizardMode::Create) {
            Some(ConversationRecord::Creating(d)) => assert_eq!(d.step, CreateStep::Name),
            other => panic!("unexpected record: {other:?}"),
        }
    }

    #[test]
    fn test_edit_session_starts_at_menu_with_draft_copy() {
        let session = EditSession::new(sample_product());
        assert_eq!(session.step, EditStep::Menu);
        assert_eq!(session.product_id, "100");
        assert_eq!(session.original, session.draft);
    }
}
