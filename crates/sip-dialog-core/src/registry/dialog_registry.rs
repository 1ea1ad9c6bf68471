use std::sync::Arc;

use dashmap::DashMap;

use crate::dialog::Dialog;

/// Indexes live dialogs by their canonical `"<call_id>;local=<lt>;remote=<rt>"`
/// string (spec.md §4.4, §4.5). Unlike the transaction registry, inserts here
/// are never rejected for already existing: a re-INVITE observing the same
/// dialog id simply looks the existing entry up again.
#[derive(Default)]
pub struct DialogRegistry {
    dialogs: DashMap<String, Arc<Dialog>>,
}

impl DialogRegistry {
    pub fn new() -> Self {
        DialogRegistry::default()
    }

    pub fn insert(&self, dialog: Arc<Dialog>) {
        self.dialogs.insert(dialog.id.canonical(), dialog);
    }

    pub fn get(&self, canonical_id: &str) -> Option<Arc<Dialog>> {
        self.dialogs.get(canonical_id).map(|entry| entry.value().clone())
    }

    pub fn remove(&self, canonical_id: &str) {
        self.dialogs.remove(canonical_id);
    }

    pub fn len(&self) -> usize {
        self.dialogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dialogs.is_empty()
    }
}
