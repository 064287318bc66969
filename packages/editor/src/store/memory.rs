use super::{check_page_id, PageStore, StoreError, StoreResult, StoredPage};
use crate::history::{EditId, HistoryEntry, HistoryPointers, NewHistoryEntry};
use nebula_blocks::Document;
use serde_json::Value;
use std::collections::HashMap;

/// In-memory page store
#[derive(Debug, Default)]
pub struct MemoryStore {
    pages: HashMap<String, StoredPage>,
    entries: HashMap<EditId, HistoryEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert page content without validating it, as an external writer might
    pub fn insert_raw(&mut self, page_id: impl Into<String>, blocks: Value) {
        self.pages.insert(
            page_id.into(),
            StoredPage {
                blocks,
                pointers: HistoryPointers::default(),
            },
        );
    }

    /// Number of history entries across all pages
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    fn page_mut(&mut self, page_id: &str) -> StoreResult<&mut StoredPage> {
        self.pages
            .get_mut(page_id)
            .ok_or_else(|| StoreError::PageNotFound(page_id.to_string()))
    }
}

impl PageStore for MemoryStore {
    fn create_page(&mut self, page_id: &str, document: &Document) -> StoreResult<()> {
        check_page_id(page_id)?;
        if self.pages.contains_key(page_id) {
            return Err(StoreError::AlreadyExists(page_id.to_string()));
        }
        self.pages
            .insert(page_id.to_string(), StoredPage::new(document));
        Ok(())
    }

    fn load_page(&self, page_id: &str) -> StoreResult<StoredPage> {
        self.pages
            .get(page_id)
            .cloned()
            .ok_or_else(|| StoreError::PageNotFound(page_id.to_string()))
    }

    fn load_history_entry(&self, entry_id: EditId) -> StoreResult<HistoryEntry> {
        self.entries
            .get(&entry_id)
            .cloned()
            .ok_or(StoreError::EntryNotFound(entry_id))
    }

    fn save_document(&mut self, page_id: &str, document: &Document) -> StoreResult<()> {
        self.page_mut(page_id)?.blocks = document.to_value();
        Ok(())
    }

    fn append_history_entry(
        &mut self,
        page_id: &str,
        entry: NewHistoryEntry,
    ) -> StoreResult<EditId> {
        self.page_mut(page_id)?;
        let entry = entry.for_page(page_id).into_entry();
        let id = entry.id();
        self.entries.insert(id, entry);
        Ok(id)
    }

    fn set_pointers(&mut self, page_id: &str, pointers: HistoryPointers) -> StoreResult<()> {
        self.page_mut(page_id)?.pointers = pointers;
        Ok(())
    }
}
