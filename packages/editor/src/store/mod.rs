//! # Page Store
//!
//! Persistence gateway the editor reads pages and history from.
//!
//! The editor core keeps no state between calls; everything it needs is
//! loaded through a [`PageStore`] and everything it produces is written
//! back through one. Two implementations ship with the crate:
//!
//! - [`MemoryStore`]: hash maps, for tests and embedding
//! - [`JsonFileStore`]: one JSON file per page and per history entry
//!
//! Writers take `&mut self`, so a single owner serializes every edit, undo
//! and redo of the pages it holds. Sharing one store directory between
//! processes needs external locking.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use crate::history::{EditId, HistoryEntry, HistoryPointers, NewHistoryEntry};
use nebula_blocks::Document;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("History entry not found: {0}")]
    EntryNotFound(EditId),

    #[error("History entry {entry} does not belong to page {page}")]
    ForeignEntry { entry: EditId, page: String },

    #[error("Page already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid page id: {0:?}")]
    InvalidPageId(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::PageNotFound(_) | StoreError::EntryNotFound(_))
    }
}

/// Page content as stored, before validation, plus its history pointers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPage {
    pub blocks: Value,
    #[serde(flatten)]
    pub pointers: HistoryPointers,
}

impl StoredPage {
    pub fn new(document: &Document) -> Self {
        Self {
            blocks: document.to_value(),
            pointers: HistoryPointers::default(),
        }
    }
}

/// Persistence gateway
pub trait PageStore {
    /// Register a new page with its initial content and no history
    fn create_page(&mut self, page_id: &str, document: &Document) -> StoreResult<()>;

    /// Current content and pointers of a page
    fn load_page(&self, page_id: &str) -> StoreResult<StoredPage>;

    fn load_history_entry(&self, entry_id: EditId) -> StoreResult<HistoryEntry>;

    /// Overwrite the page content
    fn save_document(&mut self, page_id: &str, document: &Document) -> StoreResult<()>;

    /// Persist an entry owned by `page_id` and return its new id
    fn append_history_entry(&mut self, page_id: &str, entry: NewHistoryEntry)
        -> StoreResult<EditId>;

    fn set_pointers(&mut self, page_id: &str, pointers: HistoryPointers) -> StoreResult<()>;
}

/// Page ids become file names, so keep them to a safe alphabet
pub fn check_page_id(page_id: &str) -> StoreResult<()> {
    let valid = !page_id.is_empty()
        && page_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidPageId(page_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_page_id() {
        assert!(check_page_id("home").is_ok());
        assert!(check_page_id("landing_page-2").is_ok());
        assert!(check_page_id("").is_err());
        assert!(check_page_id("../etc").is_err());
        assert!(check_page_id("a b").is_err());
    }

    #[test]
    fn test_stored_page_wire_shape() {
        let page = StoredPage::new(&Document::new());
        let json = serde_json::to_value(&page).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "blocks": [], "historyHead": null, "redoHead": null })
        );
    }
}
