use super::{check_page_id, PageStore, StoreError, StoreResult, StoredPage};
use crate::history::{EditId, HistoryEntry, HistoryPointers, NewHistoryEntry};
use nebula_blocks::Document;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

const PAGES_DIR: &str = "pages";
const EDITS_DIR: &str = "edits";

/// File-backed page store.
///
/// ```text
/// <root>/pages/<page_id>.json   { "blocks": [...], "historyHead": .., "redoHead": .. }
/// <root>/edits/<entry_id>.json  { "id": .., "pageId": .., "before": [...], "after": [...], ... }
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Open (creating if needed) a store rooted at `root`
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(root.join(PAGES_DIR))?;
        fs::create_dir_all(root.join(EDITS_DIR))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn page_path(&self, page_id: &str) -> PathBuf {
        self.root.join(PAGES_DIR).join(format!("{}.json", page_id))
    }

    fn entry_path(&self, entry_id: EditId) -> PathBuf {
        self.root.join(EDITS_DIR).join(format!("{}.json", entry_id))
    }

    fn read_page(&self, page_id: &str) -> StoreResult<StoredPage> {
        check_page_id(page_id)?;
        read_json(&self.page_path(page_id))?
            .ok_or_else(|| StoreError::PageNotFound(page_id.to_string()))
    }

    fn update_page<F>(&self, page_id: &str, update: F) -> StoreResult<()>
    where
        F: FnOnce(&mut StoredPage),
    {
        let mut page = self.read_page(page_id)?;
        update(&mut page);
        write_json(&self.page_path(page_id), &page)
    }
}

impl PageStore for JsonFileStore {
    fn create_page(&mut self, page_id: &str, document: &Document) -> StoreResult<()> {
        check_page_id(page_id)?;
        let path = self.page_path(page_id);
        if path.exists() {
            return Err(StoreError::AlreadyExists(page_id.to_string()));
        }
        write_json(&path, &StoredPage::new(document))
    }

    fn load_page(&self, page_id: &str) -> StoreResult<StoredPage> {
        self.read_page(page_id)
    }

    fn load_history_entry(&self, entry_id: EditId) -> StoreResult<HistoryEntry> {
        read_json(&self.entry_path(entry_id))?.ok_or(StoreError::EntryNotFound(entry_id))
    }

    fn save_document(&mut self, page_id: &str, document: &Document) -> StoreResult<()> {
        self.update_page(page_id, |page| page.blocks = document.to_value())
    }

    fn append_history_entry(
        &mut self,
        page_id: &str,
        entry: NewHistoryEntry,
    ) -> StoreResult<EditId> {
        self.read_page(page_id)?;
        let entry = entry.for_page(page_id).into_entry();
        write_json(&self.entry_path(entry.id()), &entry)?;
        Ok(entry.id())
    }

    fn set_pointers(&mut self, page_id: &str, pointers: HistoryPointers) -> StoreResult<()> {
        self.update_page(page_id, |page| page.pointers = pointers)
    }
}

/// `Ok(None)` when the file does not exist
fn read_json<T: DeserializeOwned>(path: &Path) -> StoreResult<Option<T>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Write through a temp file and rename, so readers never see half a file
fn write_json<T: Serialize>(path: &Path, value: &T) -> StoreResult<()> {
    let content = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, content)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    debug!(path = %path.display(), "Wrote store file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nebula_blocks::default_pricing;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_layout() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path().join("store")).unwrap();

        assert!(store.root().join("pages").is_dir());
        assert!(store.root().join("edits").is_dir());
    }

    #[test]
    fn test_page_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();

        store.create_page("home", &Document::new()).unwrap();
        let doc = Document::from_blocks(vec![default_pricing()]).unwrap();
        store.save_document("home", &doc).unwrap();

        let id = store
            .append_history_entry(
                "home",
                NewHistoryEntry::new(Document::new(), doc.clone(), None)
                    .with_description("Pricing added"),
            )
            .unwrap();
        store
            .set_pointers("home", HistoryPointers::default().after_edit(id))
            .unwrap();

        // reopen to make sure nothing lives only in memory
        let store = JsonFileStore::open(dir.path()).unwrap();
        let page = store.load_page("home").unwrap();
        assert_eq!(page.blocks, doc.to_value());
        assert_eq!(page.pointers.history_head, Some(id));

        let entry = store.load_history_entry(id).unwrap();
        assert_eq!(entry.after(), &doc);
        assert_eq!(entry.description(), Some("Pricing added"));
        assert_eq!(entry.page_id(), Some("home"));
    }

    #[test]
    fn test_entry_file_names_its_page() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();
        store.create_page("alpha", &Document::new()).unwrap();

        let id = store
            .append_history_entry(
                "alpha",
                NewHistoryEntry::new(Document::new(), Document::new(), None),
            )
            .unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.entry_path(id)).unwrap()).unwrap();
        assert_eq!(raw["pageId"], "alpha");

        let reopened = JsonFileStore::open(dir.path()).unwrap();
        assert!(reopened.load_history_entry(id).unwrap().belongs_to("alpha"));
    }

    #[test]
    fn test_missing_and_invalid_ids() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();

        assert!(matches!(
            store.load_page("nope"),
            Err(StoreError::PageNotFound(_))
        ));
        assert!(matches!(
            store.load_history_entry(EditId::new()),
            Err(StoreError::EntryNotFound(_))
        ));
        assert!(matches!(
            store.create_page("../escape", &Document::new()),
            Err(StoreError::InvalidPageId(_))
        ));
    }

    #[test]
    fn test_failed_rename_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        // a directory in the way makes the rename fail
        let target = dir.path().join("blocked.json");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("inner"), "x").unwrap();

        assert!(matches!(
            write_json(&target, &serde_json::json!([])),
            Err(StoreError::Io(_))
        ));
        assert!(!dir.path().join("blocked.json.tmp").exists());
        assert!(target.is_dir());
    }

    #[test]
    fn test_corrupt_entry_is_rejected() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        let id = EditId::new();

        fs::write(
            store.entry_path(id),
            format!(
                r#"{{"id":"{}","before":[{{"type":"Bogus","props":{{}}}}],"after":[],"prevEditId":null,"createdAt":"2024-01-01T00:00:00Z"}}"#,
                id
            ),
        )
        .unwrap();

        assert!(matches!(
            store.load_history_entry(id),
            Err(StoreError::Json(_))
        ));
    }
}
