//! # Editing Pipeline
//!
//! Coordinates one page edit end to end: Load → Validate → Interpret →
//! Re-validate → Record → Save
//!
//! The Pipeline owns a [`PageStore`] and drives it in a fixed order:
//!
//! ```text
//! edit:  load page → validate → interpret → re-validate
//!        → append entry(before, after, prev = head) → save after
//!        → pointers(new entry, no redo)
//! undo:  load page → load entry(head)  → save before → pointers(prev, entry)
//! redo:  load page → load entry(redo)  → save after  → pointers(entry, none)
//! ```
//!
//! Nothing is written until every check has passed, so a rejected command
//! or a validation failure leaves the page and its history untouched.

use crate::errors::EditorError;
use crate::history::{EditId, HistoryEntry, HistoryPointers, HistoryStep, NewHistoryEntry};
use crate::interpreter::{interpret, Interpretation};
use crate::store::{PageStore, StoreError};
use chrono::{DateTime, Utc};
use nebula_blocks::{validate, Document};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// Drives edits, undo and redo against a page store
pub struct Pipeline<S: PageStore> {
    store: S,
}

impl<S: PageStore> Pipeline<S> {
    /// Create pipeline over `store`
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Register a page with validated initial content
    #[instrument(skip(self, document), fields(blocks = document.len()))]
    pub fn create_page(&mut self, page_id: &str, document: &Document) -> Result<(), EditorError> {
        let document = document.revalidate()?;
        self.store.create_page(page_id, &document)?;
        info!("Page created");
        Ok(())
    }

    /// Current validated content of a page
    pub fn document(&self, page_id: &str) -> Result<Document, EditorError> {
        let page = self.store.load_page(page_id)?;
        Ok(validate(&page.blocks)?)
    }

    pub fn pointers(&self, page_id: &str) -> Result<HistoryPointers, EditorError> {
        Ok(self.store.load_page(page_id)?.pointers)
    }

    /// Interpret `command` against the page and record it if it applies
    #[instrument(skip(self))]
    pub fn apply_command(&mut self, page_id: &str, command: &str) -> Result<EditOutcome, EditorError> {
        let page = self.store.load_page(page_id)?;
        let current = validate(&page.blocks).inspect_err(|e| {
            warn!(error = %e, "Stored page failed validation");
        })?;

        let (next, note) = match interpret(&current, command) {
            Interpretation::Applied { document, note, .. } => (document, note),
            Interpretation::Rejected { note, error } => {
                info!(error = ?error, note = %note, "Command rejected");
                return Ok(EditOutcome::Rejected {
                    note,
                    document: current,
                });
            }
        };

        let next = next.revalidate().inspect_err(|e| {
            warn!(error = %e, "Edited page failed validation, nothing saved");
        })?;

        let entry_id = self.store.append_history_entry(
            page_id,
            NewHistoryEntry::new(current, next.clone(), page.pointers.history_head)
                .with_description(note.as_str()),
        )?;
        self.store.save_document(page_id, &next)?;
        self.store
            .set_pointers(page_id, page.pointers.after_edit(entry_id))?;

        info!(entry = %entry_id, note = %note, blocks = next.len(), "Edit recorded");
        Ok(EditOutcome::Applied {
            entry_id,
            document: next,
            note,
        })
    }

    /// Restore the page to the state before its most recent edit
    #[instrument(skip(self))]
    pub fn undo(&mut self, page_id: &str) -> Result<HistoryStep, EditorError> {
        let pointers = self.store.load_page(page_id)?.pointers;
        let Some(head) = pointers.undo_target() else {
            debug!("Nothing to undo");
            return Ok(HistoryStep::NothingToUndo);
        };

        let entry = self.load_entry(page_id, head)?;
        self.store.save_document(page_id, entry.before())?;
        self.store.set_pointers(page_id, pointers.after_undo(&entry))?;

        info!(entry = %entry.id(), "Undo applied");
        Ok(HistoryStep::Restored {
            document: entry.before().clone(),
            entry: entry.id(),
        })
    }

    /// Re-apply the edit the last undo stepped over
    #[instrument(skip(self))]
    pub fn redo(&mut self, page_id: &str) -> Result<HistoryStep, EditorError> {
        let pointers = self.store.load_page(page_id)?.pointers;
        let Some(target) = pointers.redo_target() else {
            debug!("Nothing to redo");
            return Ok(HistoryStep::NothingToRedo);
        };

        let entry = self.load_entry(page_id, target)?;
        self.store.save_document(page_id, entry.after())?;
        self.store.set_pointers(page_id, pointers.after_redo(&entry))?;

        info!(entry = %entry.id(), "Redo applied");
        Ok(HistoryStep::Restored {
            document: entry.after().clone(),
            entry: entry.id(),
        })
    }

    /// Most recent reachable entries, newest first, at most `limit`
    pub fn history(&self, page_id: &str, limit: usize) -> Result<HistoryLog, EditorError> {
        let pointers = self.store.load_page(page_id)?.pointers;

        let mut entries = Vec::new();
        let mut next = pointers.history_head;
        while let Some(id) = next {
            if entries.len() >= limit {
                break;
            }
            let entry = self.load_entry(page_id, id)?;
            next = entry.prev_edit_id();
            entries.push(HistorySummary {
                id: entry.id(),
                prev_edit_id: entry.prev_edit_id(),
                created_at: entry.created_at(),
                description: entry.description().map(str::to_string),
            });
        }

        Ok(HistoryLog { pointers, entries })
    }

    /// Load an entry the page's pointers refer to; it must be owned by that page
    fn load_entry(&self, page_id: &str, entry_id: EditId) -> Result<HistoryEntry, EditorError> {
        let entry = self.store.load_history_entry(entry_id)?;
        if !entry.belongs_to(page_id) {
            warn!(entry = %entry_id, owner = ?entry.page_id(), "Pointer names another page's entry");
            return Err(StoreError::ForeignEntry {
                entry: entry_id,
                page: page_id.to_string(),
            }
            .into());
        }
        Ok(entry)
    }
}

/// Result of [`Pipeline::apply_command`]
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    /// The edit was validated and recorded as `entry_id`
    Applied {
        entry_id: EditId,
        document: Document,
        note: String,
    },
    /// Nothing changed; `document` is the unchanged page
    Rejected { note: String, document: Document },
}

impl EditOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, EditOutcome::Applied { .. })
    }

    pub fn note(&self) -> &str {
        match self {
            EditOutcome::Applied { note, .. } | EditOutcome::Rejected { note, .. } => note,
        }
    }

    /// Page content after the call
    pub fn document(&self) -> &Document {
        match self {
            EditOutcome::Applied { document, .. } | EditOutcome::Rejected { document, .. } => {
                document
            }
        }
    }

    pub fn entry_id(&self) -> Option<EditId> {
        match self {
            EditOutcome::Applied { entry_id, .. } => Some(*entry_id),
            EditOutcome::Rejected { .. } => None,
        }
    }
}

/// Page pointers plus the reachable undo chain
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryLog {
    pub pointers: HistoryPointers,
    pub entries: Vec<HistorySummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummary {
    pub id: EditId,
    pub prev_edit_id: Option<EditId>,
    pub created_at: DateTime<Utc>,
    pub description: Option<String>,
}
