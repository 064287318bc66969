//! # Edit History
//!
//! Every accepted edit becomes an immutable [`HistoryEntry`] holding the
//! page before and after the change, linked to the entry that was the
//! history head when it was recorded.
//!
//! ## Design
//!
//! - Entries are append-only; they are never modified or removed
//! - Two pointers per page drive undo/redo:
//!   - `history_head`: most recently applied entry
//!   - `redo_head`: entry the last undo stepped away from
//! - Undo restores `before` of the head and steps back along `prev_edit_id`
//! - Redo restores `after` of the redo entry; only one step is remembered
//! - A new edit clears `redo_head`; entries it pointed at stay in the log,
//!   unreachable
//!
//! ```text
//!   None ← e1 ← e2 ← e3        history_head = e3, redo_head = None
//!   undo:  None ← e1 ← e2      history_head = e2, redo_head = e3
//!   redo:  None ← e1 ← e2 ← e3 history_head = e3, redo_head = None
//! ```
//!
//! The transitions live on [`HistoryPointers`] so that a caller backed by
//! external storage and the in-memory [`EditHistory`] share them.

use chrono::{DateTime, Utc};
use nebula_blocks::Document;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifier of a history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EditId(Uuid);

impl EditId {
    /// Fresh random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EditId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EditId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for EditId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Immutable record of one accepted edit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    id: EditId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    page_id: Option<String>,
    before: Document,
    after: Document,
    prev_edit_id: Option<EditId>,
    created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl HistoryEntry {
    pub fn id(&self) -> EditId {
        self.id
    }

    /// Page the entry was recorded for; `None` for in-memory histories
    pub fn page_id(&self) -> Option<&str> {
        self.page_id.as_deref()
    }

    pub fn belongs_to(&self, page_id: &str) -> bool {
        self.page_id() == Some(page_id)
    }

    pub fn before(&self) -> &Document {
        &self.before
    }

    pub fn after(&self) -> &Document {
        &self.after
    }

    pub fn prev_edit_id(&self) -> Option<EditId> {
        self.prev_edit_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// An edit about to be recorded; the store assigns its id
#[derive(Debug, Clone, PartialEq)]
pub struct NewHistoryEntry {
    pub page_id: Option<String>,
    pub before: Document,
    pub after: Document,
    pub prev_edit_id: Option<EditId>,
    pub description: Option<String>,
}

impl NewHistoryEntry {
    pub fn new(before: Document, after: Document, prev_edit_id: Option<EditId>) -> Self {
        Self {
            page_id: None,
            before,
            after,
            prev_edit_id,
            description: None,
        }
    }

    pub fn for_page(mut self, page_id: impl Into<String>) -> Self {
        self.page_id = Some(page_id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Seal into an entry with a fresh id and the current time
    pub fn into_entry(self) -> HistoryEntry {
        HistoryEntry {
            id: EditId::new(),
            page_id: self.page_id,
            before: self.before,
            after: self.after,
            prev_edit_id: self.prev_edit_id,
            created_at: Utc::now(),
            description: self.description,
        }
    }
}

/// Mutable undo/redo pointers of one page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPointers {
    #[serde(default)]
    pub history_head: Option<EditId>,
    #[serde(default)]
    pub redo_head: Option<EditId>,
}

/// Coarse state of the undo/redo machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryState {
    /// Nothing to undo or redo
    Empty,
    /// At the head of the chain, no pending redo
    AtHead,
    /// An undo happened and its entry can be redone
    SteppedBack,
}

impl HistoryPointers {
    pub fn state(&self) -> HistoryState {
        match (self.history_head, self.redo_head) {
            (_, Some(_)) => HistoryState::SteppedBack,
            (Some(_), None) => HistoryState::AtHead,
            (None, None) => HistoryState::Empty,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history_head.is_some()
    }

    pub fn can_redo(&self) -> bool {
        self.redo_head.is_some()
    }

    /// Pointers after recording `entry` as the new head
    pub fn after_edit(self, entry: EditId) -> Self {
        Self {
            history_head: Some(entry),
            redo_head: None,
        }
    }

    /// Entry an undo would read
    pub fn undo_target(&self) -> Option<EditId> {
        self.history_head
    }

    /// Pointers after undoing `entry` (the current head)
    pub fn after_undo(self, entry: &HistoryEntry) -> Self {
        Self {
            history_head: entry.prev_edit_id,
            redo_head: Some(entry.id),
        }
    }

    /// Entry a redo would read
    pub fn redo_target(&self) -> Option<EditId> {
        self.redo_head
    }

    /// Pointers after redoing `entry` (the current redo head)
    pub fn after_redo(self, entry: &HistoryEntry) -> Self {
        Self {
            history_head: Some(entry.id),
            redo_head: None,
        }
    }
}

/// Outcome of an undo or redo request
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryStep {
    /// `document` is now the page content; `entry` is the entry stepped over
    Restored { document: Document, entry: EditId },
    NothingToUndo,
    NothingToRedo,
}

impl HistoryStep {
    pub fn is_restored(&self) -> bool {
        matches!(self, HistoryStep::Restored { .. })
    }

    pub fn document(&self) -> Option<&Document> {
        match self {
            HistoryStep::Restored { document, .. } => Some(document),
            _ => None,
        }
    }

    pub fn note(&self) -> &'static str {
        match self {
            HistoryStep::Restored { .. } => "Restored",
            HistoryStep::NothingToUndo => "Nothing to undo",
            HistoryStep::NothingToRedo => "Nothing to redo",
        }
    }
}

/// In-memory edit history for a single page
#[derive(Debug, Default)]
pub struct EditHistory {
    entries: HashMap<EditId, HistoryEntry>,
    pointers: HistoryPointers,
}

impl EditHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointers(&self) -> HistoryPointers {
        self.pointers
    }

    pub fn entry(&self, id: EditId) -> Option<&HistoryEntry> {
        self.entries.get(&id)
    }

    /// Number of recorded entries, including ones no longer reachable
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.pointers.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.pointers.can_redo()
    }

    /// Record an accepted edit and make it the head
    pub fn apply_edit(&mut self, before: Document, after: Document) -> EditId {
        self.record(NewHistoryEntry::new(before, after, self.pointers.history_head))
    }

    /// Record an edit built by the caller; its `prev_edit_id` is replaced
    /// with the current head.
    pub fn record(&mut self, mut edit: NewHistoryEntry) -> EditId {
        edit.prev_edit_id = self.pointers.history_head;
        let entry = edit.into_entry();
        let id = entry.id;
        self.entries.insert(id, entry);
        self.pointers = self.pointers.after_edit(id);
        id
    }

    /// Step back over the head entry
    pub fn undo(&mut self) -> HistoryStep {
        let Some(entry) = self
            .pointers
            .undo_target()
            .and_then(|id| self.entries.get(&id))
        else {
            return HistoryStep::NothingToUndo;
        };

        self.pointers = self.pointers.after_undo(entry);
        HistoryStep::Restored {
            document: entry.before.clone(),
            entry: entry.id,
        }
    }

    /// Step forward over the entry the last undo left
    pub fn redo(&mut self) -> HistoryStep {
        let Some(entry) = self
            .pointers
            .redo_target()
            .and_then(|id| self.entries.get(&id))
        else {
            return HistoryStep::NothingToRedo;
        };

        self.pointers = self.pointers.after_redo(entry);
        HistoryStep::Restored {
            document: entry.after.clone(),
            entry: entry.id,
        }
    }

    /// Entries reachable from the head, newest first
    pub fn chain(&self) -> Chain<'_> {
        Chain {
            history: self,
            next: self.pointers.history_head,
        }
    }
}

/// Iterator following `prev_edit_id` links back from the head
pub struct Chain<'a> {
    history: &'a EditHistory,
    next: Option<EditId>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a HistoryEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.history.entries.get(&self.next?)?;
        self.next = entry.prev_edit_id;
        Some(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nebula_blocks::{default_hero, default_pricing, default_rich_text};

    fn doc_with(n: usize) -> Document {
        let mut doc = Document::new();
        for _ in 0..n {
            doc = doc.with_block_appended(default_rich_text());
        }
        doc
    }

    #[test]
    fn test_history_creation() {
        let history = EditHistory::new();
        assert!(history.is_empty());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.pointers().state(), HistoryState::Empty);
    }

    #[test]
    fn test_apply_and_undo() {
        let mut history = EditHistory::new();
        let before = Document::new();
        let after = before.with_block_appended(default_pricing());

        let id = history.apply_edit(before.clone(), after.clone());
        assert_eq!(history.pointers().history_head, Some(id));
        assert_eq!(history.pointers().state(), HistoryState::AtHead);

        let step = history.undo();
        assert_eq!(
            step,
            HistoryStep::Restored {
                document: before,
                entry: id
            }
        );
        assert_eq!(history.pointers().history_head, None);
        assert_eq!(history.pointers().redo_head, Some(id));
        assert_eq!(history.pointers().state(), HistoryState::SteppedBack);

        let step = history.redo();
        assert_eq!(step.document(), Some(&after));
        assert_eq!(history.pointers(), HistoryPointers::default().after_edit(id));
    }

    #[test]
    fn test_nothing_to_undo_or_redo() {
        let mut history = EditHistory::new();
        assert_eq!(history.undo(), HistoryStep::NothingToUndo);
        assert_eq!(history.redo(), HistoryStep::NothingToRedo);
        assert_eq!(history.undo().note(), "Nothing to undo");

        history.apply_edit(doc_with(0), doc_with(1));
        assert_eq!(history.redo(), HistoryStep::NothingToRedo);
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut history = EditHistory::new();
        history.apply_edit(doc_with(0), doc_with(1));
        history.undo();
        assert!(history.can_redo());

        history.apply_edit(doc_with(0), doc_with(0).with_block_appended(default_hero()));
        assert!(!history.can_redo());
        assert_eq!(history.redo(), HistoryStep::NothingToRedo);

        // the undone entry is kept, just unreachable
        assert_eq!(history.len(), 2);
        assert_eq!(history.chain().count(), 1);
    }

    #[test]
    fn test_redo_is_a_single_step() {
        let mut history = EditHistory::new();
        for i in 0..3 {
            history.apply_edit(doc_with(i), doc_with(i + 1));
        }

        history.undo();
        history.undo();
        let step = history.redo();
        assert_eq!(step.document(), Some(&doc_with(2)));
        assert_eq!(history.redo(), HistoryStep::NothingToRedo);
    }

    #[test]
    fn test_chain_integrity() {
        let mut history = EditHistory::new();
        let mut ids = Vec::new();
        for i in 0..5 {
            ids.push(history.apply_edit(doc_with(i), doc_with(i + 1)));
        }

        let chain: Vec<EditId> = history.chain().map(|e| e.id()).collect();
        ids.reverse();
        assert_eq!(chain, ids);

        let last = history.chain().last().unwrap();
        assert_eq!(last.prev_edit_id(), None);
    }

    #[test]
    fn test_pointer_transitions() {
        let entry = NewHistoryEntry::new(doc_with(0), doc_with(1), None)
            .with_description("RichText added")
            .into_entry();
        let pointers = HistoryPointers::default().after_edit(entry.id());

        assert_eq!(pointers.undo_target(), Some(entry.id()));
        let undone = pointers.after_undo(&entry);
        assert_eq!(undone.history_head, None);
        assert_eq!(undone.redo_target(), Some(entry.id()));

        let redone = undone.after_redo(&entry);
        assert_eq!(redone, pointers);
        assert_eq!(entry.description(), Some("RichText added"));
    }

    #[test]
    fn test_entry_serialization_validates_snapshots() {
        let entry = NewHistoryEntry::new(doc_with(0), doc_with(2), None).into_entry();
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("prevEditId").is_some());
        assert!(json.get("createdAt").is_some());

        let back: HistoryEntry = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(back, entry);
        assert!(json.get("pageId").is_none());

        let mut broken = json;
        broken["after"] = serde_json::json!([{ "type": "Hero", "props": { "headline": "" } }]);
        assert!(serde_json::from_value::<HistoryEntry>(broken).is_err());
    }

    #[test]
    fn test_entry_records_its_page() {
        let entry = NewHistoryEntry::new(doc_with(0), doc_with(1), None)
            .for_page("alpha")
            .into_entry();
        assert_eq!(entry.page_id(), Some("alpha"));
        assert!(entry.belongs_to("alpha"));
        assert!(!entry.belongs_to("beta"));

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["pageId"], "alpha");
        let back: HistoryEntry = serde_json::from_value(json).unwrap();
        assert!(back.belongs_to("alpha"));
    }

    #[test]
    fn test_edit_id_round_trips_through_text() {
        let id = EditId::new();
        let parsed: EditId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("not-a-uuid".parse::<EditId>().is_err());
    }
}
