//! # Nebula Editor
//!
//! Command-driven page editing with undo/redo for Nebula pages.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ interpreter: command text → Mutation        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ mutations: Document → new Document          │
//! │ blocks::validate: re-check the result       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ history: immutable before/after entries,    │
//! │          head + redo pointers               │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ store: PageStore gateway (memory, JSON)     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Documents are values**: mutations return new documents
//! 2. **One validator**: every stored or edited page goes through
//!    `nebula_blocks::validate`
//! 3. **Append-only history**: entries are never changed; only the two
//!    pointers move
//! 4. **No hidden state**: the store is passed in, the core keeps nothing
//!    between calls
//!
//! ## Usage
//!
//! ```rust,ignore
//! use nebula_editor::{MemoryStore, Pipeline};
//! use nebula_blocks::Document;
//!
//! let mut pipeline = Pipeline::new(MemoryStore::new());
//! pipeline.create_page("home", &Document::new())?;
//!
//! let outcome = pipeline.apply_command("home", "add pricing")?;
//! assert_eq!(outcome.note(), "Pricing added");
//!
//! pipeline.undo("home")?;
//! pipeline.redo("home")?;
//! ```

mod errors;
mod history;
mod interpreter;
mod mutations;
mod pipeline;
mod store;

pub use errors::EditorError;
pub use history::{
    Chain, EditHistory, EditId, HistoryEntry, HistoryPointers, HistoryState, HistoryStep,
    NewHistoryEntry,
};
pub use interpreter::{
    interpret, parse_command, CommandError, Interpretation, FEATURE_CARD_USAGE, FEATURE_USAGE,
    PLAN_USAGE,
};
pub use mutations::{Mutation, MutationError, TextField};
pub use pipeline::{EditOutcome, HistoryLog, HistorySummary, Pipeline};
pub use store::{
    check_page_id, JsonFileStore, MemoryStore, PageStore, StoreError, StoreResult, StoredPage,
};

// Re-export block types for convenience
pub use nebula_blocks::{validate, Block, BlockKind, Document, ValidationError};
