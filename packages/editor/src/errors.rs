//! Error types for the editor

use crate::store::StoreError;
use nebula_blocks::ValidationError;
use thiserror::Error;

/// Failures that abort an edit, undo or redo without persisting anything.
///
/// Commands that merely do not apply (unrecognized text, a missing block,
/// an unknown plan) are not errors; they come back as a rejected outcome
/// with a note.
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl EditorError {
    /// Unknown page or history entry
    pub fn is_not_found(&self) -> bool {
        matches!(self, EditorError::Store(e) if e.is_not_found())
    }
}
