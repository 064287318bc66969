use thiserror::Error;

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Why a block sequence was rejected. Validation is all-or-nothing: the
/// first offending block fails the whole sequence.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Expected a sequence of blocks, found {found}")]
    NotASequence { found: &'static str },

    #[error("Invalid block at index {index}: {reason}")]
    InvalidBlock { index: usize, reason: String },

    #[error("Block at index {index}: `{field}` must not be empty")]
    EmptyField { index: usize, field: String },
}

impl ValidationError {
    pub fn invalid_block(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidBlock {
            index,
            reason: reason.into(),
        }
    }

    pub fn empty_field(index: usize, field: impl Into<String>) -> Self {
        Self::EmptyField {
            index,
            field: field.into(),
        }
    }
}
