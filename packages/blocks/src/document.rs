//! # Page Document
//!
//! An ordered, immutable sequence of blocks. Order is render order, top to
//! bottom. Editing never changes a `Document` in place: the `with_*`
//! helpers return a new value and leave the original untouched.
//!
//! Deserializing a `Document` always goes through [`validate`], so a
//! snapshot read back from storage is held to the same shape rules as a
//! fresh edit.

use crate::block::{Block, BlockKind};
use crate::error::ValidationResult;
use crate::validator::{check_required, validate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    /// Empty page
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from typed blocks, enforcing required fields
    pub fn from_blocks(blocks: Vec<Block>) -> ValidationResult<Self> {
        for (index, block) in blocks.iter().enumerate() {
            check_required(index, block)?;
        }
        Ok(Self { blocks })
    }

    pub(crate) fn from_checked(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    /// Position of the last block of `kind`, scanning from the end
    pub fn last_index_of(&self, kind: BlockKind) -> Option<usize> {
        self.blocks.iter().rposition(|b| b.kind() == kind)
    }

    /// New document with `block` added at the end.
    ///
    /// The result is not re-checked; run [`Document::revalidate`] before
    /// treating it as canonical.
    pub fn with_block_appended(&self, block: Block) -> Self {
        let mut blocks = self.blocks.clone();
        blocks.push(block);
        Self { blocks }
    }

    /// New document with the block at `index` swapped for `block`.
    /// Returns `None` if `index` is out of range.
    pub fn with_block_replaced(&self, index: usize, block: Block) -> Option<Self> {
        if index >= self.blocks.len() {
            return None;
        }
        let mut blocks = self.blocks.clone();
        blocks[index] = block;
        Some(Self { blocks })
    }

    /// Run the document back through the validator via its stored form
    pub fn revalidate(&self) -> ValidationResult<Self> {
        validate(&self.to_value())
    }

    /// Stored (JSON) form of the block sequence
    pub fn to_value(&self) -> Value {
        serde_json::json!(self.blocks)
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.blocks.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        validate(&value).map_err(serde::de::Error::custom)
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
