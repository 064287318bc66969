//! Structural validator for block sequences.
//!
//! Every document that enters the editor, whether loaded from storage or
//! produced by a mutation, passes through [`validate`]. The validator:
//!
//! - requires the input to be a sequence
//! - resolves each element's variant from its `type` tag
//! - fills defaulted fields and drops unknown ones
//! - rejects missing, wrong-shaped or empty required fields
//!
//! Nothing is returned unless every block passes.

use crate::block::Block;
use crate::document::Document;
use crate::error::{ValidationError, ValidationResult};
use serde::Deserialize;
use serde_json::Value;

/// Validate and normalize an arbitrary JSON value into a [`Document`]
pub fn validate(input: &Value) -> ValidationResult<Document> {
    let elements = input.as_array().ok_or(ValidationError::NotASequence {
        found: value_kind(input),
    })?;

    let mut blocks = Vec::with_capacity(elements.len());
    for (index, element) in elements.iter().enumerate() {
        let block = Block::deserialize(element)
            .map_err(|e| ValidationError::invalid_block(index, e.to_string()))?;
        check_required(index, &block)?;
        blocks.push(block);
    }

    Ok(Document::from_checked(blocks))
}

/// Check the non-empty constraints serde cannot express.
pub(crate) fn check_required(index: usize, block: &Block) -> ValidationResult<()> {
    match block {
        Block::Hero(props) => require(index, "headline", &props.headline),
        Block::RichText(_) => Ok(()),
        Block::Pricing(props) => {
            for (i, plan) in props.plans.iter().enumerate() {
                require(index, &format!("plans[{}].name", i), &plan.name)?;
                require(index, &format!("plans[{}].price", i), &plan.price)?;
            }
            Ok(())
        }
        Block::Features3(props) => {
            for (i, item) in props.items.iter().enumerate() {
                require(index, &format!("items[{}].title", i), &item.title)?;
            }
            Ok(())
        }
    }
}

fn require(index: usize, field: &str, value: &str) -> ValidationResult<()> {
    if value.is_empty() {
        Err(ValidationError::empty_field(index, field))
    } else {
        Ok(())
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
