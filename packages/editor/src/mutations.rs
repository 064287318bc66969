//! # Page Mutations
//!
//! Typed operations on a page [`Document`].
//!
//! ## Design Principles
//!
//! 1. **Pure**: `apply` takes the current document by reference and returns
//!    a new one; the input is never modified
//! 2. **Text-free**: no parsing happens here, see the interpreter for that
//! 3. **Explicit targets**: edits go to the *last* block of the required
//!    kind; a missing block is an error, never created implicitly
//!
//! ## Mutation Semantics
//!
//! ### AppendBlock
//! - Adds the seeded default shape of the kind at the end of the page
//!
//! ### SetField
//! - Atomic replacement of one text field on the last block of a kind
//! - Fails if the kind does not carry the field
//!
//! ### AddPlan / AddFeatureToPlan
//! - Target the last Pricing block
//! - Plan lookup is a case-insensitive exact name match
//!
//! ### AddFeatureCard
//! - Targets the last Features3 block

use nebula_blocks::{default_block, Block, BlockKind, Document, FeatureItem, Plan};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Semantic page edits
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Append the default block of `kind` to the end of the page
    AppendBlock { kind: BlockKind },

    /// Replace a text field on the last block of `kind`
    SetField {
        kind: BlockKind,
        field: TextField,
        value: String,
    },

    /// Add a plan to the last Pricing block
    AddPlan { name: String, price: String },

    /// Add a feature line to a named plan in the last Pricing block
    AddFeatureToPlan { plan: String, feature: String },

    /// Add a card to the last Features3 block
    AddFeatureCard {
        icon: String,
        title: String,
        desc: String,
    },
}

/// Text fields addressable by [`Mutation::SetField`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TextField {
    Headline,
    Subheadline,
    Content,
}

impl TextField {
    /// Whether blocks of `kind` carry this field
    pub fn applies_to(self, kind: BlockKind) -> bool {
        match (kind, self) {
            (BlockKind::RichText, TextField::Content) => true,
            (BlockKind::RichText, _) => false,
            (_, TextField::Content) => false,
            _ => true,
        }
    }
}

impl fmt::Display for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TextField::Headline => "headline",
            TextField::Subheadline => "subheadline",
            TextField::Content => "content",
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("No {} block found", .0.label())]
    BlockNotFound(BlockKind),

    #[error("Plan \"{0}\" not found")]
    PlanNotFound(String),

    #[error("{kind} blocks have no {field} field")]
    NoSuchField { kind: BlockKind, field: TextField },
}

impl Mutation {
    /// Check that this mutation can be applied to the document
    pub fn validate(&self, doc: &Document) -> Result<(), MutationError> {
        let target = match self {
            Mutation::AppendBlock { .. } => return Ok(()),
            Mutation::SetField { kind, field, .. } => {
                if !field.applies_to(*kind) {
                    return Err(MutationError::NoSuchField {
                        kind: *kind,
                        field: *field,
                    });
                }
                *kind
            }
            Mutation::AddPlan { .. } | Mutation::AddFeatureToPlan { .. } => BlockKind::Pricing,
            Mutation::AddFeatureCard { .. } => BlockKind::Features3,
        };

        doc.last_index_of(target)
            .map(|_| ())
            .ok_or(MutationError::BlockNotFound(target))
    }

    /// Apply to `doc`, returning the edited copy
    pub fn apply(&self, doc: &Document) -> Result<Document, MutationError> {
        self.validate(doc)?;

        match self {
            Mutation::AppendBlock { kind } => Ok(doc.with_block_appended(default_block(*kind))),

            Mutation::SetField { kind, field, value } => {
                edit_last(doc, *kind, |block| set_field(block, *field, value))
            }

            Mutation::AddPlan { name, price } => edit_last(doc, BlockKind::Pricing, |block| {
                let plans = plans_mut(block)?;
                plans.push(Plan::new(name.as_str(), price.as_str()));
                Ok(())
            }),

            Mutation::AddFeatureToPlan { plan, feature } => {
                edit_last(doc, BlockKind::Pricing, |block| {
                    let wanted = plan.to_lowercase();
                    let target = plans_mut(block)?
                        .iter_mut()
                        .find(|p| p.name.to_lowercase() == wanted)
                        .ok_or_else(|| MutationError::PlanNotFound(plan.clone()))?;
                    target.features.push(feature.clone());
                    Ok(())
                })
            }

            Mutation::AddFeatureCard { icon, title, desc } => {
                edit_last(doc, BlockKind::Features3, |block| {
                    items_mut(block)?.push(FeatureItem {
                        icon: icon.clone(),
                        title: title.clone(),
                        desc: desc.clone(),
                    });
                    Ok(())
                })
            }
        }
    }

    /// Short human-readable summary of a successful application
    pub fn note(&self) -> String {
        match self {
            Mutation::AppendBlock { kind } => format!("{} added", kind),
            Mutation::SetField { kind, field, .. } => format!("{} {} updated", kind.label(), field),
            Mutation::AddPlan { name, .. } => format!("Plan \"{}\" added", name),
            Mutation::AddFeatureToPlan { plan, .. } => format!("Feature added to {}", plan),
            Mutation::AddFeatureCard { title, .. } => format!("Feature card \"{}\" added", title),
        }
    }
}

/// Clone the last block of `kind`, edit the clone, and splice it into a new document.
fn edit_last<F>(doc: &Document, kind: BlockKind, edit: F) -> Result<Document, MutationError>
where
    F: FnOnce(&mut Block) -> Result<(), MutationError>,
{
    let index = doc
        .last_index_of(kind)
        .ok_or(MutationError::BlockNotFound(kind))?;

    let mut block = doc.blocks()[index].clone();
    edit(&mut block)?;

    doc.with_block_replaced(index, block)
        .ok_or(MutationError::BlockNotFound(kind))
}

fn plans_mut(block: &mut Block) -> Result<&mut Vec<Plan>, MutationError> {
    match block {
        Block::Pricing(props) => Ok(&mut props.plans),
        _ => Err(MutationError::BlockNotFound(BlockKind::Pricing)),
    }
}

fn items_mut(block: &mut Block) -> Result<&mut Vec<FeatureItem>, MutationError> {
    match block {
        Block::Features3(props) => Ok(&mut props.items),
        _ => Err(MutationError::BlockNotFound(BlockKind::Features3)),
    }
}

fn set_field(block: &mut Block, field: TextField, value: &str) -> Result<(), MutationError> {
    let slot = match (block, field) {
        (Block::Hero(p), TextField::Headline) => &mut p.headline,
        (Block::Hero(p), TextField::Subheadline) => &mut p.subheadline,
        (Block::RichText(p), TextField::Content) => &mut p.content,
        (Block::Pricing(p), TextField::Headline) => &mut p.headline,
        (Block::Pricing(p), TextField::Subheadline) => &mut p.subheadline,
        (Block::Features3(p), TextField::Headline) => &mut p.headline,
        (Block::Features3(p), TextField::Subheadline) => &mut p.subheadline,
        (block, field) => {
            return Err(MutationError::NoSuchField {
                kind: block.kind(),
                field,
            })
        }
    };
    *slot = value.to_string();
    Ok(())
}
