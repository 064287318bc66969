//! # Nebula Blocks
//!
//! Block document model for Nebula pages.
//!
//! A page is an ordered [`Document`] of typed [`Block`]s (Hero, RichText,
//! Pricing, Features3). All page data, from storage or from an edit, is
//! funneled through [`validate`], which normalizes defaults and rejects the
//! whole sequence if any block is malformed.
//!
//! ```rust,ignore
//! use nebula_blocks::validate;
//!
//! let doc = validate(&serde_json::json!([
//!     { "type": "Hero", "props": { "headline": "Welcome" } }
//! ]))?;
//! assert_eq!(doc.len(), 1);
//! ```

mod block;
mod defaults;
mod document;
mod error;
mod validator;

pub use block::{
    Block, BlockKind, FeatureItem, Features3Props, HeroProps, Plan, PricingProps, RichTextProps,
    DEFAULT_CTA_LABEL, DEFAULT_FEATURE_ICON,
};
pub use defaults::{
    default_block, default_features3, default_hero, default_pricing, default_rich_text,
};
pub use document::Document;
pub use error::{ValidationError, ValidationResult};
pub use validator::validate;
