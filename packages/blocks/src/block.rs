//! Block variants and their property sets.
//!
//! Blocks are stored as `{"type": "<Kind>", "props": {...}}`. Fields that
//! carry a default are filled in when absent; required fields have no
//! default and fail deserialization when missing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One typed section of a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "props")]
pub enum Block {
    Hero(HeroProps),
    RichText(RichTextProps),
    Pricing(PricingProps),
    Features3(Features3Props),
}

impl Block {
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Hero(_) => BlockKind::Hero,
            Block::RichText(_) => BlockKind::RichText,
            Block::Pricing(_) => BlockKind::Pricing,
            Block::Features3(_) => BlockKind::Features3,
        }
    }
}

/// Discriminator of a [`Block`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    Hero,
    RichText,
    Pricing,
    Features3,
}

impl BlockKind {
    /// Name used when talking to the user about this kind of block.
    pub fn label(self) -> &'static str {
        match self {
            BlockKind::Hero => "Hero",
            BlockKind::RichText => "RichText",
            BlockKind::Pricing => "Pricing",
            BlockKind::Features3 => "Features",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            BlockKind::Hero => "Hero",
            BlockKind::RichText => "RichText",
            BlockKind::Pricing => "Pricing",
            BlockKind::Features3 => "Features3",
        };
        f.write_str(tag)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroProps {
    #[serde(default = "default_hero_headline")]
    pub headline: String,
    #[serde(default = "default_hero_subheadline")]
    pub subheadline: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichTextProps {
    #[serde(default = "default_rich_text_content")]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingProps {
    #[serde(default = "default_pricing_headline")]
    pub headline: String,
    #[serde(default = "default_pricing_subheadline")]
    pub subheadline: String,
    #[serde(default)]
    pub plans: Vec<Plan>,
}

/// A single plan inside a Pricing block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub name: String,
    /// Free-form price label, e.g. `$19/mo`
    pub price: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default = "default_cta_label")]
    pub cta_label: String,
}

impl Plan {
    /// A plan with no features and the default call-to-action label.
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            features: Vec::new(),
            cta_label: default_cta_label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Features3Props {
    #[serde(default = "default_features_headline")]
    pub headline: String,
    #[serde(default = "default_features_subheadline")]
    pub subheadline: String,
    #[serde(default)]
    pub items: Vec<FeatureItem>,
}

/// One card inside a Features3 block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureItem {
    #[serde(default = "default_feature_icon")]
    pub icon: String,
    pub title: String,
    #[serde(default)]
    pub desc: String,
}

pub const DEFAULT_CTA_LABEL: &str = "Get started";
pub const DEFAULT_FEATURE_ICON: &str = "✨";

fn default_hero_headline() -> String {
    "Hero headline".to_string()
}

fn default_hero_subheadline() -> String {
    "Subheadline".to_string()
}

fn default_rich_text_content() -> String {
    "Rich text…".to_string()
}

fn default_pricing_headline() -> String {
    "Pricing".to_string()
}

fn default_pricing_subheadline() -> String {
    "Choose your plan".to_string()
}

fn default_cta_label() -> String {
    DEFAULT_CTA_LABEL.to_string()
}

fn default_features_headline() -> String {
    "Features".to_string()
}

fn default_features_subheadline() -> String {
    "Why people love this".to_string()
}

fn default_feature_icon() -> String {
    DEFAULT_FEATURE_ICON.to_string()
}
