//! Default shapes used when a block is appended to a page.

use crate::block::{
    Block, BlockKind, FeatureItem, Features3Props, HeroProps, Plan, PricingProps, RichTextProps,
};

/// Build the seeded block for `kind`
pub fn default_block(kind: BlockKind) -> Block {
    match kind {
        BlockKind::Hero => default_hero(),
        BlockKind::RichText => default_rich_text(),
        BlockKind::Pricing => default_pricing(),
        BlockKind::Features3 => default_features3(),
    }
}

pub fn default_hero() -> Block {
    Block::Hero(HeroProps {
        headline: "New Hero".to_string(),
        subheadline: "Describe your product here".to_string(),
    })
}

pub fn default_rich_text() -> Block {
    Block::RichText(RichTextProps {
        content: "New paragraph...".to_string(),
    })
}

/// Pricing block seeded with Starter, Pro and Agency plans
pub fn default_pricing() -> Block {
    Block::Pricing(PricingProps {
        headline: "Simple, transparent pricing".to_string(),
        subheadline: "Pick the plan that fits you".to_string(),
        plans: vec![
            seeded_plan("Starter", "$19/mo", &["1 site", "Basic support"]),
            seeded_plan("Pro", "$49/mo", &["3 sites", "Priority support"]),
            seeded_plan("Agency", "$99/mo", &["Unlimited", "White-label"]),
        ],
    })
}

/// Features3 block seeded with two cards
pub fn default_features3() -> Block {
    Block::Features3(Features3Props {
        headline: "Features".to_string(),
        subheadline: "Why people love this".to_string(),
        items: vec![
            FeatureItem {
                icon: "⚓".to_string(),
                title: "Anchored Stability".to_string(),
                desc: "Hold fast with reliable tension.".to_string(),
            },
            FeatureItem {
                icon: "🛡️".to_string(),
                title: "Marine-Grade".to_string(),
                desc: "Built to last in harsh conditions.".to_string(),
            },
        ],
    })
}

fn seeded_plan(name: &str, price: &str, features: &[&str]) -> Plan {
    Plan {
        name: name.to_string(),
        price: price.to_string(),
        features: features.iter().map(|f| f.to_string()).collect(),
        cta_label: format!("Choose {}", name),
    }
}
