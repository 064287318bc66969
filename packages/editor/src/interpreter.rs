//! # Command Interpreter
//!
//! Maps short text commands onto [`Mutation`]s.
//!
//! Matching is deterministic: the command is trimmed, compared against an
//! ordered list of ASCII case-insensitive prefixes, and the first rule that
//! matches decides the outcome. Values are sliced out of the original text
//! so user casing survives.
//!
//! ```text
//! add hero | add text | add paragraph | add richtext | add pricing
//! add feature card <icon> | <title> | <desc>
//! add feature card <title> | <desc>
//! add feature to <plan>: <feature>
//! add features
//! add plan <name> <price>
//! set (pricing|features|hero) (headline|subheadline) to <value>
//! set text to <value>
//! ```

use crate::mutations::{Mutation, MutationError, TextField};
use nebula_blocks::{BlockKind, Document, DEFAULT_FEATURE_ICON};
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::debug;

pub const PLAN_USAGE: &str = "Couldn't parse plan. Try: add plan Basic $9/mo";
pub const FEATURE_USAGE: &str = "Try: add feature to Pro: Unlimited Sites";
pub const FEATURE_CARD_USAGE: &str =
    "Try: add feature card ⚓ | Anchored Stability | Holds under tension";

/// Why a command produced no edit
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error("Command not recognized")]
    NotRecognized,

    /// The command matched a rule but its arguments did not parse
    #[error("{0}")]
    Usage(&'static str),

    #[error(transparent)]
    Mutation(#[from] MutationError),
}

/// Result of interpreting a command against a document
#[derive(Debug, Clone, PartialEq)]
pub enum Interpretation {
    Applied {
        document: Document,
        mutation: Mutation,
        note: String,
    },
    Rejected {
        note: String,
        error: CommandError,
    },
}

impl Interpretation {
    pub fn is_success(&self) -> bool {
        matches!(self, Interpretation::Applied { .. })
    }

    /// Note shown to the user, for both outcomes
    pub fn note(&self) -> String {
        match self {
            Interpretation::Applied { note, .. } | Interpretation::Rejected { note, .. } => {
                note.clone()
            }
        }
    }

    pub fn document(&self) -> Option<&Document> {
        match self {
            Interpretation::Applied { document, .. } => Some(document),
            Interpretation::Rejected { .. } => None,
        }
    }
}

/// Prefixes that append a default block
const APPEND_RULES: &[(&str, BlockKind)] = &[
    ("add hero", BlockKind::Hero),
    ("add text", BlockKind::RichText),
    ("add paragraph", BlockKind::RichText),
    ("add richtext", BlockKind::RichText),
    ("add pricing", BlockKind::Pricing),
];

/// Prefixes that replace a text field; the remainder is the value
const SET_FIELD_RULES: &[(&str, BlockKind, TextField)] = &[
    ("set pricing headline to ", BlockKind::Pricing, TextField::Headline),
    ("set pricing subheadline to ", BlockKind::Pricing, TextField::Subheadline),
    ("set features headline to ", BlockKind::Features3, TextField::Headline),
    ("set features subheadline to ", BlockKind::Features3, TextField::Subheadline),
    ("set hero headline to ", BlockKind::Hero, TextField::Headline),
    ("set hero subheadline to ", BlockKind::Hero, TextField::Subheadline),
    ("set text to ", BlockKind::RichText, TextField::Content),
];

/// Parse a command into a mutation without looking at any document
pub fn parse_command(text: &str) -> Result<Mutation, CommandError> {
    let command = text.trim();

    for (prefix, kind) in APPEND_RULES {
        if strip_prefix_ci(command, prefix).is_some() {
            return Ok(Mutation::AppendBlock { kind: *kind });
        }
    }

    // The two-word "add feature ..." forms must win over "add features".
    if let Some(rest) = strip_prefix_ci(command, "add feature card ") {
        return parse_feature_card(rest);
    }
    if let Some(rest) = strip_prefix_ci(command, "add feature to ") {
        return parse_feature_to_plan(rest);
    }
    if strip_prefix_ci(command, "add features").is_some() {
        return Ok(Mutation::AppendBlock {
            kind: BlockKind::Features3,
        });
    }

    if let Some(rest) = strip_prefix_ci(command, "add plan ") {
        return parse_plan(rest);
    }

    for (prefix, kind, field) in SET_FIELD_RULES {
        if let Some(value) = strip_prefix_ci(command, prefix) {
            return Ok(Mutation::SetField {
                kind: *kind,
                field: *field,
                value: value.trim().to_string(),
            });
        }
    }

    Err(CommandError::NotRecognized)
}

/// Parse `text` and apply it to `document`
pub fn interpret(document: &Document, text: &str) -> Interpretation {
    let outcome = parse_command(text).and_then(|mutation| {
        let next = mutation.apply(document)?;
        Ok((mutation, next))
    });

    match outcome {
        Ok((mutation, next)) => {
            let note = mutation.note();
            debug!(command = %text.trim(), note = %note, blocks = next.len(), "Command applied");
            Interpretation::Applied {
                document: next,
                mutation,
                note,
            }
        }
        Err(error) => {
            debug!(command = %text.trim(), error = %error, "Command rejected");
            Interpretation::Rejected {
                note: error.to_string(),
                error,
            }
        }
    }
}

fn parse_plan(rest: &str) -> Result<Mutation, CommandError> {
    let captures = plan_pattern()
        .captures(rest.trim())
        .ok_or(CommandError::Usage(PLAN_USAGE))?;

    let name = captures.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
    let price = captures.get(2).map(|m| m.as_str().trim()).unwrap_or_default();
    if name.is_empty() || price.is_empty() {
        return Err(CommandError::Usage(PLAN_USAGE));
    }

    Ok(Mutation::AddPlan {
        name: name.to_string(),
        price: price.to_string(),
    })
}

fn parse_feature_to_plan(rest: &str) -> Result<Mutation, CommandError> {
    let (plan, feature) = rest
        .split_once(':')
        .map(|(p, f)| (p.trim(), f.trim()))
        .ok_or(CommandError::Usage(FEATURE_USAGE))?;

    if plan.is_empty() || feature.is_empty() {
        return Err(CommandError::Usage(FEATURE_USAGE));
    }

    Ok(Mutation::AddFeatureToPlan {
        plan: plan.to_string(),
        feature: feature.to_string(),
    })
}

fn parse_feature_card(rest: &str) -> Result<Mutation, CommandError> {
    let parts: Vec<&str> = rest.split('|').map(str::trim).collect();

    let (icon, title, desc) = match parts.as_slice() {
        [icon, title, desc] => (*icon, *title, *desc),
        [title, desc] => (DEFAULT_FEATURE_ICON, *title, *desc),
        _ => return Err(CommandError::Usage(FEATURE_CARD_USAGE)),
    };
    if title.is_empty() {
        return Err(CommandError::Usage(FEATURE_CARD_USAGE));
    }

    Ok(Mutation::AddFeatureCard {
        icon: icon.to_string(),
        title: title.to_string(),
        desc: desc.to_string(),
    })
}

/// Name, whitespace, then a trailing price token such as `$9/mo` or `29`
fn plan_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(.*)\s+(\$?[0-9]+[^ ]*)$").expect("plan pattern is valid"))
}

/// ASCII case-insensitive `strip_prefix`
fn strip_prefix_ci<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&text[prefix.len()..])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nebula_blocks::{default_features3, default_pricing, Block};

    #[test]
    fn test_block_commands() {
        let cases = [
            ("add hero", BlockKind::Hero),
            ("Add Text", BlockKind::RichText),
            ("add paragraph please", BlockKind::RichText),
            ("ADD RICHTEXT", BlockKind::RichText),
            ("  add pricing  ", BlockKind::Pricing),
            ("add features", BlockKind::Features3),
        ];

        for (text, kind) in cases {
            assert_eq!(
                parse_command(text),
                Ok(Mutation::AppendBlock { kind }),
                "command: {}",
                text
            );
        }
    }

    #[test]
    fn test_unrecognized() {
        assert_eq!(parse_command("delete everything"), Err(CommandError::NotRecognized));
        assert_eq!(parse_command(""), Err(CommandError::NotRecognized));
        // value-taking prefixes need a value
        assert_eq!(
            parse_command("set pricing headline to"),
            Err(CommandError::NotRecognized)
        );
        assert_eq!(parse_command("add plan"), Err(CommandError::NotRecognized));
    }

    #[test]
    fn test_set_field_keeps_value_casing() {
        assert_eq!(
            parse_command("SET Pricing Headline TO Plans For Every Crew"),
            Ok(Mutation::SetField {
                kind: BlockKind::Pricing,
                field: TextField::Headline,
                value: "Plans For Every Crew".to_string(),
            })
        );
        assert_eq!(
            parse_command("set features subheadline to   Built tough "),
            Ok(Mutation::SetField {
                kind: BlockKind::Features3,
                field: TextField::Subheadline,
                value: "Built tough".to_string(),
            })
        );
    }

    #[test]
    fn test_add_plan_parsing() {
        assert_eq!(
            parse_command("add plan Basic $9/mo"),
            Ok(Mutation::AddPlan {
                name: "Basic".to_string(),
                price: "$9/mo".to_string(),
            })
        );
        assert_eq!(
            parse_command("add plan Team of 10 $99"),
            Ok(Mutation::AddPlan {
                name: "Team of 10".to_string(),
                price: "$99".to_string(),
            })
        );
        assert_eq!(
            parse_command("add plan Hobby 5"),
            Ok(Mutation::AddPlan {
                name: "Hobby".to_string(),
                price: "5".to_string(),
            })
        );
        assert_eq!(parse_command("add plan Basic"), Err(CommandError::Usage(PLAN_USAGE)));
        assert_eq!(
            parse_command("add plan Basic free"),
            Err(CommandError::Usage(PLAN_USAGE))
        );
    }

    #[test]
    fn test_plan_price_needs_ascii_digits() {
        // Arabic-Indic nine
        assert_eq!(
            parse_command("add plan Basic \u{669}/mo"),
            Err(CommandError::Usage(PLAN_USAGE))
        );
        assert_eq!(
            parse_command("add plan Basic $\u{FF19}"),
            Err(CommandError::Usage(PLAN_USAGE))
        );
    }

    #[test]
    fn test_add_feature_to_plan_parsing() {
        assert_eq!(
            parse_command("add feature to Pro: Unlimited Sites"),
            Ok(Mutation::AddFeatureToPlan {
                plan: "Pro".to_string(),
                feature: "Unlimited Sites".to_string(),
            })
        );
        assert_eq!(
            parse_command("add feature to Pro: Support: 24/7"),
            Ok(Mutation::AddFeatureToPlan {
                plan: "Pro".to_string(),
                feature: "Support: 24/7".to_string(),
            })
        );
        assert_eq!(
            parse_command("add feature to Pro"),
            Err(CommandError::Usage(FEATURE_USAGE))
        );
        assert_eq!(
            parse_command("add feature to : something"),
            Err(CommandError::Usage(FEATURE_USAGE))
        );
        assert_eq!(
            parse_command("add feature to Pro:   "),
            Err(CommandError::Usage(FEATURE_USAGE))
        );
    }

    #[test]
    fn test_feature_card_parsing() {
        assert_eq!(
            parse_command("add feature card ⚓ | Anchored Stability | Holds under tension"),
            Ok(Mutation::AddFeatureCard {
                icon: "⚓".to_string(),
                title: "Anchored Stability".to_string(),
                desc: "Holds under tension".to_string(),
            })
        );
        assert_eq!(
            parse_command("add feature card Fast | Really fast"),
            Ok(Mutation::AddFeatureCard {
                icon: "✨".to_string(),
                title: "Fast".to_string(),
                desc: "Really fast".to_string(),
            })
        );
        assert_eq!(
            parse_command("add feature card just a title"),
            Err(CommandError::Usage(FEATURE_CARD_USAGE))
        );
        assert_eq!(
            parse_command("add feature card a | b | c | d"),
            Err(CommandError::Usage(FEATURE_CARD_USAGE))
        );
        assert_eq!(
            parse_command("add feature card ⚓ |  | desc"),
            Err(CommandError::Usage(FEATURE_CARD_USAGE))
        );
    }

    #[test]
    fn test_specific_feature_prefixes_win() {
        assert!(matches!(
            parse_command("add feature card A | B"),
            Ok(Mutation::AddFeatureCard { .. })
        ));
        assert!(matches!(
            parse_command("add feature to Pro: X"),
            Ok(Mutation::AddFeatureToPlan { .. })
        ));
        assert!(matches!(
            parse_command("add features section"),
            Ok(Mutation::AppendBlock {
                kind: BlockKind::Features3
            })
        ));
    }

    #[test]
    fn test_interpret_add_pricing_on_empty_page() {
        let result = interpret(&Document::new(), "add pricing");

        assert!(result.is_success());
        assert_eq!(result.note(), "Pricing added");
        let doc = result.document().unwrap();
        assert_eq!(doc.blocks(), &[default_pricing()]);
    }

    #[test]
    fn test_interpret_reports_missing_block() {
        let doc = Document::new();
        let result = interpret(
            &doc,
            "add feature card ⚓ | Anchored Stability | Holds under tension",
        );

        assert!(!result.is_success());
        assert_eq!(result.note(), "No Features block found");
        assert!(result.document().is_none());

        let Interpretation::Rejected { note, error } = result else {
            panic!("Expected rejection");
        };
        assert_eq!(note, error.to_string());
        assert_eq!(
            error,
            CommandError::Mutation(MutationError::BlockNotFound(BlockKind::Features3))
        );
    }

    #[test]
    fn test_usage_errors_come_before_block_lookup() {
        let result = interpret(&Document::new(), "add plan nonsense");
        assert_eq!(result.note(), PLAN_USAGE);
    }

    #[test]
    fn test_interpret_feature_card() {
        let doc = Document::from_blocks(vec![default_features3()]).unwrap();
        let result = interpret(&doc, "add feature card 🔧 | Tooling | Comes with a kit");

        assert_eq!(result.note(), "Feature card \"Tooling\" added");
        let Some(Block::Features3(props)) = result.document().map(|d| &d.blocks()[0]) else {
            panic!("Expected features block");
        };
        assert_eq!(props.items.len(), 3);
        assert_eq!(props.items[2].icon, "🔧");
    }

    #[test]
    fn test_strip_prefix_ci_on_multibyte_text() {
        assert_eq!(strip_prefix_ci("⚓⚓", "add"), None);
        assert_eq!(strip_prefix_ci("ADD x", "add "), Some("x"));
        assert_eq!(strip_prefix_ci("ad", "add"), None);
    }
}
