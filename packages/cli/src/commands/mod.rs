pub mod edit;
pub mod history;
pub mod init;
pub mod show;

pub use edit::{edit, EditArgs};
pub use history::{history, redo, undo, HistoryArgs, StepArgs};
pub use init::{init, InitArgs};
pub use show::{show, ShowArgs};

use crate::config::Config;
use anyhow::{Context, Result};
use colored::Colorize;
use nebula_blocks::{Block, Document};
use nebula_editor::{JsonFileStore, Pipeline};

/// Open the configured store under `cwd`
fn open_pipeline(config: &Config, cwd: &str) -> Result<Pipeline<JsonFileStore>> {
    let root = config.get_store_dir(cwd);
    let store = JsonFileStore::open(&root)
        .with_context(|| format!("Cannot open store at {}", root.display()))?;
    Ok(Pipeline::new(store))
}

fn print_json(document: &Document) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(document)?);
    Ok(())
}

/// One line per block, then its plans or cards
fn print_document(page_id: &str, document: &Document) {
    println!(
        "{} {} ({} blocks)",
        "📄".bright_blue(),
        page_id.bright_white().bold(),
        document.len()
    );

    for (index, block) in document.iter().enumerate() {
        let kind = block.kind().to_string();
        match block {
            Block::Hero(hero) => {
                println!("  {}. {} {}", index, kind.cyan(), hero.headline);
                println!("       {}", hero.subheadline.dimmed());
            }
            Block::RichText(text) => {
                println!("  {}. {} {}", index, kind.cyan(), text.content);
            }
            Block::Pricing(pricing) => {
                println!("  {}. {} {}", index, kind.cyan(), pricing.headline);
                for plan in &pricing.plans {
                    println!("       • {} {}", plan.name.bold(), plan.price.green());
                    for feature in &plan.features {
                        println!("         - {}", feature);
                    }
                }
            }
            Block::Features3(features) => {
                println!("  {}. {} {}", index, kind.cyan(), features.headline);
                for item in &features.items {
                    println!("       {} {} {}", item.icon, item.title.bold(), item.desc.dimmed());
                }
            }
        }
    }
}
