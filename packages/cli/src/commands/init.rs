use super::{open_pipeline, print_document};
use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use nebula_blocks::{validate, Document};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Page to create (defaults to the configured page)
    #[arg(short, long)]
    pub page: Option<String>,

    /// JSON file holding the initial block list
    #[arg(long)]
    pub from: Option<PathBuf>,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    println!("{}", "📝 Initializing Nebula page...".bright_blue().bold());

    let config = if config_path.exists() && !args.force {
        println!("  {} Using existing {}", "✓".green(), DEFAULT_CONFIG_NAME);
        Config::load(cwd)?
    } else {
        let config = Config::default();
        fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
        println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
        config
    };

    let document = match &args.from {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Cannot read {}", path.display()))?;
            let value: serde_json::Value = serde_json::from_str(&content)
                .with_context(|| format!("{} is not valid JSON", path.display()))?;
            validate(&value).with_context(|| format!("{} is not a valid page", path.display()))?
        }
        None => Document::new(),
    };

    let page_id = config.page_or_default(args.page.as_deref());
    let mut pipeline = open_pipeline(&config, cwd)?;
    pipeline.create_page(page_id, &document)?;

    println!("  {} Created page {}", "✓".green(), page_id.bright_white());
    println!();
    print_document(page_id, &document);
    println!();
    println!("Next steps:");
    println!("  1. Run: nebula edit add hero");
    println!("  2. Run: nebula edit add plan Basic $9/mo");
    println!("  3. Run: nebula undo");

    Ok(())
}
