use super::{open_pipeline, print_document, print_json};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use nebula_editor::EditOutcome;

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Page to edit (defaults to the configured page)
    #[arg(short, long)]
    pub page: Option<String>,

    /// Print the resulting page as JSON
    #[arg(long)]
    pub json: bool,

    /// Command words, e.g. `add feature to Pro: Unlimited Sites`
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

pub fn edit(args: EditArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let page_id = config.page_or_default(args.page.as_deref());
    let command = args.command.join(" ");

    let mut pipeline = open_pipeline(&config, cwd)?;
    let outcome = pipeline.apply_command(page_id, &command)?;

    if args.json {
        return print_json(outcome.document());
    }

    match &outcome {
        EditOutcome::Applied { entry_id, note, .. } => {
            println!("{} {} {}", "✓".green(), note, format!("({})", entry_id).dimmed());
        }
        EditOutcome::Rejected { note, .. } => {
            println!("{} {}", "⚠️".yellow(), note.yellow());
        }
    }
    println!();
    print_document(page_id, outcome.document());

    Ok(())
}
