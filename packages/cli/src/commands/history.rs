use super::{open_pipeline, print_document, print_json};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use nebula_editor::{HistoryStep, HistoryState};

#[derive(Debug, Args)]
pub struct StepArgs {
    /// Page to step (defaults to the configured page)
    #[arg(short, long)]
    pub page: Option<String>,

    /// Print the resulting page as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Page to inspect (defaults to the configured page)
    #[arg(short, long)]
    pub page: Option<String>,

    /// Maximum entries to list (defaults to historyLimit)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Print pointers and entries as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn undo(args: StepArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let page_id = config.page_or_default(args.page.as_deref());
    let step = open_pipeline(&config, cwd)?.undo(page_id)?;
    report_step("Undo applied", page_id, &step, args.json)
}

pub fn redo(args: StepArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let page_id = config.page_or_default(args.page.as_deref());
    let step = open_pipeline(&config, cwd)?.redo(page_id)?;
    report_step("Redo applied", page_id, &step, args.json)
}

fn report_step(applied: &str, page_id: &str, step: &HistoryStep, json: bool) -> Result<()> {
    match step {
        HistoryStep::Restored { document, entry } => {
            if json {
                return print_json(document);
            }
            println!("{} {} {}", "✓".green(), applied, format!("({})", entry).dimmed());
            println!();
            print_document(page_id, document);
        }
        HistoryStep::NothingToUndo | HistoryStep::NothingToRedo => {
            println!("{} {}", "⚠️".yellow(), step.note().yellow());
        }
    }
    Ok(())
}

pub fn history(args: HistoryArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let page_id = config.page_or_default(args.page.as_deref());
    let limit = args.limit.unwrap_or(config.history_limit);
    let log = open_pipeline(&config, cwd)?.history(page_id, limit)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&log)?);
        return Ok(());
    }

    let state = match log.pointers.state() {
        HistoryState::Empty => "no edits yet".dimmed(),
        HistoryState::AtHead => "at latest edit".green(),
        HistoryState::SteppedBack => "redo available".yellow(),
    };
    println!("🕘 {} {}", page_id.bright_white().bold(), state);

    let head = log
        .pointers
        .history_head
        .map_or_else(|| "-".to_string(), |id| id.to_string());
    let redo = log
        .pointers
        .redo_head
        .map_or_else(|| "-".to_string(), |id| id.to_string());
    println!("   head: {}", head);
    println!("   redo: {}", redo);
    println!();

    if log.entries.is_empty() {
        println!("   {}", "Nothing to undo".dimmed());
    }
    for entry in &log.entries {
        println!(
            "   {} {} {}",
            entry.created_at.format("%Y-%m-%d %H:%M:%S").to_string().dimmed(),
            entry.id.to_string().cyan(),
            entry.description.as_deref().unwrap_or("(no description)")
        );
    }

    Ok(())
}
