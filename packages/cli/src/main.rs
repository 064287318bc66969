mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    edit, history, init, redo, show, undo, EditArgs, HistoryArgs, InitArgs, ShowArgs, StepArgs,
};
use tracing_subscriber::EnvFilter;

/// Nebula CLI - Edit landing pages with plain commands
#[derive(Parser, Debug)]
#[command(name = "nebula")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the config, the store and an initial page
    Init(InitArgs),

    /// Apply a command such as `add plan Basic $9/mo`
    Edit(EditArgs),

    /// Step back over the most recent edit
    Undo(StepArgs),

    /// Re-apply the edit the last undo stepped over
    Redo(StepArgs),

    /// Print the current page
    Show(ShowArgs),

    /// List recent edits, newest first
    History(HistoryArgs),
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| {
            let cwd = cwd.display().to_string();
            match cli.command {
                Command::Init(args) => init(args, &cwd),
                Command::Edit(args) => edit(args, &cwd),
                Command::Undo(args) => undo(args, &cwd),
                Command::Redo(args) => redo(args, &cwd),
                Command::Show(args) => show(args, &cwd),
                Command::History(args) => history(args, &cwd),
            }
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
