use super::{open_pipeline, print_document, print_json};
use crate::config::Config;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Page to print (defaults to the configured page)
    #[arg(short, long)]
    pub page: Option<String>,

    /// Print the block list as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn show(args: ShowArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let page_id = config.page_or_default(args.page.as_deref());
    let document = open_pipeline(&config, cwd)?.document(page_id)?;

    if args.json {
        print_json(&document)
    } else {
        print_document(page_id, &document);
        Ok(())
    }
}
