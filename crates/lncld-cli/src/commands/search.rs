//! Search command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use lncld_core::{Page, Table};

use crate::cli::ConnectionArgs;
use crate::{config, output};

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Keyword; a single word is matched as a phrase
    pub keyword: String,

    /// Extra query fragment ANDed onto the search, e.g. 'genre:drama'
    #[arg(long)]
    pub genre: Option<String>,

    /// Zero-based page number
    #[arg(long, default_value_t = 0)]
    pub page: u32,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: SearchArgs, connection: &ConnectionArgs) -> Result<()> {
    let table = config::table(connection)?;

    let results = table
        .full_text_search(&args.keyword, args.genre.as_deref(), Page::new(args.page))
        .await
        .context("Search failed")?;

    if results.is_empty() {
        eprintln!("{}", "No matches.".dimmed());
        return Ok(());
    }

    output::outcomes(&results.records, args.pretty)?;
    Ok(())
}
