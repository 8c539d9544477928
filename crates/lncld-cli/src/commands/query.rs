//! Query command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde_json::Value;

use lncld_core::{Page, Table};

use crate::cli::ConnectionArgs;
use crate::{config, output};

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Filter document as JSON, e.g. '{"genre": "drama"}'
    #[arg(long = "where", value_name = "JSON")]
    pub filter: String,

    /// Zero-based page number
    #[arg(long, default_value_t = 0)]
    pub page: u32,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: QueryArgs, connection: &ConnectionArgs) -> Result<()> {
    let filter: Value = serde_json::from_str(&args.filter).context("Invalid --where JSON")?;
    let table = config::table(connection)?;

    let page = table
        .query_by_where(&filter, Page::new(args.page))
        .await
        .context("Failed to query records")?;

    if page.is_empty() {
        eprintln!("{}", "No records found.".dimmed());
        return Ok(());
    }

    for record in &page.records {
        output::json(record, args.pretty)?;
    }
    Ok(())
}
