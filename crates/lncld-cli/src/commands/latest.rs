//! Latest command implementation.

use anyhow::{Context, Result};
use clap::Args;

use lncld_core::Table;

use crate::cli::ConnectionArgs;
use crate::{config, output};

#[derive(Args, Debug)]
pub struct LatestArgs {
    /// Number of records to fetch (at most 1000)
    #[arg(long, default_value_t = 1000)]
    pub limit: u32,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: LatestArgs, connection: &ConnectionArgs) -> Result<()> {
    let table = config::table(connection)?;

    let page = table
        .latest(args.limit)
        .await
        .context("Failed to fetch latest records")?;

    for record in &page.records {
        output::json(record, args.pretty)?;
    }
    Ok(())
}
