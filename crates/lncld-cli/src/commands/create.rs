//! Create command implementation.

use anyhow::{Context, Result};
use clap::Args;

use lncld_core::Table;

use crate::cli::ConnectionArgs;
use crate::commands::read_json_array;
use crate::{config, output};

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// JSON file holding an array of records (use - for stdin)
    #[arg(long, default_value = "-")]
    pub json: String,
}

pub async fn run(args: CreateArgs, connection: &ConnectionArgs) -> Result<()> {
    let items = read_json_array(&args.json)?;
    let table = config::table(connection)?;

    let results = table
        .batch_create(&items)
        .await
        .context("Failed to create records")?;

    let failed = output::outcomes(&results, false)?;
    output::summary("Created", results.len(), failed);
    Ok(())
}
