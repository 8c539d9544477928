//! Subcommand implementations.

mod create;
mod get;
mod latest;
mod query;
mod search;
mod split_backup;
mod update;

use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::Subcommand;
use serde_json::Value;

use lncld_core::record::kind_of;

use crate::cli::ConnectionArgs;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List one page of records matching a filter, newest first
    Query(query::QueryArgs),

    /// List the most recently uploaded records
    Latest(latest::LatestArgs),

    /// Fetch records by application id or object id
    Get(get::GetArgs),

    /// Full-text search over title and subtitle
    Search(search::SearchArgs),

    /// Create one record per item of a JSON array
    Create(create::CreateArgs),

    /// Apply partial updates from a JSON array of {objectId, body}
    Update(update::UpdateArgs),

    /// Split a line-oriented backup export into import-sized chunks
    SplitBackup(split_backup::SplitBackupArgs),
}

pub async fn handle(cmd: Commands, connection: &ConnectionArgs) -> Result<()> {
    match cmd {
        Commands::Query(args) => query::run(args, connection).await,
        Commands::Latest(args) => latest::run(args, connection).await,
        Commands::Get(args) => get::run(args, connection).await,
        Commands::Search(args) => search::run(args, connection).await,
        Commands::Create(args) => create::run(args, connection).await,
        Commands::Update(args) => update::run(args, connection).await,
        Commands::SplitBackup(args) => split_backup::run(args),
    }
}

/// Read a JSON document from a file, or stdin when `path` is `-`.
fn read_json(path: &str) -> Result<Value> {
    if path == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
        serde_json::from_str(&buf).context("Invalid JSON from stdin")
    } else {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read JSON file {}", path))?;
        serde_json::from_str(&content).context("Invalid JSON in file")
    }
}

/// Read a JSON array of items.
fn read_json_array(path: &str) -> Result<Vec<Value>> {
    match read_json(path)? {
        Value::Array(items) => Ok(items),
        other => anyhow::bail!("Expected a JSON array, got {}", kind_of(&other)),
    }
}
