//! Get command implementation.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use lncld_core::{ObjectId, Table};

use crate::cli::ConnectionArgs;
use crate::{config, output};

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Application-level `id` values; numbers and other JSON literals are
    /// matched as such, anything else as a string
    #[arg(
        long = "id",
        value_name = "ID",
        num_args = 1..,
        required_unless_present = "object_ids",
        conflicts_with = "object_ids"
    )]
    pub ids: Vec<String>,

    /// Server-assigned object ids
    #[arg(long = "object-id", value_name = "OBJECT_ID", num_args = 1..)]
    pub object_ids: Vec<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: GetArgs, connection: &ConnectionArgs) -> Result<()> {
    let table = config::table(connection)?;

    if !args.ids.is_empty() {
        let ids: Vec<Value> = args.ids.iter().map(|raw| parse_id(raw)).collect();
        let results = table
            .query_by_ids(&ids)
            .await
            .context("Failed to fetch records")?;
        output::outcomes(&results, args.pretty)?;
    } else {
        let object_ids = args
            .object_ids
            .iter()
            .map(|raw| ObjectId::new(raw.as_str()))
            .collect::<Result<Vec<_>, _>>()
            .context("Invalid object id")?;
        let results = table
            .query_by_object_ids(&object_ids)
            .await
            .context("Failed to fetch records")?;
        output::outcomes(&results, args.pretty)?;
    }
    Ok(())
}

/// Interpret a command-line id as a JSON literal, falling back to a string.
fn parse_id(raw: &str) -> Value {
    match serde_json::from_str::<Value>(raw) {
        Ok(value @ (Value::Number(_) | Value::String(_) | Value::Bool(_))) => value,
        _ => Value::String(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_ids_stay_numeric() {
        assert_eq!(parse_id("42"), json!(42));
        assert_eq!(parse_id("\"42\""), json!("42"));
    }

    #[test]
    fn plain_words_are_strings() {
        assert_eq!(parse_id("v-17"), json!("v-17"));
        assert_eq!(parse_id("{\"a\": 1}"), json!("{\"a\": 1}"));
    }
}
