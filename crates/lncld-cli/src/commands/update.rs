//! Update command implementation.

use anyhow::{Context, Result};
use clap::Args;
use serde::Deserialize;
use serde_json::Value;

use lncld_core::{ObjectId, Patch, Table};

use crate::cli::ConnectionArgs;
use crate::commands::read_json_array;
use crate::{config, output};

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// JSON file holding an array of {"objectId": ..., "body": {...}} (use - for stdin)
    #[arg(long, default_value = "-")]
    pub json: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PatchItem {
    object_id: ObjectId,
    body: Value,
}

pub async fn run(args: UpdateArgs, connection: &ConnectionArgs) -> Result<()> {
    let patches = parse_patches(read_json_array(&args.json)?)?;
    let table = config::table(connection)?;

    let results = table
        .batch_update(&patches)
        .await
        .context("Failed to update records")?;

    let failed = output::outcomes(&results, false)?;
    output::summary("Updated", results.len(), failed);
    Ok(())
}

fn parse_patches(items: Vec<Value>) -> Result<Vec<Patch>> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let item: PatchItem = serde_json::from_value(item)
                .with_context(|| format!("Invalid patch at index {}", index))?;
            Ok(Patch::new(item.object_id, item.body))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_patches_in_order() {
        let patches = parse_patches(vec![
            json!({"objectId": "o1", "body": {"title": "a"}}),
            json!({"objectId": "o2", "body": {"title": "b"}}),
        ])
        .unwrap();
        assert_eq!(patches[0].object_id.as_str(), "o1");
        assert_eq!(patches[1].body, json!({"title": "b"}));
    }

    #[test]
    fn reports_bad_patch_index() {
        let err = parse_patches(vec![
            json!({"objectId": "o1", "body": {}}),
            json!({"objectId": "../x", "body": {}}),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("index 1"));
    }
}
