//! Configuration loading.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use tracing::debug;

use lncld_core::{ApiBase, Config, SessionToken};
use lncld_rest::RestTable;

use crate::cli::ConnectionArgs;

/// Values read from the JSON config file. Every field is optional; missing
/// ones must come from flags or the environment.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct FileConfig {
    app_id: Option<String>,
    app_key: Option<String>,
    table_name: Option<String>,
    write_user_session: Option<String>,
    api_base: Option<String>,
}

/// Get the default config file path.
fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "lncld").map(|dirs| dirs.config_dir().join("config.json"))
}

fn read_file_config(path: &Path) -> Result<FileConfig> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Invalid config file {}", path.display()))
}

/// Load the file layer. An explicit path must exist; the default may not.
fn load_file_config(explicit: Option<&Path>) -> Result<FileConfig> {
    match explicit {
        Some(path) => read_file_config(path),
        None => match default_config_path() {
            Some(path) if path.exists() => {
                debug!(path = %path.display(), "Using config file");
                read_file_config(&path)
            }
            _ => Ok(FileConfig::default()),
        },
    }
}

/// Merge flags/environment over the config file into a client configuration.
pub fn resolve(args: &ConnectionArgs) -> Result<Config> {
    let file = load_file_config(args.config.as_deref())?;
    merge(args, file)
}

fn merge(args: &ConnectionArgs, file: FileConfig) -> Result<Config> {
    let app_id = args
        .app_id
        .clone()
        .or(file.app_id)
        .context("Missing app id: set LEANCLOUD_APP_ID or pass --app-id")?;
    let app_key = args
        .app_key
        .clone()
        .or(file.app_key)
        .context("Missing app key: set LEANCLOUD_APP_KEY or pass --app-key")?;
    let table = args
        .table
        .clone()
        .or(file.table_name)
        .context("Missing table name: set LEANCLOUD_TABLE_NAME or pass --table")?;

    let mut config =
        Config::from_parts(&app_id, &app_key, &table).context("Invalid configuration")?;

    if let Some(base) = args.api_base.clone().or(file.api_base) {
        config = config.with_api_base(ApiBase::new(&base).context("Invalid API base URL")?);
    }

    if let Some(token) = args
        .session_token
        .clone()
        .or(file.write_user_session)
        .filter(|t| !t.is_empty())
    {
        config = config.with_session_token(SessionToken::new(token)?);
    }

    Ok(config)
}

/// Build the table client for a command.
pub fn table(args: &ConnectionArgs) -> Result<RestTable> {
    let config = resolve(args)?;
    RestTable::new(config).context("Failed to create client")
}
