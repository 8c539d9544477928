//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser};

use crate::commands::Commands;

/// Query, search and batch-write a LeanCloud table.
#[derive(Parser, Debug)]
#[command(name = "lncld")]
#[command(author, version = env!("LNCLD_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where to connect and with which credentials.
///
/// Flags win over environment variables, which win over the config file.
#[derive(Args, Debug, Default, Clone)]
pub struct ConnectionArgs {
    /// Application id
    #[arg(long, env = "LEANCLOUD_APP_ID", global = true, hide_env_values = true)]
    pub app_id: Option<String>,

    /// Application key
    #[arg(long, env = "LEANCLOUD_APP_KEY", global = true, hide_env_values = true)]
    pub app_key: Option<String>,

    /// Class (table) name
    #[arg(long, env = "LEANCLOUD_TABLE_NAME", global = true)]
    pub table: Option<String>,

    /// Session token used for create and update
    #[arg(long, env = "LEANCLOUD_WRITE_USER_SESSION", global = true, hide_env_values = true)]
    pub session_token: Option<String>,

    /// Override the API base URL (defaults to the hosted API for the app id)
    #[arg(long, env = "LEANCLOUD_API_BASE", global = true)]
    pub api_base: Option<String>,

    /// JSON config file (defaults to <config dir>/lncld/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}
