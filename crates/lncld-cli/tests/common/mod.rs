use std::path::Path;
use std::process::{Command, Output};

/// Variables the CLI reads; cleared so the host environment cannot leak in.
const ENV_VARS: &[&str] = &[
    "LEANCLOUD_APP_ID",
    "LEANCLOUD_APP_KEY",
    "LEANCLOUD_TABLE_NAME",
    "LEANCLOUD_WRITE_USER_SESSION",
    "LEANCLOUD_API_BASE",
    "RUST_LOG",
];

/// Build a CLI invocation isolated in `home`: no inherited credentials,
/// no user config file, and no `.env` outside `home`.
pub fn cli(args: &[&str], home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_lncld"));
    cmd.args(args);
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.current_dir(home);
    cmd.env("HOME", home);
    cmd.env("XDG_CONFIG_HOME", home.join("config"));
    cmd
}

/// Run the CLI against an API base with test credentials.
pub fn run_cli_with_api(args: &[&str], home: &Path, api_base: &str) -> Output {
    let mut cmd = cli(args, home);
    cmd.env("LEANCLOUD_APP_ID", "testapp");
    cmd.env("LEANCLOUD_APP_KEY", "testkey");
    cmd.env("LEANCLOUD_TABLE_NAME", "Video");
    cmd.env("LEANCLOUD_API_BASE", api_base);
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI without any credentials.
pub fn run_cli(args: &[&str], home: &Path) -> Output {
    cli(args, home).output().expect("Failed to execute CLI")
}

/// Assert success and return stdout.
pub fn stdout_of(output: Output) -> String {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed\nstderr: {}", stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}
