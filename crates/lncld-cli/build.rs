//! Build script stamping the CLI version with the git revision, when available.

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    let pkg = env!("CARGO_PKG_VERSION");
    let version = match git_revision() {
        Some(rev) => format!("{} ({})", pkg, rev),
        None => pkg.to_string(),
    };

    println!("cargo:rustc-env=LNCLD_VERSION={}", version);
}

fn git_revision() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let rev = String::from_utf8(output.stdout).ok()?;
    let rev = rev.trim();
    (!rev.is_empty()).then(|| rev.to_string())
}
