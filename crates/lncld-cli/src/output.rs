//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use lncld_core::{OperationFailure, Outcome};

/// Print a success message.
pub fn success(msg: &str) {
    eprintln!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a value as JSON, pretty-printed on request.
pub fn json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}

/// Print one line per outcome: the value, or `null` for a failed item.
///
/// Failures are described on stderr so stdout stays line-aligned with
/// the input. Returns the number of failed items.
pub fn outcomes<T: Serialize>(outcomes: &[Outcome<T>], pretty: bool) -> Result<usize> {
    let mut failed = 0;
    for (index, outcome) in outcomes.iter().enumerate() {
        match outcome {
            Ok(value) => json(value, pretty)?,
            Err(failure) => {
                failed += 1;
                println!("null");
                error(&describe(index, failure));
            }
        }
    }
    Ok(failed)
}

/// Print a summary line for a batch of writes.
pub fn summary(action: &str, total: usize, failed: usize) {
    if failed == 0 {
        success(&format!("{} {} item(s)", action, total));
    } else {
        error(&format!(
            "{} {} of {} item(s), {} failed",
            action,
            total - failed,
            total,
            failed
        ));
    }
}

fn describe(index: usize, failure: &OperationFailure) -> String {
    format!("item {}: {}", index, failure)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_names_the_item() {
        let msg = describe(3, &OperationFailure::NotFound);
        assert!(msg.starts_with("item 3: "));
    }
}
