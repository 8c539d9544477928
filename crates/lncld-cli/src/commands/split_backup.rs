//! Split-backup command implementation.
//!
//! A table export holds one JSON object per line. The import endpoint wants
//! JSON arrays, and large exports have to go in several pieces.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Args;
use tracing::{debug, info};

use crate::output;

#[derive(Args, Debug)]
pub struct SplitBackupArgs {
    /// Backup export, one JSON object per line
    pub file: PathBuf,

    /// Number of chunks to produce
    #[arg(long, default_value_t = 3)]
    pub chunks: usize,

    /// Directory to write chunk.<i>.json files into
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,
}

pub fn run(args: SplitBackupArgs) -> Result<()> {
    let content = fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read backup file {}", args.file.display()))?;

    let lines = record_lines(&content);
    debug!(records = lines.len(), "Read backup");

    let chunks = split_chunks(&lines, args.chunks)?;
    let written = write_chunks(&args.out_dir, &chunks)?;

    output::success(&format!(
        "Wrote {} record(s) into {} chunk(s)",
        lines.len(),
        written.len()
    ));
    Ok(())
}

/// The lines of an export that hold records.
fn record_lines(content: &str) -> Vec<&str> {
    content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| line.starts_with('{'))
        .collect()
}

/// Partition `lines` into contiguous groups of `ceil(len / n)` lines.
/// The last group may be shorter, and there may be fewer than `n` groups.
fn split_chunks<'a>(lines: &'a [&'a str], n: usize) -> Result<Vec<&'a [&'a str]>> {
    if n == 0 {
        bail!("Chunk count must be at least 1");
    }
    if lines.is_empty() {
        return Ok(Vec::new());
    }
    Ok(lines.chunks(lines.len().div_ceil(n)).collect())
}

/// Write each chunk to `dir/chunk.<i>.json` as a JSON array.
fn write_chunks(dir: &Path, chunks: &[&[&str]]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    chunks
        .iter()
        .enumerate()
        .map(|(index, chunk)| {
            let path = dir.join(format!("chunk.{}.json", index));
            fs::write(&path, format!("[{}]", chunk.join(",")))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), records = chunk.len(), "Wrote chunk");
            Ok(path)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn keeps_only_object_lines() {
        let content = "{\"a\":1}\r\n# comment\n\n {\"indented\":true}\n{\"b\":2}";
        assert_eq!(record_lines(content), vec!["{\"a\":1}", "{\"b\":2}"]);
    }

    #[test]
    fn chunks_are_ceil_sized() {
        let lines = vec!["{1}", "{2}", "{3}", "{4}", "{5}", "{6}", "{7}"];
        let chunks = split_chunks(&lines, 3).unwrap();
        let sizes: Vec<usize> = chunks.iter().map(|c| c.len()).collect();
        assert_eq!(sizes, vec![3, 3, 1]);
    }

    #[test]
    fn fewer_lines_than_chunks() {
        let lines = vec!["{1}", "{2}"];
        assert_eq!(split_chunks(&lines, 3).unwrap().len(), 2);
    }

    #[test]
    fn zero_chunks_rejected() {
        assert!(split_chunks(&["{}"], 0).is_err());
    }

    #[test]
    fn empty_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let chunks = split_chunks(&[], 3).unwrap();
        assert!(write_chunks(dir.path(), &chunks).unwrap().is_empty());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn written_chunks_are_json_arrays() {
        let dir = tempfile::tempdir().unwrap();
        let lines = vec![r#"{"id":1}"#, r#"{"id":2}"#, r#"{"id":3}"#];
        let chunks = split_chunks(&lines, 2).unwrap();
        let paths = write_chunks(dir.path(), &chunks).unwrap();

        assert_eq!(paths.len(), 2);
        assert!(paths[1].ends_with("chunk.1.json"));

        let first: Value =
            serde_json::from_str(&fs::read_to_string(&paths[0]).unwrap()).unwrap();
        assert_eq!(first, serde_json::json!([{"id": 1}, {"id": 2}]));
        let second = fs::read_to_string(&paths[1]).unwrap();
        assert_eq!(second, r#"[{"id":3}]"#);
    }
}
