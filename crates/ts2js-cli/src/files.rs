//! Source and destination file handling.

use std::path::{Component, Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::{debug, info_span};

use crate::pipeline::TransformPipeline;

/// Number of positional paths the converter takes.
pub const EXPECTED_PATH_COUNT: usize = 2;

/// Outcome of converting one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertSummary {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub source_lines: usize,
    pub output_lines: usize,
}

/// Split the positional arguments into normalized (source, destination).
///
/// # Errors
///
/// Fails unless exactly two paths were given.
pub fn source_and_destination(paths: &[PathBuf]) -> Result<(PathBuf, PathBuf)> {
    let [source, destination] = paths else {
        bail!(
            "Wrong number of arguments. Got {} but expected {EXPECTED_PATH_COUNT}.",
            paths.len()
        );
    };
    Ok((normalize_path(source), normalize_path(destination)))
}

/// Lexically normalize a path: drop `.` components and fold `..` into the
/// preceding normal component where there is one.
pub fn normalize_path(p: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for c in p.components() {
        match c {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(c.as_os_str()),
            },
            _ => out.push(c.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Read `source`, run the pipeline, and write the result to `destination`,
/// creating its parent directory if needed.
///
/// # Errors
///
/// Returns an error if reading, converting, or writing fails. A failed
/// write can leave a partially written destination behind.
pub fn convert_file(
    pipeline: &TransformPipeline<'_>,
    source: &Path,
    destination: &Path,
) -> Result<ConvertSummary> {
    let span = info_span!(
        "convert",
        source = %source.display(),
        destination = %destination.display()
    );
    let _guard = span.enter();
    let start = Instant::now();

    let source_text = std::fs::read_to_string(source)
        .with_context(|| format!("read {}", source.display()))?;
    let file_name = source.to_string_lossy();
    let output = pipeline.run(&source_text, &file_name)?;

    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    std::fs::write(destination, &output)
        .with_context(|| format!("write {}", destination.display()))?;

    let summary = ConvertSummary {
        source: source.to_path_buf(),
        destination: destination.to_path_buf(),
        source_lines: source_text.lines().count(),
        output_lines: output.lines().count(),
    };
    debug!(duration_ms = start.elapsed().as_millis(), "destination written");
    Ok(summary)
}
