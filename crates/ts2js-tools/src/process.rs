//! Locating and running external tools.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::ToolError;

/// Find a JavaScript tool binary.
///
/// Looks for `node_modules/.bin/<name>` in `start` and each of its
/// ancestors first, then falls back to `PATH`.
///
/// # Errors
///
/// Returns [`ToolError::NotFound`] if neither location has the tool.
pub fn find_js_tool(tool: &'static str, start: &Path) -> Result<PathBuf, ToolError> {
    if let Some(local) = find_local_bin(tool, start) {
        debug!(tool, path = %local.display(), "using project-local tool");
        return Ok(local);
    }
    which::which(tool).map_err(|_| ToolError::NotFound { tool })
}

fn find_local_bin(tool: &str, start: &Path) -> Option<PathBuf> {
    let mut names = vec![tool.to_string()];
    if cfg!(windows) {
        names.insert(0, format!("{tool}.cmd"));
    }
    start.ancestors().find_map(|dir| {
        let bin = dir.join("node_modules").join(".bin");
        names
            .iter()
            .map(|name| bin.join(name))
            .find(|candidate| candidate.is_file())
    })
}

/// Run `command` with `input` on stdin and return its stdout.
///
/// # Errors
///
/// Returns an error if the tool cannot be spawned, exits unsuccessfully,
/// or writes something other than UTF-8.
pub fn run_with_stdin(
    tool: &'static str,
    mut command: Command,
    input: &str,
) -> Result<String, ToolError> {
    command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    debug!(
        tool,
        program = %command.get_program().to_string_lossy(),
        input_bytes = input.len(),
        "running tool"
    );

    let mut child = command
        .spawn()
        .map_err(|source| ToolError::Spawn { tool, source })?;
    let stdin = child.stdin.take();
    // Stdin is written on its own thread while stdout and stderr drain here,
    // so neither side can block on a full pipe.
    let (output, written) = std::thread::scope(|scope| {
        let writer = stdin.map(|mut stdin| scope.spawn(move || stdin.write_all(input.as_bytes())));
        let output = child.wait_with_output();
        let written = writer.map_or(Ok(()), |handle| {
            handle
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked")))
        });
        (output, written)
    });
    let output = output.map_err(|source| ToolError::Io { tool, source })?;

    if !output.status.success() {
        return Err(ToolError::Failed {
            tool,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    written.map_err(|source| ToolError::Io { tool, source })?;
    String::from_utf8(output.stdout).map_err(|source| ToolError::Utf8 { tool, source })
}
