//! Error types for external tool invocations.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    /// The tool is neither in a `node_modules/.bin` nor on `PATH`.
    #[error("{tool} not found in node_modules/.bin or on PATH")]
    NotFound { tool: &'static str },

    #[error("failed to spawn {tool}: {source}")]
    Spawn {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("i/o error while talking to {tool}: {source}")]
    Io {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The tool ran and rejected its input.
    #[error("{tool} exited with {status}: {stderr}")]
    Failed {
        tool: &'static str,
        status: ExitStatus,
        stderr: String,
    },

    #[error("{tool} produced output that is not valid UTF-8: {source}")]
    Utf8 {
        tool: &'static str,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("failed to read style file {path}: {source}")]
    StyleIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid formatter style: {source}")]
    InvalidStyle {
        #[source]
        source: serde_json::Error,
    },
}
