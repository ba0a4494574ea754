//! CLI argument definitions for the ts2js converter.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "ts2js",
    version,
    about = "Convert a TypeScript file to JavaScript, keeping its blank lines",
    long_about = "Convert a TypeScript file to CommonJS JavaScript.\n\n\
                  The file is transpiled with the TypeScript compiler, realigned against the\n\
                  original so blank lines and imports survive, and formatted with prettier.\n\
                  Both tools are looked up in node_modules/.bin, then on PATH."
)]
pub struct Cli {
    /// Source TypeScript file followed by the destination JavaScript file.
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Prettier style (JSON) to use instead of the built-in one.
    #[arg(long = "prettier-config", value_name = "FILE")]
    pub prettier_config: Option<PathBuf>,

    /// Rewrite rules (JSON array) to use instead of the built-in CommonJS rules.
    #[arg(long = "rules", value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -vvv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
