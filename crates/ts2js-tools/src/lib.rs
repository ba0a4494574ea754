//! External collaborators of the transform pipeline.
//!
//! The pipeline only sees two capabilities:
//!
//! - [`Transpiler`]: TypeScript text in, JavaScript text out
//! - [`Formatter`]: text plus [`FormatOptions`] in, canonical text out
//!
//! [`TypeScriptTranspiler`] and [`Prettier`] implement them by driving the
//! `typescript` package through `node` and the `prettier` CLI, feeding the
//! text on stdin and reading the result from stdout.

pub mod error;
pub mod formatter;
pub mod options;
pub mod process;
pub mod transpiler;

pub use error::ToolError;
pub use formatter::{Formatter, Prettier};
pub use options::FormatOptions;
pub use transpiler::{CompilerOptions, Transpiler, TypeScriptTranspiler};
