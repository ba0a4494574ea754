//! Transpiler capability and the TypeScript compiler adapter.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::ToolError;
use crate::process::run_with_stdin;

/// Script run by `node -e`: reads TypeScript on stdin, writes
/// `transpileModule` output on stdout. Arguments: file name, target, module.
const TRANSPILE_SCRIPT: &str = include_str!("transpile_module.js");

/// Source-to-source compilation from TypeScript to JavaScript.
pub trait Transpiler {
    /// Transpile `source`. `file_name` is only used for diagnostics and
    /// file-kind detection (`.ts` vs `.tsx`).
    ///
    /// # Errors
    ///
    /// Returns an error if the transpiler rejects the input or cannot run.
    fn transpile(&self, source: &str, file_name: &str) -> Result<String, ToolError>;
}

/// `ts.ScriptTarget` and `ts.ModuleKind` member names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerOptions {
    pub target: String,
    pub module: String,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            target: "ES2018".to_string(),
            module: "ES2015".to_string(),
        }
    }
}

/// Runs `typescript.transpileModule` through `node`.
///
/// The `typescript` package is resolved by node from the working directory,
/// the same way a project-local `require` would.
#[derive(Debug, Clone)]
pub struct TypeScriptTranspiler {
    node: PathBuf,
    options: CompilerOptions,
}

impl TypeScriptTranspiler {
    pub fn new(node: impl Into<PathBuf>) -> Self {
        Self {
            node: node.into(),
            options: CompilerOptions::default(),
        }
    }

    /// Use the `node` found on `PATH`.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::NotFound`] if `node` is not installed.
    pub fn locate() -> Result<Self, ToolError> {
        let node = which::which("node").map_err(|_| ToolError::NotFound { tool: "node" })?;
        Ok(Self::new(node))
    }

    #[must_use]
    pub fn with_options(mut self, options: CompilerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn node(&self) -> &Path {
        &self.node
    }

    fn command(&self, file_name: &str) -> Command {
        let mut command = Command::new(&self.node);
        command
            .arg("-e")
            .arg(TRANSPILE_SCRIPT)
            .arg(file_name)
            .arg(&self.options.target)
            .arg(&self.options.module);
        command
    }
}

impl Transpiler for TypeScriptTranspiler {
    fn transpile(&self, source: &str, file_name: &str) -> Result<String, ToolError> {
        run_with_stdin("typescript", self.command(file_name), source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_compiler_options() {
        let options = CompilerOptions::default();
        assert_eq!(options.target, "ES2018");
        assert_eq!(options.module, "ES2015");
    }

    #[test]
    fn command_passes_script_and_options() {
        let transpiler = TypeScriptTranspiler::new("node").with_options(CompilerOptions {
            target: "ES2020".to_string(),
            module: "CommonJS".to_string(),
        });

        let command = transpiler.command("sample.ts");
        let args: Vec<_> = command
            .get_args()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();

        assert_eq!(command.get_program(), "node");
        assert_eq!(args[0], "-e");
        assert!(args[1].contains("transpileModule"));
        assert_eq!(&args[2..], ["sample.ts", "ES2020", "CommonJS"]);
    }
}
