//! Formatter capability and the prettier adapter.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::ToolError;
use crate::options::FormatOptions;
use crate::process::{find_js_tool, run_with_stdin};

/// Canonical reformatting of source text.
pub trait Formatter {
    /// Reformat `text` with the given style.
    ///
    /// # Errors
    ///
    /// Returns an error if the formatter cannot parse `text` or cannot run.
    fn format(&self, text: &str, options: &FormatOptions) -> Result<String, ToolError>;
}

/// The prettier command-line formatter.
///
/// Runs with `--no-config`, so the style passed to [`Formatter::format`] is
/// the only one applied regardless of configuration files near the input.
#[derive(Debug, Clone)]
pub struct Prettier {
    program: PathBuf,
}

impl Prettier {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Find prettier in a `node_modules/.bin` above `start`, or on `PATH`.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::NotFound`] if prettier is not installed.
    pub fn locate(start: &Path) -> Result<Self, ToolError> {
        find_js_tool("prettier", start).map(Self::new)
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn command(&self, options: &FormatOptions) -> Command {
        // Only the extension matters: it picks a parser if none is given.
        let stdin_path = if options.is_typescript() {
            "stdin.ts"
        } else {
            "stdin.js"
        };
        let mut command = Command::new(&self.program);
        command
            .arg("--no-config")
            .arg("--stdin-filepath")
            .arg(stdin_path)
            .args(options.to_prettier_args());
        command
    }
}

impl Formatter for Prettier {
    fn format(&self, text: &str, options: &FormatOptions) -> Result<String, ToolError> {
        run_with_stdin("prettier", self.command(options), text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::PARSER_TYPESCRIPT;

    fn args(command: &Command) -> Vec<String> {
        command
            .get_args()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn command_for_javascript() {
        let prettier = Prettier::new("prettier");
        let options = FormatOptions::default().with_parser("babel").with_print_width(1);

        let command = prettier.command(&options);

        assert_eq!(
            args(&command),
            [
                "--no-config",
                "--stdin-filepath",
                "stdin.js",
                "--print-width",
                "1",
                "--parser",
                "babel",
            ]
        );
    }

    #[test]
    fn command_for_typescript() {
        let prettier = Prettier::new("prettier");
        let options = FormatOptions::default().with_parser(PARSER_TYPESCRIPT);

        let command = prettier.command(&options);

        assert_eq!(args(&command)[2], "stdin.ts");
    }

    #[test]
    fn locate_prefers_project_bin() {
        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("node_modules").join(".bin");
        std::fs::create_dir_all(&bin).unwrap();
        let name = if cfg!(windows) { "prettier.cmd" } else { "prettier" };
        std::fs::write(bin.join(name), "").unwrap();

        let prettier = Prettier::locate(dir.path()).unwrap();

        assert_eq!(prettier.program(), bin.join(name));
    }
}
