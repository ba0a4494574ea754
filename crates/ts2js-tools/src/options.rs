//! Formatter style options.
//!
//! Field names follow prettier's configuration keys so a `.prettierrc.json`
//! can be loaded as is. Keys prettier knows but this struct does not are
//! ignored.

use std::path::Path;

use serde::Deserialize;

use crate::error::ToolError;

/// The fixed style every formatting step starts from.
const EMBEDDED_STYLE: &str = include_str!("prettier.json");

/// Parser for JavaScript text.
pub const PARSER_BABEL: &str = "babel";

/// Parser for TypeScript text.
pub const PARSER_TYPESCRIPT: &str = "typescript";

const DEFAULT_PRINT_WIDTH: u32 = 80;

fn default_print_width() -> u32 {
    DEFAULT_PRINT_WIDTH
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatOptions {
    #[serde(default)]
    pub parser: Option<String>,
    #[serde(default = "default_print_width")]
    pub print_width: u32,
    #[serde(default)]
    pub tab_width: Option<u32>,
    #[serde(default)]
    pub use_tabs: Option<bool>,
    #[serde(default)]
    pub semi: Option<bool>,
    #[serde(default)]
    pub single_quote: Option<bool>,
    #[serde(default)]
    pub quote_props: Option<String>,
    #[serde(default)]
    pub trailing_comma: Option<String>,
    #[serde(default)]
    pub bracket_spacing: Option<bool>,
    #[serde(default)]
    pub arrow_parens: Option<String>,
    #[serde(default)]
    pub end_of_line: Option<String>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            parser: None,
            print_width: DEFAULT_PRINT_WIDTH,
            tab_width: None,
            use_tabs: None,
            semi: None,
            single_quote: None,
            quote_props: None,
            trailing_comma: None,
            bracket_spacing: None,
            arrow_parens: None,
            end_of_line: None,
        }
    }
}

impl FormatOptions {
    /// The built-in style, with the JavaScript parser selected.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded style does not parse.
    pub fn embedded() -> Result<Self, ToolError> {
        Self::from_json(EMBEDDED_STYLE).map(|options| options.with_parser(PARSER_BABEL))
    }

    /// Parse a prettier-style JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::InvalidStyle`] if `json` is not a valid style.
    pub fn from_json(json: &str) -> Result<Self, ToolError> {
        serde_json::from_str(json).map_err(|source| ToolError::InvalidStyle { source })
    }

    /// Load a style file, selecting the JavaScript parser unless it names one.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ToolError> {
        let text = std::fs::read_to_string(path).map_err(|source| ToolError::StyleIo {
            path: path.to_path_buf(),
            source,
        })?;
        let options = Self::from_json(&text)?;
        Ok(match options.parser {
            Some(_) => options,
            None => options.with_parser(PARSER_BABEL),
        })
    }

    #[must_use]
    pub fn with_parser(mut self, parser: impl Into<String>) -> Self {
        self.parser = Some(parser.into());
        self
    }

    #[must_use]
    pub fn with_print_width(mut self, print_width: u32) -> Self {
        self.print_width = print_width;
        self
    }

    /// Whether this style parses TypeScript.
    pub fn is_typescript(&self) -> bool {
        self.parser.as_deref() == Some(PARSER_TYPESCRIPT)
    }

    /// Command-line flags for the prettier CLI.
    pub fn to_prettier_args(&self) -> Vec<String> {
        let mut args = vec!["--print-width".to_string(), self.print_width.to_string()];
        if let Some(parser) = &self.parser {
            args.extend(["--parser".to_string(), parser.clone()]);
        }
        if let Some(tab_width) = self.tab_width {
            args.extend(["--tab-width".to_string(), tab_width.to_string()]);
        }
        if self.use_tabs == Some(true) {
            args.push("--use-tabs".to_string());
        }
        if self.semi == Some(false) {
            args.push("--no-semi".to_string());
        }
        if self.single_quote == Some(true) {
            args.push("--single-quote".to_string());
        }
        if let Some(quote_props) = &self.quote_props {
            args.extend(["--quote-props".to_string(), quote_props.clone()]);
        }
        if let Some(trailing_comma) = &self.trailing_comma {
            args.extend(["--trailing-comma".to_string(), trailing_comma.clone()]);
        }
        if self.bracket_spacing == Some(false) {
            args.push("--no-bracket-spacing".to_string());
        }
        if let Some(arrow_parens) = &self.arrow_parens {
            args.extend(["--arrow-parens".to_string(), arrow_parens.clone()]);
        }
        if let Some(end_of_line) = &self.end_of_line {
            args.extend(["--end-of-line".to_string(), end_of_line.clone()]);
        }
        args
    }
}
