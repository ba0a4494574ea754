//! Line classification policy.
//!
//! Every alignment step looks at one output line and the source line under
//! the cursor, both trimmed, and lands in exactly one [`Step`].

/// Leading token that marks an import statement.
pub const IMPORT_KEYWORD: &str = "import";

/// Character that ends a statement.
pub const STATEMENT_TERMINATOR: char = ';';

/// Classification of a single alignment step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Both lines are blank. Emits a blank line and consumes the source line.
    BothBlank,
    /// Both lines have content. Emits the trimmed source line and consumes it.
    BothContent,
    /// The output line opens an import. Source lines are copied verbatim up
    /// to the terminator and the output continuation lines are skipped.
    ImportConsume,
    /// The output line opens an import the source no longer has. The output
    /// lines of the import are copied verbatim and the source cursor stays.
    /// Decided by the aligner, never returned by [`classify`].
    ImportRestore,
    /// The output has a blank line the source lost. Emits a blank line
    /// without consuming anything from the source.
    EliminatedBlank,
    /// The output has content where the source is blank.
    Invalid,
}

impl Step {
    pub fn as_str(self) -> &'static str {
        match self {
            Step::BothBlank => "both-blank",
            Step::BothContent => "both-content",
            Step::ImportConsume => "import-consume",
            Step::ImportRestore => "import-restore",
            Step::EliminatedBlank => "eliminated-blank",
            Step::Invalid => "invalid",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether `line` opens an import statement.
pub fn is_import(line: &str) -> bool {
    line.trim().starts_with(IMPORT_KEYWORD)
}

/// Classify an (output line, source line) pair.
pub fn classify(output_line: &str, source_line: &str) -> Step {
    let output_line = output_line.trim();
    let source_line = source_line.trim();
    match (output_line.is_empty(), source_line.is_empty()) {
        (true, true) => Step::BothBlank,
        (true, false) => Step::EliminatedBlank,
        (false, true) => Step::Invalid,
        (false, false) if is_import(output_line) => Step::ImportConsume,
        (false, false) => Step::BothContent,
    }
}
