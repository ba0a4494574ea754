//! Error types for line alignment.

use thiserror::Error;

/// The two line sequences violated the structural assumptions of the
/// aligner. None of these are recoverable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlignError {
    /// A non-blank output line met a blank source line.
    #[error(
        "encountered a strange blank line: output line {output_line} has content \
         but source line {source_line} is blank"
    )]
    BlankSourceLine {
        output_line: usize,
        source_line: usize,
    },

    /// The source cursor ran past the end of the source sequence.
    #[error("source sequence exhausted while aligning output line {output_line}")]
    SourceExhausted { output_line: usize },

    /// An import starting at this output line never reaches a terminator.
    #[error("import statement starting at output line {output_line} is never terminated")]
    UnterminatedImport { output_line: usize },
}
