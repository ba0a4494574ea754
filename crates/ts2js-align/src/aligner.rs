//! The alignment state machine.
//!
//! Two immutable line sequences, two cursors:
//!
//! - `source`: lines that end up in the result. The source cursor only moves
//!   forward and a consumed line is never looked at again.
//! - `output`: lines that decide the layout. Every output line is visited
//!   exactly once, in order; an import step may skip its continuation lines.
//!
//! Import statements are the one place content comes from `output`: an
//! output import with no counterpart at the source cursor (a type-only
//! import the transpiler erased) is copied from `output` verbatim.
//!
//! In the transform pipeline the source sequence is the exploded transpiled
//! text and the output sequence is the exploded original text, so the result
//! carries the transpiled statements with the original blank lines.

use tracing::trace;

use crate::error::AlignError;
use crate::step::{STATEMENT_TERMINATOR, Step, classify, is_import};

/// Split formatted text into a line sequence.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// Realign `source` against the blank-line layout of `output`.
///
/// # Errors
///
/// Returns an [`AlignError`] when the sequences break the structural
/// assumptions of the aligner (content facing a blank source line, a source
/// sequence that runs out, or an import that never terminates).
pub fn align<A, B>(source: &[A], output: &[B]) -> Result<String, AlignError>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let mut aligner = Aligner::new(source, output);
    while aligner.step()?.is_some() {}
    Ok(aligner.finish())
}

/// Stepwise driver for [`align`].
#[derive(Debug)]
pub struct Aligner<'a, A, B> {
    source: &'a [A],
    output: &'a [B],
    cursor_source: usize,
    cursor_output: usize,
    lines: Vec<String>,
}

impl<'a, A, B> Aligner<'a, A, B>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    pub fn new(source: &'a [A], output: &'a [B]) -> Self {
        Self {
            source,
            output,
            cursor_source: 0,
            cursor_output: 0,
            lines: Vec::with_capacity(output.len()),
        }
    }

    /// Index of the next unconsumed source line.
    pub fn cursor_source(&self) -> usize {
        self.cursor_source
    }

    /// Index of the next output line to classify.
    pub fn cursor_output(&self) -> usize {
        self.cursor_output
    }

    pub fn is_done(&self) -> bool {
        self.cursor_output >= self.output.len()
    }

    /// Lines emitted so far.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Classify and apply one step. Returns `None` once the output sequence
    /// is fully consumed.
    ///
    /// # Errors
    ///
    /// See [`align`].
    pub fn step(&mut self) -> Result<Option<Step>, AlignError> {
        let output: &'a [B] = self.output;
        let source: &'a [A] = self.source;
        let Some(output_line) = output.get(self.cursor_output) else {
            return Ok(None);
        };
        let output_line = output_line.as_ref();
        let source_line = source.get(self.cursor_source).map(AsRef::as_ref);
        let step = match source_line {
            Some(source_line) => match classify(output_line, source_line) {
                Step::ImportConsume if self.import_erased()? => Step::ImportRestore,
                step => step,
            },
            None if is_import(output_line) => Step::ImportRestore,
            None => {
                return Err(AlignError::SourceExhausted {
                    output_line: self.cursor_output,
                });
            }
        };
        let source_line = source_line.unwrap_or_default();
        trace!(
            step = %step,
            output_line = self.cursor_output,
            source_line = self.cursor_source,
            output = output_line.trim(),
            source = source_line.trim(),
            "align step"
        );

        match step {
            Step::BothBlank => {
                self.lines.push(String::new());
                self.cursor_source += 1;
            }
            Step::BothContent => {
                self.lines.push(source_line.trim().to_string());
                self.cursor_source += 1;
            }
            Step::ImportConsume => {
                self.consume_import()?;
                self.skip_import_continuation()?;
            }
            Step::ImportRestore => self.restore_import()?,
            Step::EliminatedBlank => self.lines.push(String::new()),
            Step::Invalid => {
                return Err(AlignError::BlankSourceLine {
                    output_line: self.cursor_output,
                    source_line: self.cursor_source,
                });
            }
        }

        self.cursor_output += 1;
        Ok(Some(step))
    }

    /// Join the emitted lines into the realigned text.
    pub fn finish(self) -> String {
        self.lines.join("\n")
    }

    fn source_line(&self) -> Result<&'a str, AlignError> {
        let source: &'a [A] = self.source;
        source
            .get(self.cursor_source)
            .map(AsRef::as_ref)
            .ok_or(AlignError::SourceExhausted {
                output_line: self.cursor_output,
            })
    }

    /// Copy source lines verbatim through the first one holding a terminator.
    fn consume_import(&mut self) -> Result<(), AlignError> {
        loop {
            let line = self.source_line()?;
            trace!(source_line = self.cursor_source, line, "consuming import line");
            self.lines.push(line.to_string());
            self.cursor_source += 1;
            if line.contains(STATEMENT_TERMINATOR) {
                return Ok(());
            }
        }
    }

    /// Leave the output cursor on the line that terminates the import.
    fn skip_import_continuation(&mut self) -> Result<(), AlignError> {
        self.cursor_output = self.output_import_end()?;
        Ok(())
    }

    /// Copy the output lines of the current import verbatim, leaving the
    /// output cursor on its terminating line.
    fn restore_import(&mut self) -> Result<(), AlignError> {
        let output: &'a [B] = self.output;
        let end = self.output_import_end()?;
        self.lines.extend(
            output[self.cursor_output..=end]
                .iter()
                .map(|line| line.as_ref().to_string()),
        );
        trace!(
            output_line = self.cursor_output,
            lines = end + 1 - self.cursor_output,
            "restored erased import"
        );
        self.cursor_output = end;
        Ok(())
    }

    fn output_import_end(&self) -> Result<usize, AlignError> {
        statement_end(self.output, self.cursor_output).ok_or(AlignError::UnterminatedImport {
            output_line: self.cursor_output,
        })
    }

    /// Whether the import opening at the output cursor has no counterpart at
    /// the source cursor.
    ///
    /// Imports are never reordered, so the source import under the cursor
    /// belongs either to this output import or to a later one. It belongs to
    /// this one when the statements match, or when no later output import
    /// matches and both load the same module (the transpiler may have
    /// dropped some of its bindings or laid it out differently).
    fn import_erased(&self) -> Result<bool, AlignError> {
        let output_end = self.output_import_end()?;
        let source: &'a [A] = self.source;
        let Some(source_line) = source.get(self.cursor_source) else {
            return Ok(true);
        };
        if !is_import(source_line.as_ref()) {
            return Ok(true);
        }
        let Some(source_end) = statement_end(source, self.cursor_source) else {
            // Unterminated; consuming reports it.
            return Ok(false);
        };

        let wanted = statement_text(source, self.cursor_source, source_end);
        let here = statement_text(self.output, self.cursor_output, output_end);
        if here == wanted {
            return Ok(false);
        }
        if self.later_output_import_is(output_end + 1, &wanted) {
            return Ok(true);
        }
        Ok(module_specifier(&here) != module_specifier(&wanted))
    }

    fn later_output_import_is(&self, from: usize, statement: &str) -> bool {
        let mut index = from;
        while index < self.output.len() {
            if !is_import(self.output[index].as_ref()) {
                index += 1;
                continue;
            }
            let Some(end) = statement_end(self.output, index) else {
                return false;
            };
            if statement_text(self.output, index, end) == statement {
                return true;
            }
            index = end + 1;
        }
        false
    }
}

/// Index of the first line at or after `start` that holds a terminator.
fn statement_end<S: AsRef<str>>(lines: &[S], start: usize) -> Option<usize> {
    lines
        .get(start..)?
        .iter()
        .position(|line| line.as_ref().contains(STATEMENT_TERMINATOR))
        .map(|offset| start + offset)
}

/// Lines `start..=end`, trimmed and joined with single spaces.
fn statement_text<S: AsRef<str>>(lines: &[S], start: usize, end: usize) -> String {
    lines[start..=end]
        .iter()
        .map(|line| line.as_ref().trim())
        .collect::<Vec<_>>()
        .join(" ")
}

/// The last quoted string of an import statement, the module it loads.
fn module_specifier(statement: &str) -> Option<&str> {
    let end = statement.rfind(['"', '\''])?;
    let quote = statement[end..].chars().next()?;
    let start = statement[..end].rfind(quote)?;
    Some(&statement[start + 1..end])
}
