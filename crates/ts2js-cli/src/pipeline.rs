//! TypeScript to JavaScript transform pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Transpile**: TypeScript text to JavaScript text
//! 2. **Explode**: format the transpiled text and the original text at print
//!    width 1, so nearly every token group sits on its own line
//! 3. **Realign**: rebuild the transpiled text with the original blank lines
//! 4. **Format**: reformat the realigned text at the normal width
//! 5. **Substitute**: apply the rewrite rules (ES imports to `require`)
//! 6. **Format**: reformat once more at the normal width
//!
//! Each stage takes the output of the previous one. Nothing is retried; the
//! first failure aborts the remaining stages.

use anyhow::{Context, Result};
use tracing::{debug, info_span};

use ts2js_align::{align, split_lines};
use ts2js_rewrite::{RuleSet, apply_rules};
use ts2js_tools::options::PARSER_TYPESCRIPT;
use ts2js_tools::{FormatOptions, Formatter, Transpiler};

/// Print width used for the exploded formatting passes.
pub const EXPLODED_PRINT_WIDTH: u32 = 1;

/// One configured pipeline. Holds no state between runs.
pub struct TransformPipeline<'a> {
    transpiler: &'a dyn Transpiler,
    formatter: &'a dyn Formatter,
    style: FormatOptions,
    rules: RuleSet,
}

impl<'a> TransformPipeline<'a> {
    /// `style` is the normal-width JavaScript style; the exploded passes
    /// override only its print width (and parser, for the original text).
    pub fn new(
        transpiler: &'a dyn Transpiler,
        formatter: &'a dyn Formatter,
        style: FormatOptions,
        rules: RuleSet,
    ) -> Self {
        Self {
            transpiler,
            formatter,
            style,
            rules,
        }
    }

    /// Run every stage over one source text.
    ///
    /// # Errors
    ///
    /// Returns the first collaborator or alignment failure, with the stage
    /// that produced it as context.
    pub fn run(&self, source_text: &str, file_name: &str) -> Result<String> {
        let transpiled = transpile(self.transpiler, source_text, file_name)?;

        let exploded_output = explode(self.formatter, &transpiled, &self.exploded_style())
            .context("format transpiled output")?;
        let exploded_source = explode(
            self.formatter,
            source_text,
            &self.exploded_style().with_parser(PARSER_TYPESCRIPT),
        )
        .context("format original source")?;

        let aligned = realign(&exploded_output, &exploded_source)?;

        let formatted = format(self.formatter, &aligned, &self.style)
            .context("format realigned text")?;
        let substituted = substitute(&formatted, &self.rules);
        format(self.formatter, &substituted, &self.style).context("format rewritten text")
    }

    fn exploded_style(&self) -> FormatOptions {
        self.style.clone().with_print_width(EXPLODED_PRINT_WIDTH)
    }
}

// ============================================================================
// Stage 1: Transpile
// ============================================================================

/// Transpile the original text.
///
/// # Errors
///
/// Returns an error if the transpiler fails.
pub fn transpile(transpiler: &dyn Transpiler, source_text: &str, file_name: &str) -> Result<String> {
    let span = info_span!("transpile", file_name = %file_name);
    let _guard = span.enter();
    let transpiled = transpiler
        .transpile(source_text, file_name)
        .with_context(|| format!("transpile {file_name}"))?;
    debug!(
        input_lines = source_text.lines().count(),
        output_lines = transpiled.lines().count(),
        "transpile complete"
    );
    Ok(transpiled)
}

// ============================================================================
// Stage 2: Explode
// ============================================================================

/// Format `text` in the exploded, one-group-per-line form.
///
/// # Errors
///
/// Returns an error if the formatter fails.
pub fn explode(formatter: &dyn Formatter, text: &str, style: &FormatOptions) -> Result<String> {
    let span = info_span!("explode", parser = style.parser.as_deref().unwrap_or("default"));
    let _guard = span.enter();
    let exploded = formatter.format(text, style)?;
    debug!(lines = exploded.lines().count(), "explode complete");
    Ok(exploded)
}

// ============================================================================
// Stage 3: Realign
// ============================================================================

/// Rebuild the exploded transpiled text with the blank-line layout of the
/// exploded original.
///
/// # Errors
///
/// Returns an error if the two texts break the alignment assumptions.
pub fn realign(exploded_output: &str, exploded_source: &str) -> Result<String> {
    let span = info_span!("realign");
    let _guard = span.enter();
    let content = split_lines(exploded_output);
    let layout = split_lines(exploded_source);
    let aligned = align(&content, &layout).context("realign blank lines")?;
    debug!(
        content_lines = content.len(),
        layout_lines = layout.len(),
        "realign complete"
    );
    Ok(aligned)
}

// ============================================================================
// Stage 4/6: Format
// ============================================================================

/// Format at the configured width.
///
/// # Errors
///
/// Returns an error if the formatter fails.
pub fn format(formatter: &dyn Formatter, text: &str, style: &FormatOptions) -> Result<String> {
    let span = info_span!("format", print_width = style.print_width);
    let _guard = span.enter();
    Ok(formatter.format(text, style)?)
}

// ============================================================================
// Stage 5: Substitute
// ============================================================================

/// Apply the rewrite rules.
pub fn substitute(text: &str, rules: &RuleSet) -> String {
    let span = info_span!("substitute", rule_count = rules.len());
    let _guard = span.enter();
    apply_rules(text, rules)
}
