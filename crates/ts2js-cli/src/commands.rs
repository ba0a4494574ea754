use anyhow::{Context, Result};
use tracing::{debug, info};

use ts2js_cli::files::{convert_file, source_and_destination};
use ts2js_cli::pipeline::TransformPipeline;
use ts2js_rewrite::RuleSet;
use ts2js_tools::{FormatOptions, Prettier, TypeScriptTranspiler};

use crate::cli::Cli;

pub fn run_convert(cli: &Cli) -> Result<()> {
    // Argument errors come first, before any tool lookup.
    let (source, destination) = source_and_destination(&cli.paths)?;

    let style = match &cli.prettier_config {
        Some(path) => FormatOptions::load(path).context("load prettier style")?,
        None => FormatOptions::embedded().context("load built-in prettier style")?,
    };
    let rules = match &cli.rules {
        Some(path) => RuleSet::load(path).context("load rewrite rules")?,
        None => RuleSet::commonjs().context("compile built-in rewrite rules")?,
    };
    debug!(rule_count = rules.len(), print_width = style.print_width, "configuration loaded");

    let working_dir = std::env::current_dir().context("resolve working directory")?;
    let transpiler = TypeScriptTranspiler::locate()?;
    let formatter = Prettier::locate(&working_dir)?;
    debug!(
        node = %transpiler.node().display(),
        prettier = %formatter.program().display(),
        "tools located"
    );

    let pipeline = TransformPipeline::new(&transpiler, &formatter, style, rules);
    let summary = convert_file(&pipeline, &source, &destination)?;
    info!(
        source = %summary.source.display(),
        destination = %summary.destination.display(),
        source_lines = summary.source_lines,
        output_lines = summary.output_lines,
        "conversion complete"
    );
    Ok(())
}
