//! Rewrite rules and the ordered rule set.

use std::borrow::Cow;
use std::path::Path;

use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::error::RewriteError;

/// How many matches a rule replaces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplaceMode {
    /// Only the leftmost match.
    #[default]
    First,
    /// Every non-overlapping match.
    All,
}

/// A rule as written in a rule file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RuleSpec {
    #[serde(default)]
    pub name: Option<String>,
    pub pattern: String,
    /// Replacement template; `${1}` style group references are expanded.
    pub replacement: String,
    #[serde(default)]
    pub mode: ReplaceMode,
}

/// Built-in CommonJS conversion table: (name, pattern, replacement, mode).
///
/// The dotenv rule must run before the destructured import rule, which
/// would otherwise claim the `import` half of it.
const COMMONJS_RULES: &[(&str, &str, &str, ReplaceMode)] = &[
    (
        "dotenv",
        r#"import\s+\*\s+as\s+dotenv\s+from\s*"dotenv"\s*;\s*\n\s*dotenv.config\(\{[^{]*\}\)\s*;\s*"#,
        "require(\"dotenv\").config();\n\n",
        ReplaceMode::First,
    ),
    (
        "named-import",
        r#"import\s+(\{[^}]+\})\s+from\s*("[^"]+");"#,
        "const ${1} = require(${2});",
        ReplaceMode::All,
    ),
    (
        "default-import",
        r#"import\s+([^\s]+)\s+from\s*("[^"]+");"#,
        "const ${1} = require(${2});",
        ReplaceMode::All,
    ),
    (
        "namespace-import",
        r#"import\s+\*\s+as\s+([^\s]+)\s+from\s*("[^"]+");"#,
        "const ${1} = require(${2});",
        ReplaceMode::All,
    ),
    (
        "export-main",
        r"export async function main",
        "async function main",
        ReplaceMode::First,
    ),
];

/// A compiled rewrite rule.
#[derive(Debug, Clone)]
pub struct RewriteRule {
    name: Option<String>,
    pattern: Regex,
    replacement: String,
    mode: ReplaceMode,
}

impl RewriteRule {
    /// Compile a rule.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::InvalidPattern`] if `pattern` is not a valid regex.
    pub fn new(
        pattern: &str,
        replacement: impl Into<String>,
        mode: ReplaceMode,
    ) -> Result<Self, RewriteError> {
        let regex = Regex::new(pattern).map_err(|source| RewriteError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            name: None,
            pattern: regex,
            replacement: replacement.into(),
            mode,
        })
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn mode(&self) -> ReplaceMode {
        self.mode
    }

    /// Apply the rule once. Borrows the input when nothing matched.
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        match self.mode {
            ReplaceMode::First => self.pattern.replace(text, self.replacement.as_str()),
            ReplaceMode::All => self.pattern.replace_all(text, self.replacement.as_str()),
        }
    }
}

impl TryFrom<&RuleSpec> for RewriteRule {
    type Error = RewriteError;

    fn try_from(spec: &RuleSpec) -> Result<Self, Self::Error> {
        let rule = RewriteRule::new(&spec.pattern, spec.replacement.clone(), spec.mode)?;
        Ok(match &spec.name {
            Some(name) => rule.with_name(name.clone()),
            None => rule,
        })
    }
}

/// Ordered list of rewrite rules.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<RewriteRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<RewriteRule>) -> Self {
        Self { rules }
    }

    /// The built-in ES module to CommonJS table.
    ///
    /// # Errors
    ///
    /// Only fails if a built-in pattern does not compile.
    pub fn commonjs() -> Result<Self, RewriteError> {
        let rules = COMMONJS_RULES
            .iter()
            .map(|(name, pattern, replacement, mode)| {
                RewriteRule::new(pattern, *replacement, *mode).map(|rule| rule.with_name(*name))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// Compile rules from their serializable form, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns the first [`RewriteError::InvalidPattern`] encountered.
    pub fn from_specs(specs: &[RuleSpec]) -> Result<Self, RewriteError> {
        let rules = specs
            .iter()
            .map(RewriteRule::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// Load a JSON array of [`RuleSpec`] from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or compiled.
    pub fn load(path: &Path) -> Result<Self, RewriteError> {
        let text = std::fs::read_to_string(path).map_err(|source| RewriteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let specs: Vec<RuleSpec> =
            serde_json::from_str(&text).map_err(|source| RewriteError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_specs(&specs)
    }

    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Apply every rule once, in order, each over the result of the previous one.
pub fn apply_rules(text: &str, rules: &RuleSet) -> String {
    let mut current = text.to_string();
    for (index, rule) in rules.rules().iter().enumerate() {
        let rewritten = match rule.apply(&current) {
            Cow::Borrowed(_) => continue,
            Cow::Owned(rewritten) => rewritten,
        };
        debug!(
            rule = index,
            name = rule.name().unwrap_or("unnamed"),
            "rewrite rule matched"
        );
        current = rewritten;
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commonjs() -> RuleSet {
        RuleSet::commonjs().unwrap()
    }

    #[test]
    fn commonjs_table_order() {
        let ruleset = commonjs();
        let names: Vec<_> = ruleset.rules().iter().filter_map(RewriteRule::name).collect();
        assert_eq!(
            names,
            [
                "dotenv",
                "named-import",
                "default-import",
                "namespace-import",
                "export-main"
            ]
        );
    }

    #[test]
    fn named_import() {
        let out = apply_rules("import { a } from \"b\";\n", &commonjs());
        assert_eq!(out, "const { a } = require(\"b\");\n");
    }

    #[test]
    fn named_import_spanning_lines() {
        let out = apply_rules("import {\n  a,\n  b,\n} from \"m\";", &commonjs());
        assert_eq!(out, "const {\n  a,\n  b,\n} = require(\"m\");");
    }

    #[test]
    fn default_import() {
        let out = apply_rules("import express from \"express\";", &commonjs());
        assert_eq!(out, "const express = require(\"express\");");
    }

    #[test]
    fn namespace_import() {
        let out = apply_rules("import * as path from \"path\";", &commonjs());
        assert_eq!(out, "const path = require(\"path\");");
    }

    #[test]
    fn every_match_of_a_global_rule_is_replaced() {
        let out = apply_rules(
            "import a from \"a\";\nimport b from \"b\";\n",
            &commonjs(),
        );
        assert_eq!(out, "const a = require(\"a\");\nconst b = require(\"b\");\n");
    }

    #[test]
    fn first_mode_replaces_once() {
        let rule = RewriteRule::new("x", "y", ReplaceMode::First).unwrap();
        assert_eq!(rule.apply("xxx"), "yxx");
        let rule = RewriteRule::new("x", "y", ReplaceMode::All).unwrap();
        assert_eq!(rule.apply("xxx"), "yyy");
    }

    #[test]
    fn later_rules_see_earlier_output() {
        let rules = RuleSet::new(vec![
            RewriteRule::new("a", "b", ReplaceMode::All).unwrap(),
            RewriteRule::new("b", "c", ReplaceMode::All).unwrap(),
        ]);
        assert_eq!(apply_rules("ab", &rules), "cc");
    }

    #[test]
    fn unmatched_text_is_returned_unchanged() {
        let text = "const x = 1;\n";
        assert!(matches!(commonjs().rules()[1].apply(text), Cow::Borrowed(_)));
        assert_eq!(apply_rules(text, &commonjs()), text);
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let err = RewriteRule::new("(", "", ReplaceMode::First).unwrap_err();
        assert!(matches!(err, RewriteError::InvalidPattern { ref pattern, .. } if pattern == "("));
    }

    #[test]
    fn spec_mode_defaults_to_first() {
        let spec: RuleSpec =
            serde_json::from_str(r#"{"pattern": "a", "replacement": "b"}"#).unwrap();
        assert_eq!(spec.mode, ReplaceMode::First);
        assert_eq!(spec.name, None);
    }
}
