//! Substitution stage.
//!
//! A [`RuleSet`] is an ordered list of regex rewrite rules. [`apply_rules`]
//! runs each rule exactly once, in order, over the current text, so a rule
//! sees whatever the rules before it produced.
//!
//! [`RuleSet::commonjs`] is the default table: it turns ES module imports
//! into `require` calls and drops the `export` from the `main` entry point.

pub mod error;
pub mod rules;

pub use error::RewriteError;
pub use rules::{ReplaceMode, RewriteRule, RuleSet, RuleSpec, apply_rules};
