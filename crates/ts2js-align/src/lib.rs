//! Blank-line realignment for transpiled source.
//!
//! Transpilers collapse blank lines and may rewrite or erase import
//! statements. This crate walks two "exploded" line sequences (both texts
//! formatted at the narrowest line width) in lockstep and rebuilds a text
//! whose content comes from one sequence and whose blank-line layout comes
//! from the other:
//!
//! - **step**: the line classification policy and its named states
//! - **aligner**: the state machine that drives the two cursors
//! - **error**: fatal alignment errors

pub mod aligner;
pub mod error;
pub mod step;

pub use aligner::{Aligner, align, split_lines};
pub use error::AlignError;
pub use step::{IMPORT_KEYWORD, STATEMENT_TERMINATOR, Step, classify, is_import};
