//! Library components of the ts2js converter.

pub mod files;
pub mod logging;
pub mod pipeline;
