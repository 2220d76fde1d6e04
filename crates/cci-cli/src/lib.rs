//! CLI library components for the CCI dataset tagger.

pub mod logging;
pub mod output;
