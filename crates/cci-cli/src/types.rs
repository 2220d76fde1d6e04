use std::path::PathBuf;

use chrono::{DateTime, Local};

use cci_core::DatasetSummary;

use cci_cli::output::OutputPaths;

#[derive(Debug)]
pub struct TagResult {
    pub started: DateTime<Local>,
    pub finished: DateTime<Local>,
    pub datasets: Vec<DatasetSummary>,
    pub identifiers: usize,
    pub tagged_files: usize,
    pub diagnostics: Vec<String>,
    pub not_found: Vec<String>,
    pub outputs: OutputPaths,
    pub drs_store: PathBuf,
    pub minted: usize,
}
