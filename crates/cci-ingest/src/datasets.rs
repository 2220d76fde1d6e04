//! Dataset lists supplied by the catalogue.

use std::collections::BTreeSet;
use std::path::Path;

use crate::error::{IngestError, Result};

/// Read a dataset list: one dataset path per line, blank lines ignored.
///
/// Returns the unique paths in sorted order.
pub fn read_dataset_list(path: &Path) -> Result<BTreeSet<String>> {
    let text = std::fs::read_to_string(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(parse_dataset_list(&text))
}

pub fn parse_dataset_list(text: &str) -> BTreeSet<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
