//! Vocabulary loader for CSV exports of the concept store.
//!
//! Expected columns: `scheme,uri,pref_label,alt_label,broader`. `alt_label`
//! may hold several labels separated by `;`; `alt_label` and `broader` may be
//! blank.

use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Result, StandardsError};
use crate::vocabulary::Vocabulary;

/// Environment variable naming the default vocabulary export.
pub const VOCABULARY_ENV_VAR: &str = "CCI_VOCABULARY";

const DEFAULT_VOCABULARY_FILE: &str = "cci_vocabulary.csv";

#[derive(Debug, Deserialize)]
struct ConceptRow {
    scheme: String,
    uri: String,
    pref_label: String,
    #[serde(default)]
    alt_label: String,
    #[serde(default)]
    broader: String,
}

/// Path of the vocabulary export used when none is given explicitly.
pub fn default_vocabulary_path() -> PathBuf {
    if let Ok(path) = std::env::var(VOCABULARY_ENV_VAR) {
        return PathBuf::from(path);
    }
    PathBuf::from(DEFAULT_VOCABULARY_FILE)
}

/// Load a vocabulary from a CSV export.
///
/// A file that yields no concepts is treated as an unreachable vocabulary,
/// since tagging against an empty store would report every term as unknown.
pub fn load_vocabulary(path: &Path) -> Result<Vocabulary> {
    let file = std::fs::File::open(path).map_err(|e| StandardsError::io(path, e))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut vocabulary = Vocabulary::new();
    for record in reader.deserialize::<ConceptRow>() {
        let row = record.map_err(|e| StandardsError::csv(path, &e))?;
        if row.uri.is_empty() || row.scheme.is_empty() {
            continue;
        }
        let alt_labels = parse_alt_labels(&row.alt_label);
        let broader = Some(row.broader.as_str()).filter(|b| !b.is_empty());
        vocabulary.add_concept(&row.scheme, &row.uri, &row.pref_label, &alt_labels, broader);
    }

    if vocabulary.is_empty() {
        return Err(StandardsError::EmptyVocabulary {
            path: path.to_path_buf(),
        });
    }

    for (scheme, count) in vocabulary.scheme_sizes() {
        debug!(scheme, count, "loaded concept scheme");
    }
    info!(
        path = %path.display(),
        concepts = vocabulary.len(),
        "vocabulary loaded"
    );
    Ok(vocabulary)
}

/// Parse semicolon-separated alternate labels.
fn parse_alt_labels(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    trimmed
        .split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
