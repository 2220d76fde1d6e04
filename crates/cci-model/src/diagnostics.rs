//! Recoverable problems found while tagging.
//!
//! None of these abort a run. They are collected in a [`DiagnosticLog`] that
//! deduplicates by dataset and condition and is flushed once at the end.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

use crate::facet::Facet;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The dataset directory contained no candidate files.
    NoQualifyingFiles { dataset: String },
    /// The dataset directory exists but could not be listed.
    DatasetUnreadable { dataset: String },
    /// Files were found but none produced a DRS identifier.
    NoIdentifiersProduced { dataset: String },
    /// A file name matched neither filename grammar.
    InvalidFilenameFormat { dataset: String, file_name: String },
    /// The attribute source failed for a file.
    AttributeExtractionFailure { dataset: String, path: String },
    /// A file could not be read to compute its checksum.
    ChecksumFailure { dataset: String, path: String },
    /// A variable carries an empty `long_name` attribute.
    EmptyLongName { dataset: String },
    /// A raw value did not resolve to any vocabulary term.
    InvalidAttributeValue {
        dataset: String,
        facet: Facet,
        value: String,
    },
    /// A facet required for the DRS identifier had no value.
    MissingRequiredFacet { dataset: String, facet: Facet },
    /// A candidate term is absent from the facet's concept scheme.
    TermNotFound { facet: Facet, term: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    NoQualifyingFiles,
    DatasetUnreadable,
    NoIdentifiersProduced,
    InvalidFilenameFormat,
    AttributeExtractionFailure,
    ChecksumFailure,
    EmptyLongName,
    InvalidAttributeValue,
    MissingRequiredFacet,
    TermNotFound,
}

/// The part of a diagnostic that decides whether two reports are the same condition.
type DiagnosticKey = (DiagnosticKind, String, Option<Facet>, Option<String>);

impl Diagnostic {
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            Diagnostic::NoQualifyingFiles { .. } => DiagnosticKind::NoQualifyingFiles,
            Diagnostic::DatasetUnreadable { .. } => DiagnosticKind::DatasetUnreadable,
            Diagnostic::NoIdentifiersProduced { .. } => DiagnosticKind::NoIdentifiersProduced,
            Diagnostic::InvalidFilenameFormat { .. } => DiagnosticKind::InvalidFilenameFormat,
            Diagnostic::AttributeExtractionFailure { .. } => {
                DiagnosticKind::AttributeExtractionFailure
            }
            Diagnostic::ChecksumFailure { .. } => DiagnosticKind::ChecksumFailure,
            Diagnostic::EmptyLongName { .. } => DiagnosticKind::EmptyLongName,
            Diagnostic::InvalidAttributeValue { .. } => DiagnosticKind::InvalidAttributeValue,
            Diagnostic::MissingRequiredFacet { .. } => DiagnosticKind::MissingRequiredFacet,
            Diagnostic::TermNotFound { .. } => DiagnosticKind::TermNotFound,
        }
    }

    /// The dataset the diagnostic belongs to, if any.
    pub fn dataset(&self) -> Option<&str> {
        match self {
            Diagnostic::NoQualifyingFiles { dataset }
            | Diagnostic::DatasetUnreadable { dataset }
            | Diagnostic::NoIdentifiersProduced { dataset }
            | Diagnostic::InvalidFilenameFormat { dataset, .. }
            | Diagnostic::AttributeExtractionFailure { dataset, .. }
            | Diagnostic::ChecksumFailure { dataset, .. }
            | Diagnostic::EmptyLongName { dataset }
            | Diagnostic::InvalidAttributeValue { dataset, .. }
            | Diagnostic::MissingRequiredFacet { dataset, .. } => Some(dataset),
            Diagnostic::TermNotFound { .. } => None,
        }
    }

    fn key(&self) -> DiagnosticKey {
        let dataset = self.dataset().unwrap_or_default().to_string();
        match self {
            // One bad file name per dataset is enough.
            Diagnostic::InvalidFilenameFormat { .. } => (self.kind(), dataset, None, None),
            Diagnostic::AttributeExtractionFailure { path, .. }
            | Diagnostic::ChecksumFailure { path, .. } => {
                (self.kind(), dataset, None, Some(path.clone()))
            }
            Diagnostic::InvalidAttributeValue { facet, value, .. } => {
                (self.kind(), dataset, Some(*facet), Some(value.clone()))
            }
            Diagnostic::MissingRequiredFacet { facet, .. } => {
                (self.kind(), dataset, Some(*facet), None)
            }
            Diagnostic::TermNotFound { facet, term } => {
                (self.kind(), dataset, Some(*facet), Some(term.clone()))
            }
            _ => (self.kind(), dataset, None, None),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::NoQualifyingFiles { dataset } => {
                write!(f, "WARNING {dataset}, no .nc files found")
            }
            Diagnostic::DatasetUnreadable { dataset } => {
                write!(f, "ERROR in {dataset}, directory could not be listed")
            }
            Diagnostic::NoIdentifiersProduced { dataset } => {
                write!(f, "ERROR in {dataset}, no DRS entries created")
            }
            Diagnostic::InvalidFilenameFormat { dataset, file_name } => {
                write!(f, "ERROR in {dataset}, invalid file name format \"{file_name}\"")
            }
            Diagnostic::AttributeExtractionFailure { dataset, path } => {
                write!(f, "ERROR in {dataset}, extracting attributes from \"{path}\"")
            }
            Diagnostic::ChecksumFailure { dataset, path } => {
                write!(f, "ERROR in {dataset}, computing checksum of \"{path}\"")
            }
            Diagnostic::EmptyLongName { dataset } => {
                write!(f, "WARNING in {dataset}, long_name value has zero length")
            }
            Diagnostic::InvalidAttributeValue {
                dataset,
                facet,
                value,
            } => write!(f, "ERROR in {dataset} for {facet}, invalid value \"{value}\""),
            Diagnostic::MissingRequiredFacet { dataset, facet } => {
                write!(f, "ERROR in {dataset} for {facet}, value not found")
            }
            Diagnostic::TermNotFound { facet, term } => write!(f, "{facet}: {term}"),
        }
    }
}

/// Append-only, set-semantics collector of diagnostics for a run.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticLog {
    entries: BTreeMap<DiagnosticKey, Diagnostic>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic. Returns `false` if the same condition was already recorded.
    pub fn record(&mut self, diagnostic: Diagnostic) -> bool {
        let key = diagnostic.key();
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, diagnostic);
        true
    }

    /// Record a missing facet unless an invalid value was already reported for it.
    pub fn record_missing_facet(&mut self, dataset: &str, facet: Facet) -> bool {
        if self.has_invalid_value(dataset, facet) {
            return false;
        }
        self.record(Diagnostic::MissingRequiredFacet {
            dataset: dataset.to_string(),
            facet,
        })
    }

    pub fn has_invalid_value(&self, dataset: &str, facet: Facet) -> bool {
        self.entries.values().any(|diagnostic| {
            matches!(
                diagnostic,
                Diagnostic::InvalidAttributeValue { dataset: d, facet: f, .. }
                    if d == dataset && *f == facet
            )
        })
    }

    pub fn extend(&mut self, other: DiagnosticLog) {
        for (key, diagnostic) in other.entries {
            self.entries.entry(key).or_insert(diagnostic);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.values()
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.entries.keys().filter(|key| key.0 == kind).count()
    }

    /// Sorted, deduplicated lines for the diagnostics sink (excludes term-not-found).
    pub fn messages(&self) -> Vec<String> {
        self.lines(|kind| kind != DiagnosticKind::TermNotFound)
    }

    /// Sorted summary of candidate terms missing from the vocabulary.
    pub fn not_found(&self) -> Vec<String> {
        self.lines(|kind| kind == DiagnosticKind::TermNotFound)
    }

    fn lines(&self, keep: impl Fn(DiagnosticKind) -> bool) -> Vec<String> {
        self.entries
            .values()
            .filter(|diagnostic| keep(diagnostic.kind()))
            .map(ToString::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
