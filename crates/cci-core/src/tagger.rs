//! Dataset tagging run.
//!
//! Datasets are processed one at a time in sorted order, their files in
//! sorted order. For every file the facets from the file name and from the
//! file attributes are resolved and merged (attributes win), a DRS stem is
//! built and a realization allocated through the identifier store.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, info_span, warn};

use cci_ingest::{AttributeSource, FileAttributes, FileEnumerator, IngestError, file_sha256};
use cci_model::{Diagnostic, DiagnosticLog, DrsId, Facet, ResolvedFacets, TagSet};
use cci_standards::{FacetSchemes, LocalOverrideTable, VocabularyClient};

use crate::drs::build_stem;
use crate::error::Result;
use crate::filename::parse_file_name;
use crate::resolve::FacetResolver;
use crate::store::HistoricalIdentifierStore;

/// Options for a tagging run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaggerOptions {
    /// Compute a SHA-256 digest of every tagged file.
    pub checksum: bool,
    /// Apply the local override and decomposition tables.
    pub use_local_mappings: bool,
    /// Files examined per dataset, 0 for all.
    pub max_file_count: usize,
}

impl Default for TaggerOptions {
    fn default() -> Self {
        Self {
            checksum: true,
            use_local_mappings: true,
            max_file_count: 0,
        }
    }
}

/// One file contributing to an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    pub dataset: String,
    pub files: usize,
    /// Files that received an identifier.
    pub tagged_files: usize,
    /// Distinct identifiers produced for the dataset.
    pub identifiers: usize,
}

/// Everything a run produced.
#[derive(Debug, Default)]
pub struct RunReport {
    pub identifiers: BTreeMap<DrsId, Vec<FileEntry>>,
    pub tags: BTreeMap<String, TagSet>,
    pub diagnostics: DiagnosticLog,
    pub datasets: Vec<DatasetSummary>,
}

impl RunReport {
    /// `(dataset, term uri)` rows for the tag table.
    pub fn tag_rows(&self) -> Vec<(&str, &str)> {
        self.tags
            .iter()
            .flat_map(|(dataset, tags)| {
                tags.uris()
                    .into_iter()
                    .map(move |uri| (dataset.as_str(), uri))
            })
            .collect()
    }

    pub fn tagged_files(&self) -> usize {
        self.identifiers.values().map(Vec::len).sum()
    }
}

/// Drives a run over a set of datasets.
pub struct Tagger<'a> {
    resolver: FacetResolver<'a>,
    enumerator: &'a dyn FileEnumerator,
    attributes: &'a dyn AttributeSource,
    options: TaggerOptions,
}

impl<'a> Tagger<'a> {
    pub fn new(
        vocabulary: &'a dyn VocabularyClient,
        schemes: &'a FacetSchemes,
        overrides: &'a LocalOverrideTable,
        enumerator: &'a dyn FileEnumerator,
        attributes: &'a dyn AttributeSource,
        options: TaggerOptions,
    ) -> Self {
        Self {
            resolver: FacetResolver::new(vocabulary, schemes, overrides, options.use_local_mappings),
            enumerator,
            attributes,
            options,
        }
    }

    pub fn options(&self) -> TaggerOptions {
        self.options
    }

    /// Tag every dataset, allocating identifiers through `store`.
    pub fn run<I, S>(&self, datasets: I, store: &mut HistoricalIdentifierStore) -> Result<RunReport>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let datasets: BTreeSet<String> = datasets
            .into_iter()
            .map(|dataset| dataset.as_ref().to_string())
            .collect();
        if self.options.max_file_count > 0 {
            info!(
                max_files = self.options.max_file_count,
                datasets = datasets.len(),
                "examining a limited number of files per dataset"
            );
        }

        let mut report = RunReport::default();
        for (index, dataset) in datasets.iter().enumerate() {
            let span = info_span!("dataset", dataset = %dataset, index = index + 1);
            let _guard = span.enter();
            self.process_dataset(dataset, store, &mut report)?;
        }
        info!(
            datasets = report.datasets.len(),
            identifiers = report.identifiers.len(),
            diagnostics = report.diagnostics.len(),
            "tagging finished"
        );
        Ok(report)
    }

    fn process_dataset(
        &self,
        dataset: &str,
        store: &mut HistoricalIdentifierStore,
        report: &mut RunReport,
    ) -> Result<()> {
        let mut summary = DatasetSummary {
            dataset: dataset.to_string(),
            files: 0,
            tagged_files: 0,
            identifiers: 0,
        };
        let files = match self.enumerator.files(dataset, self.options.max_file_count) {
            Ok(files) => files,
            Err(IngestError::DirectoryNotFound { .. }) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "dataset could not be listed");
                report.diagnostics.record(Diagnostic::DatasetUnreadable {
                    dataset: dataset.to_string(),
                });
                report.datasets.push(summary);
                return Ok(());
            }
        };
        info!(files = files.len(), "processing dataset");
        summary.files = files.len();

        if files.is_empty() {
            report.diagnostics.record(Diagnostic::NoQualifyingFiles {
                dataset: dataset.to_string(),
            });
            report.datasets.push(summary);
            return Ok(());
        }

        let mut tags = TagSet::new();
        let mut produced = BTreeSet::new();
        for file in &files {
            if let Some(id) = self.process_file(dataset, file, store, &mut tags, report)? {
                summary.tagged_files += 1;
                produced.insert(id);
            }
        }
        summary.identifiers = produced.len();

        if produced.is_empty() {
            report.diagnostics.record(Diagnostic::NoIdentifiersProduced {
                dataset: dataset.to_string(),
            });
        }
        info!(
            identifiers = summary.identifiers,
            "created {} DRS {}",
            summary.identifiers,
            if summary.identifiers == 1 { "entry" } else { "entries" }
        );
        if !tags.is_empty() {
            report.tags.insert(dataset.to_string(), tags);
        }
        report.datasets.push(summary);
        Ok(())
    }

    fn process_file(
        &self,
        dataset: &str,
        file: &Path,
        store: &mut HistoricalIdentifierStore,
        tags: &mut TagSet,
        report: &mut RunReport,
    ) -> Result<Option<DrsId>> {
        debug!(file = %file.display(), "tagging file");
        let log = &mut report.diagnostics;

        // A bad name still contributes attribute tags and checks; only the stem is skipped.
        let name_facets = match parse_file_name(file) {
            Ok(facets) => Some(facets),
            Err(e) => {
                debug!(error = %e, "file name not parsed, no identifier");
                log.record(Diagnostic::InvalidFilenameFormat {
                    dataset: dataset.to_string(),
                    file_name: e.file_name().to_string(),
                });
                None
            }
        };

        let attributes = match self.attributes.read(file) {
            Ok(attributes) => attributes,
            Err(e) => {
                warn!(file = %file.display(), error = %e, "attribute extraction failed");
                log.record(Diagnostic::AttributeExtractionFailure {
                    dataset: dataset.to_string(),
                    path: file.display().to_string(),
                });
                return Ok(None);
            }
        };
        log_attributes(&attributes);
        if attributes.variables_with_empty_long_name().next().is_some() {
            log.record(Diagnostic::EmptyLongName {
                dataset: dataset.to_string(),
            });
        }

        let mut resolved = match &name_facets {
            Some(facets) => self.resolver.resolve_filename(facets, dataset, log),
            None => ResolvedFacets::new(),
        };
        resolved.merge(self.resolver.resolve_attributes(&attributes, dataset, log));
        tags.absorb(&resolved);

        if name_facets.is_none() {
            return Ok(None);
        }
        let Some(stem) = build_stem(dataset, &resolved, log) else {
            return Ok(None);
        };
        let sha256 = if self.options.checksum {
            match file_sha256(file) {
                Ok(digest) => Some(digest),
                Err(e) => {
                    warn!(file = %file.display(), error = %e, "checksum failed");
                    log.record(Diagnostic::ChecksumFailure {
                        dataset: dataset.to_string(),
                        path: file.display().to_string(),
                    });
                    return Ok(None);
                }
            }
        } else {
            None
        };
        let id = store.allocate(dataset, &stem);
        debug!(identifier = %id, platform = ?resolved.drs_value(Facet::Platform), "file tagged");

        report
            .identifiers
            .entry(id.clone())
            .or_default()
            .push(FileEntry {
                file: file.display().to_string(),
                sha256,
            });
        Ok(Some(id))
    }
}

fn log_attributes(attributes: &FileAttributes) {
    for (name, value) in &attributes.global {
        debug!(attribute = %name, value = %value, "global attribute");
    }
    for (variable, attrs) in &attributes.variables {
        for (name, value) in attrs {
            debug!(%variable, attribute = %name, value = %value, "variable attribute");
        }
    }
}
