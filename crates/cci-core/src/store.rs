//! The dataset to identifier mapping kept between runs.
//!
//! Stored as headerless `dataset,identifier` CSV lines. A run loads it once,
//! allocates identifiers through it and writes the union back at the end.

use std::collections::{BTreeMap, BTreeSet};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use cci_model::{DrsId, DrsStem};

use crate::drs::allocate_realization;
use crate::error::{CoreError, Result};

/// Environment variable naming the default store location.
pub const DRS_STORE_ENV_VAR: &str = "CCI_DRS_STORE";

/// Store file used when neither a flag nor the environment names one.
pub const DEFAULT_DRS_STORE: &str = "ds_drs_mapping.csv";

pub fn default_store_path() -> PathBuf {
    std::env::var_os(DRS_STORE_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DRS_STORE))
}

#[derive(Debug, Clone, Default)]
pub struct HistoricalIdentifierStore {
    /// Identifiers per dataset, in the order they were loaded or minted.
    by_dataset: BTreeMap<String, Vec<String>>,
    /// Every identifier known, historical or minted this run.
    known: BTreeSet<String>,
    minted: BTreeSet<(String, String)>,
}

impl HistoricalIdentifierStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the store from `path`. A missing file is an empty store.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(path = %path.display(), "identifier store not found, starting empty");
            return Ok(Self::new());
        }
        let file = std::fs::File::open(path).map_err(|source| CoreError::StoreIo {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_reader(file, path)?;
        info!(
            path = %path.display(),
            datasets = store.by_dataset.len(),
            identifiers = store.known.len(),
            "loaded identifier store"
        );
        Ok(store)
    }

    pub fn from_reader(reader: impl Read, origin: &Path) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut store = Self::new();
        for (line, record) in csv_reader.records().enumerate() {
            let record =
                record.map_err(|e| CoreError::store_format(origin, format!("line {}: {e}", line + 1)))?;
            match (record.get(0), record.get(1), record.len()) {
                (Some(""), _, 1) => continue,
                (Some(dataset), Some(identifier), 2)
                    if !dataset.is_empty() && !identifier.is_empty() =>
                {
                    store.insert_prior(dataset, identifier);
                }
                _ => {
                    return Err(CoreError::store_format(
                        origin,
                        format!("line {}: expected `dataset,identifier`", line + 1),
                    ));
                }
            }
        }
        Ok(store)
    }

    fn insert_prior(&mut self, dataset: &str, identifier: &str) {
        let ids = self.by_dataset.entry(dataset.to_string()).or_default();
        if !ids.iter().any(|id| id == identifier) {
            ids.push(identifier.to_string());
        }
        self.known.insert(identifier.to_string());
    }

    /// Identifiers assigned to `dataset`, oldest first.
    pub fn realizations(&self, dataset: &str) -> &[String] {
        self.by_dataset
            .get(dataset)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every identifier known to the store.
    pub fn all_identifiers(&self) -> &BTreeSet<String> {
        &self.known
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.known.contains(identifier)
    }

    /// Identifier for `stem` in `dataset`, reusing a prior assignment or minting a new one.
    pub fn allocate(&mut self, dataset: &str, stem: &DrsStem) -> DrsId {
        let realization = allocate_realization(stem, self.realizations(dataset), &self.known);
        let id = stem.realize(realization);
        if !self.known.contains(id.as_str()) {
            debug!(%dataset, identifier = %id, "minted identifier");
            self.insert_prior(dataset, id.as_str());
            self.minted
                .insert((dataset.to_string(), id.as_str().to_string()));
        }
        id
    }

    /// `(dataset, identifier)` pairs minted since the store was loaded.
    pub fn minted(&self) -> impl Iterator<Item = (&str, &str)> {
        self.minted
            .iter()
            .map(|(dataset, id)| (dataset.as_str(), id.as_str()))
    }

    /// All pairs, sorted by dataset then identifier.
    pub fn pairs(&self) -> BTreeSet<(&str, &str)> {
        self.by_dataset
            .iter()
            .flat_map(|(dataset, ids)| ids.iter().map(move |id| (dataset.as_str(), id.as_str())))
            .collect()
    }

    pub fn write_to(&self, writer: impl Write) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        for (dataset, id) in self.pairs() {
            csv_writer
                .write_record([dataset, id])
                .map_err(|e| CoreError::store_format("<output>", e.to_string()))?;
        }
        csv_writer.flush().map_err(|source| CoreError::StoreIo {
            path: PathBuf::from("<output>"),
            source,
        })
    }

    /// Rewrite `path` with every pair the store holds.
    pub fn persist(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path).map_err(|source| CoreError::StoreIo {
            path: path.to_path_buf(),
            source,
        })?;
        self.write_to(file)?;
        info!(
            path = %path.display(),
            minted = self.minted.len(),
            "identifier store written"
        );
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stem(text: &str) -> DrsStem {
        DrsStem::new(text).unwrap()
    }

    #[test]
    fn parses_pairs_and_skips_blank_lines() {
        let text = "/ds/a,esacci.SST.r1\n\n/ds/b,esacci.SST.r2\n/ds/a,esacci.OC.r1\n";
        let store =
            HistoricalIdentifierStore::from_reader(text.as_bytes(), Path::new("test")).unwrap();
        assert_eq!(store.realizations("/ds/a"), ["esacci.SST.r1", "esacci.OC.r1"]);
        assert_eq!(store.len(), 3);
        assert!(store.realizations("/ds/c").is_empty());
    }

    #[test]
    fn rejects_malformed_lines() {
        let err = HistoricalIdentifierStore::from_reader("/ds/a\n".as_bytes(), Path::new("test"))
            .unwrap_err();
        assert!(matches!(err, CoreError::StoreFormat { .. }));
    }

    #[test]
    fn reuses_prior_identifier_for_dataset() {
        let text = "/ds/a,esacci.SST.day.r3\n";
        let mut store =
            HistoricalIdentifierStore::from_reader(text.as_bytes(), Path::new("test")).unwrap();
        let id = store.allocate("/ds/a", &stem("esacci.SST.day"));
        assert_eq!(id.as_str(), "esacci.SST.day.r3");
        assert_eq!(store.minted().count(), 0);
    }

    #[test]
    fn other_datasets_get_fresh_realizations() {
        let mut store = HistoricalIdentifierStore::new();
        assert_eq!(store.allocate("/ds/a", &stem("esacci.SST")).as_str(), "esacci.SST.r1");
        assert_eq!(store.allocate("/ds/b", &stem("esacci.SST")).as_str(), "esacci.SST.r2");
        assert_eq!(store.allocate("/ds/c", &stem("esacci.SST")).as_str(), "esacci.SST.r3");
        // same dataset, same stem: reused
        assert_eq!(store.allocate("/ds/a", &stem("esacci.SST")).as_str(), "esacci.SST.r1");
        assert_eq!(store.minted().count(), 3);
    }

    #[test]
    fn write_is_sorted_union() {
        let text = "/ds/b,esacci.SST.r1\n";
        let mut store =
            HistoricalIdentifierStore::from_reader(text.as_bytes(), Path::new("test")).unwrap();
        store.allocate("/ds/a", &stem("esacci.OC"));

        let mut out = Vec::new();
        store.write_to(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "/ds/a,esacci.OC.r1\n/ds/b,esacci.SST.r1\n"
        );
    }

    #[test]
    fn persist_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ds_drs_mapping.csv");
        assert!(HistoricalIdentifierStore::load(&path).unwrap().is_empty());

        let mut store = HistoricalIdentifierStore::new();
        store.allocate("/ds/a", &stem("esacci.SST"));
        store.persist(&path).unwrap();

        let reloaded = HistoricalIdentifierStore::load(&path).unwrap();
        assert_eq!(reloaded.pairs(), store.pairs());
        assert!(reloaded.contains("esacci.SST.r1"));
    }
}
