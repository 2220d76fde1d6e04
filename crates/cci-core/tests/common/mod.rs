//! Shared fixtures: a small vocabulary and in-memory file and attribute sources.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use cci_ingest::{AttributeSource, FileAttributes, FileEnumerator, IngestError};
use cci_model::Facet;
use cci_standards::{FacetSchemes, Vocabulary};

pub const BASE: &str = "http://vocab.test/cci";

/// A vocabulary covering the SST example files.
pub fn vocabulary() -> Vocabulary {
    let schemes = FacetSchemes::default();
    let scheme = |facet: Facet| schemes.scheme(facet).expect("scheme").to_string();
    let mut v = Vocabulary::new();
    let mut concept = |facet: Facet, id: &str, pref: &str, alt: &[&str], broader: Option<&str>| {
        let alt: Vec<String> = alt.iter().map(|s| s.to_string()).collect();
        let broader = broader.map(|b| format!("{BASE}/{b}"));
        v.add_concept(
            &scheme(facet),
            &format!("{BASE}/{id}"),
            pref,
            &alt,
            broader.as_deref(),
        );
    };

    concept(Facet::Ecv, "ecv/sst", "sea surface temperature", &["SST"], None);
    concept(Facet::Ecv, "ecv/oc", "ocean colour", &["OC"], None);
    concept(Facet::ProcessingLevel, "procLev/l3", "Level 3", &["L3"], None);
    concept(Facet::ProcessingLevel, "procLev/l4", "Level 4", &["L4"], None);
    concept(Facet::DataType, "dataType/sst", "sea surface temperature data", &["sea_surface_temperature"], None);
    concept(Facet::DataType, "dataType/sstdepth", "SST at depth", &["SSTdepth"], None);
    concept(Facet::ProductString, "product/avhrr", "AVHRR", &[], None);
    concept(Facet::ProductString, "product/ostia", "OSTIA", &[], None);
    concept(Facet::Frequency, "freq/day", "day", &[], None);
    concept(Facet::Frequency, "freq/month", "month", &["monthly"], None);
    concept(Facet::Institution, "org/metoffice", "Met Office", &[], None);
    concept(Facet::Institution, "org/knmi", "Royal Netherlands Meteorological Institute", &["KNMI"], None);
    concept(Facet::PlatformGroup, "platformGrp/noaa", "NOAA", &[], None);
    concept(Facet::PlatformGroup, "platformGrp/esa", "ESA missions", &[], None);
    concept(Facet::PlatformProgramme, "platformProg/poes", "NOAA POES", &[], Some("platformGrp/noaa"));
    concept(Facet::PlatformProgramme, "platformProg/earthwatch", "Earth Watch", &[], None);
    concept(Facet::Platform, "platform/noaa-12", "NOAA-12", &[], Some("platformProg/poes"));
    concept(Facet::Platform, "platform/noaa-14", "NOAA-14", &[], Some("platformProg/poes"));
    concept(Facet::Platform, "platform/envisat", "Envisat", &["ENVISAT"], None);
    concept(Facet::Sensor, "sensor/avhrr", "AVHRR", &[], None);
    concept(Facet::Sensor, "sensor/aatsr", "AATSR", &[], None);
    concept(Facet::Sensor, "sensor/meris", "MERIS", &[], None);
    v
}

pub fn term(id: &str) -> String {
    format!("{BASE}/{id}")
}

/// Datasets and their files, held in memory.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    datasets: BTreeMap<String, Vec<PathBuf>>,
}

impl MemoryCatalog {
    pub fn with_files(mut self, dataset: &str, names: &[&str]) -> Self {
        let files = names
            .iter()
            .map(|name| Path::new(dataset).join(name))
            .collect();
        self.datasets.insert(dataset.to_string(), files);
        self
    }
}

impl FileEnumerator for MemoryCatalog {
    fn files(&self, dataset: &str, max_files: usize) -> cci_ingest::Result<Vec<PathBuf>> {
        let mut files = self
            .datasets
            .get(dataset)
            .cloned()
            .ok_or_else(|| IngestError::DirectoryNotFound {
                path: PathBuf::from(dataset),
            })?;
        files.sort();
        if max_files > 0 {
            files.truncate(max_files);
        }
        Ok(files)
    }
}

/// Attributes per file name; files without an entry fail extraction.
#[derive(Debug, Default)]
pub struct MemoryAttributes {
    by_name: BTreeMap<String, FileAttributes>,
}

impl MemoryAttributes {
    pub fn with(mut self, name: &str, global: &[(&str, &str)]) -> Self {
        let mut attributes = FileAttributes::default();
        for (key, value) in global {
            attributes.global.insert(key.to_string(), value.to_string());
        }
        self.by_name.insert(name.to_string(), attributes.normalized());
        self
    }

    pub fn with_variable(mut self, name: &str, variable: &str, long_name: &str) -> Self {
        if let Some(attributes) = self.by_name.get_mut(name) {
            attributes
                .variables
                .entry(variable.to_string())
                .or_default()
                .insert("long_name".to_string(), long_name.to_string());
        }
        self
    }
}

impl AttributeSource for MemoryAttributes {
    fn read(&self, path: &Path) -> cci_ingest::Result<FileAttributes> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.by_name
            .get(&name)
            .cloned()
            .ok_or_else(|| IngestError::MissingAttributes {
                path: path.to_path_buf(),
            })
    }
}

/// Global attributes of a typical single-platform AVHRR file.
pub fn avhrr_attributes(platform: &str) -> Vec<(&str, &str)> {
    vec![
        ("frequency", "day"),
        ("institution", "Met Office"),
        ("platform", platform),
        ("sensor", "AVHRR"),
        ("product_version", "1.0"),
    ]
}
