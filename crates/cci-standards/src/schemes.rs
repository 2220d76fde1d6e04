//! Facet to concept-scheme configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use cci_model::Facet;

use crate::error::{Result, StandardsError};

/// Scheme URIs of the CCI vocabulary, used when no configuration file is given.
pub const DEFAULT_SCHEMES_TOML: &str = r#"
[schemes]
data_type = "http://vocab-test.ceda.ac.uk/scheme/cci/dataType"
ecv = "http://vocab-test.ceda.ac.uk/scheme/cci/ecv"
frequency = "http://vocab-test.ceda.ac.uk/scheme/cci/freq"
institution = "http://vocab-test.ceda.ac.uk/scheme/cci/org"
platform = "http://vocab-test.ceda.ac.uk/scheme/cci/platform"
platform_programme = "http://vocab-test.ceda.ac.uk/scheme/cci/platformProg"
platform_group = "http://vocab-test.ceda.ac.uk/scheme/cci/platformGrp"
processing_level = "http://vocab-test.ceda.ac.uk/scheme/cci/procLev"
product_string = "http://vocab-test.ceda.ac.uk/scheme/cci/product"
sensor = "http://vocab-test.ceda.ac.uk/scheme/cci/sensor"
"#;

#[derive(Debug, Deserialize)]
struct SchemeFile {
    schemes: BTreeMap<String, String>,
}

/// Concept scheme URI for every facet backed by the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetSchemes {
    schemes: BTreeMap<Facet, String>,
}

impl FacetSchemes {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
        Self::parse(&text, path)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Self::parse(text, Path::new("<inline>"))
    }

    fn parse(text: &str, path: &Path) -> Result<Self> {
        let file: SchemeFile = toml::from_str(text).map_err(|source| StandardsError::Toml {
            path: PathBuf::from(path),
            source,
        })?;

        let mut schemes = BTreeMap::new();
        for (name, uri) in file.schemes {
            let facet: Facet = name
                .parse()
                .map_err(|_| StandardsError::UnknownFacet { name: name.clone() })?;
            schemes.insert(facet, uri);
        }

        for facet in Facet::ALL.iter().filter(|facet| facet.has_vocabulary()) {
            if !schemes.contains_key(facet) {
                return Err(StandardsError::MissingScheme {
                    facet: facet.to_string(),
                });
            }
        }
        Ok(Self { schemes })
    }

    pub fn scheme(&self, facet: Facet) -> Option<&str> {
        self.schemes.get(&facet).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Facet, &str)> {
        self.schemes
            .iter()
            .map(|(facet, uri)| (*facet, uri.as_str()))
    }
}

impl Default for FacetSchemes {
    fn default() -> Self {
        let schemes = toml::from_str::<SchemeFile>(DEFAULT_SCHEMES_TOML)
            .map(|file| {
                file.schemes
                    .into_iter()
                    .filter_map(|(name, uri)| name.parse::<Facet>().ok().map(|facet| (facet, uri)))
                    .collect()
            })
            .unwrap_or_default();
        Self { schemes }
    }
}
