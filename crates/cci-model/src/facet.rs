//! Type-safe enumeration of the metadata facets a dataset file is tagged with.
//!
//! Facets are fixed: each one maps to exactly one concept scheme in the
//! controlled vocabulary (except `product_version`, which has none).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// A metadata category extracted from a file name or a file's attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    DataType,
    /// The CCI project, also called the Essential Climate Variable.
    Ecv,
    Frequency,
    Institution,
    Platform,
    PlatformProgramme,
    PlatformGroup,
    ProcessingLevel,
    ProductString,
    ProductVersion,
    Sensor,
}

/// Which label of a resolved term is used when building a DRS identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    Preferred,
    Alternate,
}

impl Facet {
    pub const ALL: [Facet; 11] = [
        Facet::DataType,
        Facet::Ecv,
        Facet::Frequency,
        Facet::Institution,
        Facet::Platform,
        Facet::PlatformProgramme,
        Facet::PlatformGroup,
        Facet::ProcessingLevel,
        Facet::ProductString,
        Facet::ProductVersion,
        Facet::Sensor,
    ];

    /// Facets read from a file's global attributes and resolved against the vocabulary.
    pub const ATTRIBUTE_FACETS: [Facet; 4] = [
        Facet::Frequency,
        Facet::Institution,
        Facet::Platform,
        Facet::Sensor,
    ];

    /// Facets emitted with their single resolved term in the tag table.
    pub const SINGLE_VALUED: [Facet; 4] = [
        Facet::DataType,
        Facet::Ecv,
        Facet::ProcessingLevel,
        Facet::ProductString,
    ];

    /// Facets that may legitimately enumerate several terms per file.
    pub const MULTI_VALUED: [Facet; 4] = Self::ATTRIBUTE_FACETS;

    /// The facets making up a DRS identifier, in identifier order.
    pub const DRS_ORDER: [Facet; 8] = [
        Facet::Ecv,
        Facet::Frequency,
        Facet::ProcessingLevel,
        Facet::DataType,
        Facet::Sensor,
        Facet::Platform,
        Facet::ProductString,
        Facet::ProductVersion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Facet::DataType => "data_type",
            Facet::Ecv => "ecv",
            Facet::Frequency => "frequency",
            Facet::Institution => "institution",
            Facet::Platform => "platform",
            Facet::PlatformProgramme => "platform_programme",
            Facet::PlatformGroup => "platform_group",
            Facet::ProcessingLevel => "processing_level",
            Facet::ProductString => "product_string",
            Facet::ProductVersion => "product_version",
            Facet::Sensor => "sensor",
        }
    }

    /// Label used for the DRS value once a term for this facet resolves.
    ///
    /// Processing level, project and data type have short alternate labels
    /// ("L3", "SST"); everything else uses the preferred label.
    pub fn drs_label(&self) -> LabelKind {
        match self {
            Facet::ProcessingLevel | Facet::Ecv | Facet::DataType => LabelKind::Alternate,
            _ => LabelKind::Preferred,
        }
    }

    /// Sentinel DRS value used when more than one term resolves for a multi-valued facet.
    pub fn multi_label(&self) -> Option<&'static str> {
        match self {
            Facet::Sensor => Some("multi-sensor"),
            Facet::Platform => Some("multi-platform"),
            Facet::Frequency => Some("multi-frequency"),
            Facet::Institution => Some("multi-institution"),
            _ => None,
        }
    }

    /// Whether the facet is backed by a concept scheme.
    pub fn has_vocabulary(&self) -> bool {
        !matches!(self, Facet::ProductVersion)
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Facet {
    type Err = ModelError;

    /// Parse a facet name (case-insensitive). Accepts `project` for `ecv`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "project" => return Ok(Facet::Ecv),
            "level" => return Ok(Facet::ProcessingLevel),
            _ => {}
        }
        Facet::ALL
            .iter()
            .copied()
            .find(|facet| facet.as_str() == normalized)
            .ok_or_else(|| ModelError::UnknownFacet(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("platform".parse::<Facet>().unwrap(), Facet::Platform);
        assert_eq!("PROJECT".parse::<Facet>().unwrap(), Facet::Ecv);
        assert_eq!(" processing_level ".parse::<Facet>().unwrap(), Facet::ProcessingLevel);
        assert!("colour".parse::<Facet>().is_err());
    }

    #[test]
    fn drs_order_has_eight_facets() {
        assert_eq!(Facet::DRS_ORDER.len(), 8);
        assert_eq!(Facet::DRS_ORDER[0], Facet::Ecv);
        assert_eq!(Facet::DRS_ORDER[7], Facet::ProductVersion);
    }

    #[test]
    fn sentinels_only_for_multi_valued() {
        for facet in Facet::SINGLE_VALUED {
            assert!(facet.multi_label().is_none());
        }
        assert_eq!(Facet::Platform.multi_label(), Some("multi-platform"));
        assert_eq!(Facet::Sensor.multi_label(), Some("multi-sensor"));
    }
}
