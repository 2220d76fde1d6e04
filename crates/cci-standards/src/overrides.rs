//! Local corrections between file metadata and the vocabulary.
//!
//! Files in the archive spell many terms differently from the vocabulary
//! ("AVHRR_GAC" vs "AVHRR", "MetOpA" vs "Metop-A"). These tables are applied
//! before lookup when local mappings are enabled.

use std::collections::BTreeMap;
use std::fmt;

use cci_model::Facet;

const FREQUENCY: &[(&str, &str)] = &[("daily", "day")];

const INSTITUTION: &[(&str, &str)] = &[
    ("DTU Space - Div. of Geodynamics", "DTU Space"),
    ("DTU Space - Div. of Geodynamics and NERSC", "DTU Space"),
    ("DTU Space - Microwaves and Remote Sensing", "DTU Space"),
    (
        "Deutsches Zentrum fuer Luft- und Raumfahrt (DLR)",
        "Deutsches Zentrum fuer Luft- und Raumfahrt",
    ),
    ("ESACCI", "ESACCI_SST"),
    (
        "Plymouth Marine Laboratory Remote Sensing Group",
        "Plymouth Marine Laboratory",
    ),
    (
        "Royal Netherlands Meteorological Institute (KNMI)",
        "Royal Netherlands Meteorological Institute",
    ),
    (
        "SRON Netherlands Institute for Space Research",
        "Netherlands Institute for Space Research",
    ),
    ("University of Leicester (UoL)", "University of Leicester"),
];

const PROCESSING_LEVEL: &[(&str, &str)] = &[("level-3", "l3")];

const PLATFORM: &[(&str, &str)] = &[
    ("ERS2", "ERS-2"),
    ("ENV", "ENVISAT"),
    ("EOS-AURA", "AURA"),
    ("MetOpA", "Metop-A"),
    ("Nimbus 7", "Nimbus-7"),
    ("orbview-2/seastar", "orbview-2"),
    ("SCISAT", "SCISAT-1"),
];

const SENSOR: &[(&str, &str)] = &[
    ("AMSR-E", "AMSRE"),
    ("ATSR2", "ATSR-2"),
    ("AVHRR GAC", "AVHRR"),
    ("AVHRR_GAC", "AVHRR"),
    ("AVHRR_HRPT", "AVHRR"),
    ("AVHRR_LAC", "AVHRR"),
    ("AVHRR_MERGED", "AVHRR"),
    ("GFO", "GFO-RA"),
    ("MERIS_FRS", "MERIS"),
    ("MERIS_RR", "MERIS"),
    ("MODIS_MERGED", "MODIS"),
    ("RA2", "RA-2"),
    ("SMR_544.6GHz", "SMR"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
struct OverrideEntry {
    from: String,
    to: String,
}

/// Per-facet string substitutions, matched case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalOverrideTable {
    mappings: BTreeMap<Facet, BTreeMap<String, OverrideEntry>>,
}

impl LocalOverrideTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The corrections known to be needed for the CCI archive.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for (facet, entries) in [
            (Facet::Frequency, FREQUENCY),
            (Facet::Institution, INSTITUTION),
            (Facet::ProcessingLevel, PROCESSING_LEVEL),
            (Facet::Platform, PLATFORM),
            (Facet::Sensor, SENSOR),
        ] {
            for (from, to) in entries {
                table.insert(facet, from, to);
            }
        }
        table
    }

    pub fn insert(&mut self, facet: Facet, from: &str, to: &str) {
        self.mappings.entry(facet).or_default().insert(
            from.to_lowercase(),
            OverrideEntry {
                from: from.to_string(),
                to: to.to_string(),
            },
        );
    }

    /// Replacement for `term` within `facet`, if one is defined.
    pub fn apply(&self, facet: Facet, term: &str) -> Option<&str> {
        self.mappings
            .get(&facet)?
            .get(&term.to_lowercase())
            .map(|entry| entry.to.as_str())
    }

    /// Facets that have at least one mapping.
    pub fn facets(&self) -> impl Iterator<Item = Facet> + '_ {
        self.mappings
            .iter()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(facet, _)| *facet)
    }

    /// `(from, to)` pairs for one facet, sorted by lower-cased source.
    pub fn entries(&self, facet: Facet) -> Vec<(&str, &str)> {
        self.mappings
            .get(&facet)
            .map(|entries| {
                entries
                    .values()
                    .map(|entry| (entry.from.as_str(), entry.to.as_str()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl fmt::Display for LocalOverrideTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for facet in self.facets() {
            writeln!(f, "Mappings for {facet}:")?;
            for (from, to) in self.entries(facet) {
                writeln!(f, "\tfrom\t {from}")?;
                writeln!(f, "\tto\t {to}")?;
            }
        }
        Ok(())
    }
}

/// A compound token that stands for several atomic terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decomposition {
    pub facet: Facet,
    pub token: &'static str,
    pub expansion: &'static [&'static str],
    /// Only applied when local mappings are enabled.
    pub local_mapping: bool,
}

pub const DECOMPOSITIONS: &[Decomposition] = &[
    Decomposition {
        facet: Facet::Platform,
        token: "NOAA-<12,14,15,16,17,18>",
        expansion: &["NOAA-12", "NOAA-14", "NOAA-15", "NOAA-16", "NOAA-17", "NOAA-18"],
        local_mapping: false,
    },
    Decomposition {
        facet: Facet::Platform,
        token: "ERS-<1,2>",
        expansion: &["ERS-1", "ERS-2"],
        local_mapping: false,
    },
    Decomposition {
        facet: Facet::Sensor,
        token: "MERISAATSR",
        expansion: &["MERIS", "AATSR"],
        local_mapping: true,
    },
    Decomposition {
        facet: Facet::Sensor,
        token: "OMI and GOME-2.",
        expansion: &["OMI", "GOME-2"],
        local_mapping: true,
    },
];

/// A fragment dropped from a split attribute when the raw value contains a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedundantFragment {
    pub facet: Facet,
    pub triggers: &'static [&'static str],
    pub fragment: &'static str,
}

pub const REDUNDANT_FRAGMENTS: &[RedundantFragment] = &[RedundantFragment {
    facet: Facet::Institution,
    triggers: &["University of Leicester (UoL), UK", "University of Leicester, UK"],
    fragment: "UK",
}];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_matches_case_insensitively() {
        let table = LocalOverrideTable::builtin();
        assert_eq!(table.apply(Facet::Sensor, "avhrr_gac"), Some("AVHRR"));
        assert_eq!(table.apply(Facet::Frequency, "Daily"), Some("day"));
        assert_eq!(table.apply(Facet::Platform, "metopa"), Some("Metop-A"));
        assert_eq!(table.apply(Facet::Sensor, "MetOpA"), None);
        assert_eq!(table.apply(Facet::Ecv, "SST"), None);
    }

    #[test]
    fn display_groups_by_facet() {
        let mut table = LocalOverrideTable::new();
        table.insert(Facet::Frequency, "daily", "day");
        assert_eq!(
            table.to_string(),
            "Mappings for frequency:\n\tfrom\t daily\n\tto\t day\n"
        );
    }

    #[test]
    fn decompositions_only_target_multi_valued_facets() {
        for rule in DECOMPOSITIONS {
            assert!(Facet::MULTI_VALUED.contains(&rule.facet));
            assert!(rule.expansion.len() > 1);
        }
    }
}
