//! Splitting raw attribute strings into atomic candidate terms.
//!
//! Attribute values in the archive are free text: comma separated lists,
//! `NOAA-<12,14>` style ranges, enumerations hidden in parentheses and a few
//! fused instrument names. The fixed decomposition tables live in
//! `cci_standards::overrides`.

use cci_model::Facet;
use cci_standards::{DECOMPOSITIONS, REDUNDANT_FRAGMENTS};

const MERGED_PREFIX: &str = "merged: ";

#[derive(Debug, Clone, Copy)]
pub struct AttributeNormalizer {
    use_local_mappings: bool,
}

impl AttributeNormalizer {
    pub fn new(use_local_mappings: bool) -> Self {
        Self { use_local_mappings }
    }

    /// Split `raw` into trimmed, non-empty candidate strings for `facet`.
    pub fn normalize(&self, facet: Facet, raw: &str) -> Vec<String> {
        let mut value = raw.to_string();
        if self.use_local_mappings {
            if facet != Facet::Institution && value.contains('(') {
                value = parenthesized_alternatives(&value);
            }
            value = value.replace(MERGED_PREFIX, "");
        }

        let separator = if value.contains('<') { ", " } else { "," };
        let mut candidates: Vec<String> = value.split(separator).map(str::to_string).collect();

        for rule in DECOMPOSITIONS
            .iter()
            .filter(|rule| rule.facet == facet && (self.use_local_mappings || !rule.local_mapping))
        {
            if let Some(pos) = candidates.iter().position(|c| c.trim() == rule.token) {
                candidates.remove(pos);
                candidates.extend(rule.expansion.iter().map(|s| s.to_string()));
            }
        }

        if self.use_local_mappings {
            for rule in REDUNDANT_FRAGMENTS.iter().filter(|rule| rule.facet == facet) {
                if rule.triggers.iter().any(|trigger| value.contains(trigger))
                    && let Some(pos) = candidates.iter().position(|c| c.trim() == rule.fragment)
                {
                    candidates.remove(pos);
                }
            }
        }

        candidates
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Rewrite `foo(A,B)bar(C)` as `A,B,C`.
fn parenthesized_alternatives(value: &str) -> String {
    value
        .split(')')
        .filter_map(|part| part.split_once('(').map(|(_, inner)| inner))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapped(facet: Facet, raw: &str) -> Vec<String> {
        AttributeNormalizer::new(true).normalize(facet, raw)
    }

    #[test]
    fn expands_noaa_range() {
        let candidates = mapped(Facet::Platform, "NOAA-<12,14,15,16,17,18>");
        assert_eq!(
            candidates,
            vec!["NOAA-12", "NOAA-14", "NOAA-15", "NOAA-16", "NOAA-17", "NOAA-18"]
        );
        assert!(candidates.iter().all(|c| !c.contains('<')));
    }

    #[test]
    fn expands_ranges_alongside_other_platforms() {
        let candidates = mapped(Facet::Platform, "ERS-<1,2>, ENVISAT");
        assert_eq!(candidates, vec!["ENVISAT", "ERS-1", "ERS-2"]);
    }

    #[test]
    fn platform_ranges_expand_without_local_mappings() {
        let candidates = AttributeNormalizer::new(false).normalize(Facet::Platform, "ERS-<1,2>");
        assert_eq!(candidates, vec!["ERS-1", "ERS-2"]);
    }

    #[test]
    fn parentheses_become_alternatives() {
        assert_eq!(mapped(Facet::Sensor, "foo(A,B)bar(C)"), vec!["A", "B", "C"]);
        assert_eq!(
            mapped(Facet::Platform, "Envisat(ENV) and ERS(ERS2)"),
            vec!["ENV", "ERS2"]
        );
    }

    #[test]
    fn institution_keeps_parentheses() {
        assert_eq!(
            mapped(Facet::Institution, "Royal Netherlands Meteorological Institute (KNMI)"),
            vec!["Royal Netherlands Meteorological Institute (KNMI)"]
        );
    }

    #[test]
    fn strips_merged_prefix() {
        assert_eq!(mapped(Facet::Sensor, "merged: AATSR,ATSR2"), vec!["AATSR", "ATSR2"]);
        assert_eq!(
            AttributeNormalizer::new(false).normalize(Facet::Sensor, "merged: AATSR"),
            vec!["merged: AATSR"]
        );
    }

    #[test]
    fn splits_fused_sensors() {
        assert_eq!(mapped(Facet::Sensor, "MERISAATSR"), vec!["MERIS", "AATSR"]);
        assert_eq!(mapped(Facet::Sensor, "SCIAMACHY, OMI and GOME-2."), vec![
            "SCIAMACHY", "OMI", "GOME-2"
        ]);
        assert_eq!(
            AttributeNormalizer::new(false).normalize(Facet::Sensor, "MERISAATSR"),
            vec!["MERISAATSR"]
        );
    }

    #[test]
    fn drops_redundant_country_suffix() {
        assert_eq!(
            mapped(Facet::Institution, "University of Leicester (UoL), UK"),
            vec!["University of Leicester (UoL)"]
        );
        assert_eq!(mapped(Facet::Institution, "Met Office, UK"), vec!["Met Office", "UK"]);
    }

    #[test]
    fn drops_empty_candidates() {
        assert_eq!(mapped(Facet::Frequency, "daily,, "), vec!["daily"]);
    }
}
