//! Resolved vocabulary terms and per-file facet resolutions.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::facet::{Facet, LabelKind};

/// A concept from the controlled vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub uri: String,
    pub pref_label: String,
    /// Empty when the concept has no alternate label.
    #[serde(default)]
    pub alt_label: String,
}

impl Term {
    pub fn new(
        uri: impl Into<String>,
        pref_label: impl Into<String>,
        alt_label: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            pref_label: pref_label.into(),
            alt_label: alt_label.into(),
        }
    }

    pub fn label(&self, kind: LabelKind) -> &str {
        match kind {
            LabelKind::Preferred => &self.pref_label,
            LabelKind::Alternate => &self.alt_label,
        }
    }
}

/// Outcome of resolving one facet for one file.
///
/// `drs_value` is the single label that goes into the DRS identifier (or a
/// multi sentinel); `tags` holds every term URI that describes the file,
/// including broader platform programmes and groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetResolution {
    pub drs_value: Option<String>,
    pub tags: BTreeSet<String>,
}

impl FacetResolution {
    pub fn is_empty(&self) -> bool {
        self.drs_value.is_none() && self.tags.is_empty()
    }
}

/// All facet resolutions for a single file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedFacets {
    facets: BTreeMap<Facet, FacetResolution>,
}

impl ResolvedFacets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, facet: Facet, resolution: FacetResolution) {
        self.facets.insert(facet, resolution);
    }

    pub fn get(&self, facet: Facet) -> Option<&FacetResolution> {
        self.facets.get(&facet)
    }

    /// DRS value for the facet, treating an empty string as absent.
    pub fn drs_value(&self, facet: Facet) -> Option<&str> {
        self.facets
            .get(&facet)
            .and_then(|resolution| resolution.drs_value.as_deref())
            .filter(|value| !value.is_empty())
    }

    /// Merge `other` into `self`; entries in `other` replace entries for the same facet.
    pub fn merge(&mut self, other: ResolvedFacets) {
        self.facets.extend(other.facets);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Facet, &FacetResolution)> {
        self.facets.iter().map(|(facet, resolution)| (*facet, resolution))
    }

    pub fn len(&self) -> usize {
        self.facets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }
}

/// Union of all term URIs seen for one dataset, grouped by facet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: BTreeMap<Facet, BTreeSet<String>>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn absorb(&mut self, resolved: &ResolvedFacets) {
        for (facet, resolution) in resolved.iter() {
            if resolution.tags.is_empty() {
                continue;
            }
            self.tags
                .entry(facet)
                .or_default()
                .extend(resolution.tags.iter().cloned());
        }
    }

    pub fn get(&self, facet: Facet) -> Option<&BTreeSet<String>> {
        self.tags.get(&facet)
    }

    /// Term URIs in output order: single-valued facets first, then multi-valued.
    ///
    /// Facets outside those two groups (product version) are never emitted.
    pub fn uris(&self) -> Vec<&str> {
        Facet::SINGLE_VALUED
            .iter()
            .chain(Facet::MULTI_VALUED.iter())
            .filter_map(|facet| self.tags.get(facet))
            .flat_map(|uris| uris.iter().map(String::as_str))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolution(value: &str, tags: &[&str]) -> FacetResolution {
        FacetResolution {
            drs_value: Some(value.to_string()),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn merge_prefers_incoming_entries() {
        let mut base = ResolvedFacets::new();
        base.insert(Facet::Platform, resolution("NOAA-12", &["p:1"]));
        base.insert(Facet::Ecv, resolution("SST", &["e:1"]));

        let mut incoming = ResolvedFacets::new();
        incoming.insert(Facet::Platform, resolution("multi-platform", &["p:1", "p:2"]));
        base.merge(incoming);

        assert_eq!(base.drs_value(Facet::Platform), Some("multi-platform"));
        assert_eq!(base.drs_value(Facet::Ecv), Some("SST"));
        assert_eq!(base.len(), 2);
    }

    #[test]
    fn empty_drs_value_is_absent() {
        let mut facets = ResolvedFacets::new();
        facets.insert(Facet::DataType, resolution("", &["d:1"]));
        assert_eq!(facets.drs_value(Facet::DataType), None);
    }

    #[test]
    fn tag_set_orders_single_before_multi() {
        let mut facets = ResolvedFacets::new();
        facets.insert(Facet::Sensor, resolution("AVHRR", &["s:avhrr"]));
        facets.insert(Facet::ProductString, resolution("AVHRR", &["ps:avhrr"]));
        facets.insert(Facet::ProductVersion, resolution("1.0", &[]));
        facets.insert(Facet::DataType, resolution("SST", &["dt:sst"]));

        let mut tags = TagSet::new();
        tags.absorb(&facets);
        assert_eq!(tags.uris(), vec!["dt:sst", "ps:avhrr", "s:avhrr"]);
    }

    #[test]
    fn tag_set_unions_across_files() {
        let mut first = ResolvedFacets::new();
        first.insert(Facet::Platform, resolution("NOAA-12", &["p:12"]));
        let mut second = ResolvedFacets::new();
        second.insert(Facet::Platform, resolution("NOAA-14", &["p:14"]));

        let mut tags = TagSet::new();
        tags.absorb(&first);
        tags.absorb(&second);
        assert_eq!(tags.get(Facet::Platform).map(BTreeSet::len), Some(2));
    }
}
