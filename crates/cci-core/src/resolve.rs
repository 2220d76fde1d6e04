//! Resolution of raw facet values against the controlled vocabulary.

use std::collections::BTreeSet;

use tracing::{debug, trace};

use cci_ingest::FileAttributes;
use cci_model::{Diagnostic, DiagnosticLog, Facet, FacetResolution, ResolvedFacets, Term};
use cci_standards::{FacetSchemes, LocalOverrideTable, VocabularyClient};

use crate::filename::FilenameFacets;
use crate::normalize::AttributeNormalizer;

/// Resolved-term count added when a platform candidate only matches a
/// programme or group. Forces the `multi-platform` encoding.
const COARSE_PLATFORM_WEIGHT: usize = 2;

/// Turns raw strings into vocabulary terms, recording what does not resolve.
pub struct FacetResolver<'a> {
    vocabulary: &'a dyn VocabularyClient,
    schemes: &'a FacetSchemes,
    overrides: &'a LocalOverrideTable,
    normalizer: AttributeNormalizer,
    use_local_mappings: bool,
}

impl<'a> FacetResolver<'a> {
    pub fn new(
        vocabulary: &'a dyn VocabularyClient,
        schemes: &'a FacetSchemes,
        overrides: &'a LocalOverrideTable,
        use_local_mappings: bool,
    ) -> Self {
        Self {
            vocabulary,
            schemes,
            overrides,
            normalizer: AttributeNormalizer::new(use_local_mappings),
            use_local_mappings,
        }
    }

    /// Look up one atomic term in the facet's concept scheme.
    ///
    /// A miss is always recorded as term-not-found; with a dataset it is also
    /// recorded as an invalid value for that dataset.
    pub fn resolve_term(
        &self,
        facet: Facet,
        raw: &str,
        dataset: Option<&str>,
        log: &mut DiagnosticLog,
    ) -> Option<Term> {
        let found = self.lookup(facet, raw);
        if found.is_none() {
            log.record(Diagnostic::TermNotFound {
                facet,
                term: raw.to_string(),
            });
            if let Some(dataset) = dataset {
                log.record(Diagnostic::InvalidAttributeValue {
                    dataset: dataset.to_string(),
                    facet,
                    value: raw.to_string(),
                });
            }
        }
        found
    }

    fn lookup(&self, facet: Facet, raw: &str) -> Option<Term> {
        let scheme = self.schemes.scheme(facet)?;
        let mut label = raw.to_lowercase();
        if self.use_local_mappings
            && let Some(mapped) = self.overrides.apply(facet, &label)
        {
            trace!(%facet, from = raw, to = mapped, "local mapping applied");
            label = mapped.to_lowercase();
        }
        self.vocabulary
            .lookup_by_pref_label(scheme, &label)
            .or_else(|| self.vocabulary.lookup_by_alt_label(scheme, &label))
    }

    /// Resolve the four facets carried by a file name.
    pub fn resolve_filename(
        &self,
        facets: &FilenameFacets,
        dataset: &str,
        log: &mut DiagnosticLog,
    ) -> ResolvedFacets {
        let mut resolved = ResolvedFacets::new();
        for (facet, raw) in facets.values() {
            if let Some(term) = self.resolve_term(facet, raw, Some(dataset), log) {
                let label = term.label(facet.drs_label());
                resolved.insert(
                    facet,
                    FacetResolution {
                        drs_value: (!label.is_empty()).then(|| label.to_string()),
                        tags: BTreeSet::from([term.uri]),
                    },
                );
            }
        }
        resolved
    }

    /// Resolve the attribute facets and the product version of one file.
    pub fn resolve_attributes(
        &self,
        attributes: &FileAttributes,
        dataset: &str,
        log: &mut DiagnosticLog,
    ) -> ResolvedFacets {
        let mut resolved = ResolvedFacets::new();
        for facet in Facet::ATTRIBUTE_FACETS {
            let Some(raw) = attributes.global(facet.as_str()) else {
                continue;
            };
            let resolution = self.resolve_attribute(facet, raw, dataset, log);
            if !resolution.is_empty() {
                resolved.insert(facet, resolution);
            }
        }

        if let Some(version) = attributes.global(Facet::ProductVersion.as_str()) {
            resolved.insert(
                Facet::ProductVersion,
                FacetResolution {
                    drs_value: Some(version.to_string()),
                    tags: BTreeSet::new(),
                },
            );
        }
        resolved
    }

    /// Resolve a possibly multi-valued attribute string.
    pub fn resolve_attribute(
        &self,
        facet: Facet,
        raw: &str,
        dataset: &str,
        log: &mut DiagnosticLog,
    ) -> FacetResolution {
        let mut resolution = FacetResolution::default();
        let mut count = 0usize;

        for candidate in self.normalizer.normalize(facet, raw) {
            if let Some(term) = self.resolve_term(facet, &candidate, None, log) {
                count += 1;
                if facet == Facet::Platform {
                    resolution.tags.extend(self.broader_terms(&term.uri));
                }
                resolution.tags.insert(term.uri);
                resolution.drs_value = Some(term.pref_label);
            } else if facet == Facet::Platform {
                let coarse = self.platform_as_programme(&candidate);
                if !coarse.is_empty() {
                    debug!(candidate = %candidate, "platform resolved at a coarser level");
                    if count == 0 {
                        count += COARSE_PLATFORM_WEIGHT;
                    }
                    resolution.tags.extend(coarse);
                }
            }
        }

        if count > 1
            && let Some(multi) = facet.multi_label()
        {
            resolution.drs_value = Some(multi.to_string());
        }

        if resolution.drs_value.is_none() {
            log.record(Diagnostic::InvalidAttributeValue {
                dataset: dataset.to_string(),
                facet,
                value: raw.to_string(),
            });
        }
        resolution
    }

    /// Programme of a platform, and the programme's group if it has one.
    fn broader_terms(&self, platform_uri: &str) -> Vec<String> {
        let mut uris = Vec::new();
        if let Some((_, programme)) = self.vocabulary.broader(platform_uri) {
            if let Some((_, group)) = self.vocabulary.broader(&programme) {
                uris.push(group);
            }
            uris.push(programme);
        }
        uris
    }

    /// Treat an unknown platform as a programme or, failing that, a group label.
    fn platform_as_programme(&self, candidate: &str) -> Vec<String> {
        let label = candidate.to_lowercase();
        let in_scheme = |facet: Facet| {
            self.schemes
                .scheme(facet)
                .and_then(|scheme| self.vocabulary.lookup_by_pref_label(scheme, &label))
        };

        if let Some(programme) = in_scheme(Facet::PlatformProgramme) {
            let mut uris = vec![programme.uri.clone()];
            if let Some((_, group)) = self.vocabulary.broader(&programme.uri) {
                uris.push(group);
            }
            uris
        } else if let Some(group) = in_scheme(Facet::PlatformGroup) {
            vec![group.uri]
        } else {
            Vec::new()
        }
    }
}
