//! DRS identifier construction.
//!
//! An identifier is `esacci.<ecv>.<frequency>.<level>.<data type>.<sensor>.
//! <platform>.<product string>.<product version>.r<N>`. The realization
//! suffix keeps the identifiers of a dataset stable between runs.

use std::collections::BTreeSet;

use cci_model::{DRS_PREFIX, DiagnosticLog, DrsStem, Facet, Realization, ResolvedFacets};

/// Build the identifier stem for one file.
///
/// Every facet in [`Facet::DRS_ORDER`] must have a non-empty value; each
/// missing one is recorded against `dataset` and the stem is not built.
pub fn build_stem(
    dataset: &str,
    resolved: &ResolvedFacets,
    log: &mut DiagnosticLog,
) -> Option<DrsStem> {
    let mut stem = String::from(DRS_PREFIX);
    let mut complete = true;

    for facet in Facet::DRS_ORDER {
        match resolved.drs_value(facet) {
            Some(value) => {
                stem.push('.');
                stem.push_str(&segment_value(facet, value));
            }
            None => {
                log.record_missing_facet(dataset, facet);
                complete = false;
            }
        }
    }

    if !complete {
        return None;
    }
    DrsStem::new(stem).ok()
}

fn segment_value(facet: Facet, value: &str) -> String {
    let value = value.replace(['.', ' '], "-");
    if facet == Facet::Frequency {
        value.replace("month", "mon").replace("year", "yr")
    } else {
        value
    }
}

/// Pick the realization for `stem` in a dataset.
///
/// An identifier for the same stem already assigned to the dataset is
/// reused. Otherwise the lowest `rN` not present in `known` (every
/// identifier assigned so far, historical or minted this run) is returned.
pub fn allocate_realization(
    stem: &DrsStem,
    prior_for_dataset: &[String],
    known: &BTreeSet<String>,
) -> Realization {
    if let Some(existing) = prior_for_dataset
        .iter()
        .filter_map(|id| stem.suffix_of(id))
        .find_map(|suffix| suffix.parse::<Realization>().ok())
    {
        return existing;
    }

    let mut realization = Realization::FIRST;
    while known.contains(stem.realize(realization).as_str()) {
        realization = realization.next();
    }
    realization
}
