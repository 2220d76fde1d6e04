//! Tests for cci-model types.

use cci_model::{Diagnostic, DiagnosticLog, DrsStem, Facet, Realization, Term};

#[test]
fn diagnostic_serializes_with_kind_tag() {
    let diagnostic = Diagnostic::InvalidAttributeValue {
        dataset: "/neodc/esacci/sst".to_string(),
        facet: Facet::Platform,
        value: "Unknown Sat".to_string(),
    };
    let json = serde_json::to_value(&diagnostic).expect("serialize diagnostic");
    assert_eq!(json["kind"], "invalid_attribute_value");
    assert_eq!(json["facet"], "platform");
    assert_eq!(json["value"], "Unknown Sat");
}

#[test]
fn diagnostic_text_matches_error_file_format() {
    let diagnostic = Diagnostic::InvalidFilenameFormat {
        dataset: "/ds".to_string(),
        file_name: "bad.nc".to_string(),
    };
    assert_eq!(
        diagnostic.to_string(),
        "ERROR in /ds, invalid file name format \"bad.nc\""
    );
    let missing = Diagnostic::MissingRequiredFacet {
        dataset: "/ds".to_string(),
        facet: Facet::ProductVersion,
    };
    assert_eq!(missing.to_string(), "ERROR in /ds for product_version, value not found");
}

#[test]
fn logs_merge_without_duplicates() {
    let mut first = DiagnosticLog::new();
    first.record(Diagnostic::EmptyLongName {
        dataset: "/ds".to_string(),
    });
    let mut second = DiagnosticLog::new();
    second.record(Diagnostic::EmptyLongName {
        dataset: "/ds".to_string(),
    });
    second.record(Diagnostic::NoQualifyingFiles {
        dataset: "/empty".to_string(),
    });
    first.extend(second);
    assert_eq!(first.len(), 2);
}

#[test]
fn term_round_trips_through_json() {
    let term = Term::new("http://vocab/sensor/avhrr", "AVHRR", "");
    let json = serde_json::to_string(&term).expect("serialize term");
    let round: Term = serde_json::from_str(&json).expect("deserialize term");
    assert_eq!(round, term);
}

#[test]
fn stem_realization_identifier() {
    let stem = DrsStem::new("esacci.SST.day.L3C.SSTskin.AVHRR.NOAA-19.AVHRR19_G.1-0").unwrap();
    let id = stem.realize(Realization::new(2).unwrap());
    assert_eq!(
        id.as_str(),
        "esacci.SST.day.L3C.SSTskin.AVHRR.NOAA-19.AVHRR19_G.1-0.r2"
    );
    assert_eq!(stem.segments().count(), 8);
}
