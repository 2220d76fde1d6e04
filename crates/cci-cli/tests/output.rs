//! Result files written at the end of a run.

use std::collections::BTreeSet;
use std::fs;

use cci_cli::output::{ERROR_FILE, drs_json, write_outputs};
use cci_core::{FileEntry, RunReport};
use cci_model::{
    Diagnostic, DrsStem, Facet, FacetResolution, Realization, ResolvedFacets, TagSet,
};

fn resolution(uris: &[&str]) -> FacetResolution {
    FacetResolution {
        drs_value: None,
        tags: uris.iter().map(|uri| uri.to_string()).collect::<BTreeSet<_>>(),
    }
}

fn report() -> RunReport {
    let mut report = RunReport::default();
    let id = DrsStem::new("esacci.SST.day.L4.SSTdepth.AVHRR.multi-platform.OSTIA.01")
        .unwrap()
        .realize(Realization::FIRST);
    report.identifiers.insert(
        id,
        vec![
            FileEntry {
                file: "/ds/sst/a.nc".to_string(),
                sha256: Some("9f86d081".to_string()),
            },
            FileEntry {
                file: "/ds/sst/b.nc".to_string(),
                sha256: None,
            },
        ],
    );

    let mut resolved = ResolvedFacets::new();
    resolved.insert(Facet::Sensor, resolution(&["http://vocab.test/sensor/avhrr"]));
    resolved.insert(
        Facet::Platform,
        resolution(&[
            "http://vocab.test/platform/noaa-14",
            "http://vocab.test/platform/noaa-12",
        ]),
    );
    resolved.insert(Facet::Ecv, resolution(&["http://vocab.test/ecv/sst"]));
    let mut tags = TagSet::new();
    tags.absorb(&resolved);
    report.tags.insert("/ds/sst".to_string(), tags);

    report.diagnostics.record(Diagnostic::NoQualifyingFiles {
        dataset: "/ds/empty".to_string(),
    });
    report.diagnostics.record(Diagnostic::TermNotFound {
        facet: Facet::Sensor,
        term: "AVHRR-3".to_string(),
    });
    report
}

#[test]
fn identifier_table_is_pretty_json() {
    let report = report();
    insta::assert_snapshot!(drs_json(&report.identifiers).unwrap(), @r#"
    {
      "esacci.SST.day.L4.SSTdepth.AVHRR.multi-platform.OSTIA.01.r1": [
        {
          "file": "/ds/sst/a.nc",
          "sha256": "9f86d081"
        },
        {
          "file": "/ds/sst/b.nc"
        }
      ]
    }
    "#);
}

#[test]
fn writes_tags_and_errors() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("results");
    let paths = write_outputs(&out, &report()).unwrap();

    insta::assert_snapshot!(fs::read_to_string(&paths.tags).unwrap(), @r"
    /ds/sst,http://vocab.test/ecv/sst
    /ds/sst,http://vocab.test/platform/noaa-12
    /ds/sst,http://vocab.test/platform/noaa-14
    /ds/sst,http://vocab.test/sensor/avhrr
    ");
    assert_eq!(paths.errors, out.join(ERROR_FILE));
    assert_eq!(
        fs::read_to_string(&paths.errors).unwrap(),
        "WARNING /ds/empty, no .nc files found\n"
    );
    assert!(fs::read_to_string(&paths.drs).unwrap().contains("\"file\": \"/ds/sst/b.nc\""));
}
