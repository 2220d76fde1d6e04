//! Result files written at the end of a run.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use cci_core::{FileEntry, RunReport};
use cci_model::DrsId;

pub const DRS_FILE: &str = "drs.json";
pub const TAGS_FILE: &str = "tags.csv";
pub const ERROR_FILE: &str = "error.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub drs: PathBuf,
    pub tags: PathBuf,
    pub errors: PathBuf,
}

impl OutputPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            drs: dir.join(DRS_FILE),
            tags: dir.join(TAGS_FILE),
            errors: dir.join(ERROR_FILE),
        }
    }
}

/// Write all three result files into `dir`, creating it if needed.
pub fn write_outputs(dir: &Path, report: &RunReport) -> Result<OutputPaths> {
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    let paths = OutputPaths::in_dir(dir);
    write_drs(&paths.drs, &report.identifiers)?;
    write_tags(&paths.tags, &report.tag_rows())?;
    write_errors(&paths.errors, &report.diagnostics.messages())?;
    info!(output_dir = %dir.display(), "results written");
    Ok(paths)
}

/// Identifier table as pretty JSON with sorted keys.
pub fn drs_json(identifiers: &BTreeMap<DrsId, Vec<FileEntry>>) -> Result<String> {
    serde_json::to_string_pretty(identifiers).context("serialize identifiers")
}

pub fn write_drs(path: &Path, identifiers: &BTreeMap<DrsId, Vec<FileEntry>>) -> Result<()> {
    let json = drs_json(identifiers)?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))
}

/// `dataset,uri` rows, no header.
pub fn write_tags(path: &Path, rows: &[(&str, &str)]) -> Result<()> {
    let file = fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    for (dataset, uri) in rows {
        writer
            .write_record([dataset, uri])
            .with_context(|| format!("write {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("write {}", path.display()))
}

pub fn write_errors(path: &Path, messages: &[String]) -> Result<()> {
    let mut file = fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
    for message in messages {
        writeln!(file, "{message}").with_context(|| format!("write {}", path.display()))?;
    }
    Ok(())
}
