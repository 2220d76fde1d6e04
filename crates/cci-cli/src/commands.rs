use std::collections::BTreeSet;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{info, info_span};

use cci_core::{HistoricalIdentifierStore, Tagger, TaggerOptions, default_store_path};
use cci_ingest::{FsFileEnumerator, JsonSidecarSource, read_dataset_list};
use cci_standards::{FacetSchemes, LocalOverrideTable, default_vocabulary_path, load_vocabulary};

use cci_cli::output::write_outputs;

use crate::cli::{DatasetSource, TagArgs};
use crate::types::TagResult;

pub fn run_mappings() -> Result<()> {
    print!("{}", LocalOverrideTable::builtin());
    Ok(())
}

pub fn run_tag(args: &TagArgs) -> Result<TagResult> {
    let started = Local::now();
    let span = info_span!("tag", output_dir = %args.output_dir.display());
    let _guard = span.enter();

    let vocabulary_path = args
        .vocabulary
        .clone()
        .unwrap_or_else(default_vocabulary_path);
    let vocabulary = load_vocabulary(&vocabulary_path)
        .with_context(|| format!("load vocabulary {}", vocabulary_path.display()))?;
    let schemes = match &args.schemes {
        Some(path) => FacetSchemes::load(path)
            .with_context(|| format!("load concept schemes {}", path.display()))?,
        None => FacetSchemes::default(),
    };
    let overrides = LocalOverrideTable::builtin();

    let datasets = dataset_paths(&args.source)?;
    info!(datasets = datasets.len(), "datasets to tag");

    let store_path = args.drs_store.clone().unwrap_or_else(default_store_path);
    let mut store = HistoricalIdentifierStore::load(&store_path)
        .with_context(|| format!("load identifier store {}", store_path.display()))?;

    let options = TaggerOptions {
        checksum: !args.no_checksum,
        use_local_mappings: !args.no_local_mappings,
        max_file_count: args.file_count,
    };
    let tagger = Tagger::new(
        &vocabulary,
        &schemes,
        &overrides,
        &FsFileEnumerator,
        &JsonSidecarSource,
        options,
    );
    let report = tagger.run(&datasets, &mut store).context("tag datasets")?;

    let outputs = write_outputs(&args.output_dir, &report).context("write results")?;
    store
        .persist(&store_path)
        .with_context(|| format!("save identifier store {}", store_path.display()))?;
    let minted = store.minted().count();
    info!(
        identifiers = report.identifiers.len(),
        minted,
        diagnostics = report.diagnostics.len(),
        "tagging complete"
    );

    Ok(TagResult {
        started,
        finished: Local::now(),
        identifiers: report.identifiers.len(),
        tagged_files: report.tagged_files(),
        diagnostics: report.diagnostics.messages(),
        not_found: report.diagnostics.not_found(),
        datasets: report.datasets,
        outputs,
        drs_store: store_path,
        minted,
    })
}

fn dataset_paths(source: &DatasetSource) -> Result<BTreeSet<String>> {
    if let Some(dataset) = &source.dataset {
        return Ok(BTreeSet::from([dataset.clone()]));
    }
    match &source.file {
        Some(list) => read_dataset_list(list)
            .with_context(|| format!("read dataset list {}", list.display())),
        None => Ok(BTreeSet::new()),
    }
}
