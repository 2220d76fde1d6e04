//! CLI argument definitions for the CCI dataset tagger.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "cci-tagger",
    version,
    about = "Tag CCI datasets with DRS identifiers and vocabulary terms",
    long_about = "Tag CCI datasets with DRS identifiers and vocabulary terms.\n\n\
                  Reads file names and file attributes, resolves them against the\n\
                  CCI controlled vocabulary and writes drs.json, tags.csv and error.txt."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for per-file detail and attributes, -vv for trace,
    /// -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Tag one dataset or every dataset listed in a file.
    Tag(TagArgs),

    /// Print the local mappings applied to file metadata before lookup.
    Mappings,
}

#[derive(Args)]
#[group(id = "datasets", required = true, multiple = false)]
pub struct DatasetSource {
    /// Full path to a single dataset directory.
    #[arg(short = 'd', long = "dataset", value_name = "PATH")]
    pub dataset: Option<String>,

    /// File listing dataset directories, one per line.
    #[arg(short = 'f', long = "file", value_name = "LIST")]
    pub file: Option<PathBuf>,
}

#[derive(Parser)]
pub struct TagArgs {
    #[command(flatten)]
    pub source: DatasetSource,

    /// Number of .nc files to examine per dataset (0 for all).
    #[arg(long = "file-count", value_name = "N", default_value_t = 0)]
    pub file_count: usize,

    /// Skip SHA-256 checksums of the tagged files.
    #[arg(long = "no-checksum")]
    pub no_checksum: bool,

    /// Resolve terms exactly as found, without the local mapping tables.
    #[arg(long = "no-local-mappings")]
    pub no_local_mappings: bool,

    /// Vocabulary CSV export (default: $CCI_VOCABULARY or ./cci_vocabulary.csv).
    #[arg(long = "vocabulary", value_name = "CSV")]
    pub vocabulary: Option<PathBuf>,

    /// TOML file mapping facets to concept schemes (default: built-in CCI schemes).
    #[arg(long = "schemes", value_name = "TOML")]
    pub schemes: Option<PathBuf>,

    /// Dataset to identifier mapping kept between runs
    /// (default: $CCI_DRS_STORE or ./ds_drs_mapping.csv).
    #[arg(long = "drs-store", value_name = "CSV")]
    pub drs_store: Option<PathBuf>,

    /// Directory for drs.json, tags.csv and error.txt.
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
