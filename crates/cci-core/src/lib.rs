pub mod drs;
pub mod error;
pub mod filename;
pub mod normalize;
pub mod resolve;
pub mod store;
pub mod tagger;

pub use drs::{allocate_realization, build_stem};
pub use error::{CoreError, Result};
pub use filename::{
    FilenameError, FilenameFacets, FilenameGrammar, PROJECT_MARKER, parse_file_name, parse_name,
};
pub use normalize::AttributeNormalizer;
pub use resolve::FacetResolver;
pub use store::{DEFAULT_DRS_STORE, DRS_STORE_ENV_VAR, HistoricalIdentifierStore, default_store_path};
pub use tagger::{DatasetSummary, FileEntry, RunReport, Tagger, TaggerOptions};
