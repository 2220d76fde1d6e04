#![deny(unsafe_code)]

pub mod error;
pub mod overrides;
pub mod schemes;
pub mod vocab_loader;
pub mod vocabulary;

pub use crate::error::{Result, StandardsError};
pub use crate::overrides::{
    DECOMPOSITIONS, Decomposition, LocalOverrideTable, REDUNDANT_FRAGMENTS, RedundantFragment,
};
pub use crate::schemes::{DEFAULT_SCHEMES_TOML, FacetSchemes};
pub use crate::vocab_loader::{VOCABULARY_ENV_VAR, default_vocabulary_path, load_vocabulary};
pub use crate::vocabulary::{Vocabulary, VocabularyClient};
