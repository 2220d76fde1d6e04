use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown facet: {0}")]
    UnknownFacet(String),
    #[error("invalid realization: {0}")]
    InvalidRealization(String),
    #[error("empty DRS stem")]
    EmptyStem,
}

pub type Result<T> = std::result::Result<T, ModelError>;
