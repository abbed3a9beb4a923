//! Error types and result alias for the crate.
//!
//! The generators themselves never fail; [`enum@crate::error::Error`] covers the
//! edges around them: configuration validation, capped shape placement,
//! collection backends and JSON output.
use thiserror::Error;

use crate::shapes::ShapeKind;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no {shape} fits the bounding domain after {attempts} attempts")]
    PlacementExhausted { shape: ShapeKind, attempts: u32 },

    #[error("collection error: {0}")]
    Collection(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}
