use crate::catalog::Issue;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while loading or interpreting a parameter catalog.
#[derive(Debug, Error)]
pub enum Error {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv output failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unknown data type {0:?} (expected one of int, float)")]
    UnknownDataType(String),

    #[error("unknown distribution {0:?} (expected one of gamma, beta, constant)")]
    UnknownDistribution(String),

    #[error("a value is required")]
    MissingValue,

    #[error("{value:?} is not a valid {expected} value")]
    InvalidValue { value: String, expected: &'static str },

    #[error("catalog integrity violated: {0}")]
    Integrity(Issue),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
