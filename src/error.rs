//! Error types
//!
//! Malformed recipe text is never an error: it degrades to an empty
//! canonical ingredient and is dropped. These variants cover contract
//! violations and the I/O boundary.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("missing required column \"{column}\" (found: {found})")]
    MissingColumn { column: String, found: String },

    #[error("no recipes left after filtering {0}")]
    EmptyDataset(String),

    #[error("invalid job spec: {0}")]
    InvalidSpec(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
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
