//! Error type for ingestion, export and settings persistence.
//!
//! The aggregation engine itself never fails; everything here belongs to the
//! file-facing edges of the crate.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader or writer rejected the data.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// A JSON document could not be parsed or produced.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The settings store could not be read or updated.
    #[error("Settings error: {0}")]
    Settings(String),

    /// An operation needed a loaded record collection.
    #[error("No data loaded")]
    NoData,
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
