//! Error type for the data-loading edges of the crate
//!
//! The simulation core never fails: infeasible scenarios are simply absent from the
//! output. Errors only arise when reading eligibility tables, zone data or client
//! profiles from disk.

use std::path::PathBuf;

/// Errors raised while loading or saving external data
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV data: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown zone label {0:?}")]
    InvalidZone(String),

    #[error("invalid eligibility table {table}: {reason}")]
    InvalidTable { table: &'static str, reason: String },

    #[error("invalid client profile: {0}")]
    InvalidProfile(String),
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
