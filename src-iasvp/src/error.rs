use std::path::PathBuf;

use cuckoo_search::CuckooError;

#[derive(Debug, thiserror::Error)]
pub enum IasvpError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: invalid number '{token}'")]
    Parse { path: PathBuf, token: String },

    #[error("{path}: expected {expected} values, found {got}")]
    Count { path: PathBuf, expected: usize, got: usize },

    #[error(transparent)]
    Search(#[from] CuckooError),
}
