//! Error type shared by the search engine, its operators and the Newton solver

/// Errors surfaced by a search run
#[derive(Debug, thiserror::Error)]
pub enum CuckooError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("singular linear system of size {n}: {reason}")]
    SingularSystem { n: usize, reason: String },

    #[error("decomposition did not converge for a {rows}x{cols} matrix")]
    Decomposition { rows: usize, cols: usize },

    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("pipeline requires a refinement collaborator for operator '{0}'")]
    MissingRefinement(String),

    #[error("unknown operator: {0}")]
    UnknownOperator(String),

    #[error("recording failed: {0}")]
    Record(String),
}

impl From<std::io::Error> for CuckooError {
    fn from(err: std::io::Error) -> Self {
        CuckooError::Record(err.to_string())
    }
}

impl From<csv::Error> for CuckooError {
    fn from(err: csv::Error) -> Self {
        CuckooError::Record(err.to_string())
    }
}
