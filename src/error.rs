//! Library error type.
//!
//! Every failure a caller can observe is one of these kinds; no error is
//! silently swallowed into a default or zero value. The bootstrap runner is
//! the single place that catches per-replicate errors (it records them as
//! skips instead of propagating).

/// Errors surfaced by decomposition, bootstrap, and aggregation calls.
#[derive(Clone, PartialEq)]
pub enum Error {
    /// The group indicator column does not contain exactly two distinct values.
    Grouping { column: String, distinct: usize },
    /// The benchmark value is absent from the data, leaving one partition empty.
    EmptyGroup { column: String, benchmark: f64 },
    /// The covariate matrix is rank deficient (or otherwise unsolvable).
    RankDeficient { rows: usize, cols: usize },
    /// Unknown or unimplemented reference-coefficient convention.
    UnsupportedConvention { name: String },
    /// Covariate sets differ between grouped subsets or across replicates.
    SchemaMismatch { detail: String },
    /// Aggregation was asked to summarize an empty result set.
    InsufficientData { detail: String },
    /// Explained + unexplained does not reconstruct the gap within tolerance.
    InternalConsistency { gap: f64, reconstructed: f64 },
    /// Requested an entry point with no specified computation.
    NotImplemented { feature: &'static str },
    /// An argument failed validation before any computation started.
    InvalidInput { detail: String },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Grouping { column, distinct } => write!(
                f,
                "There must be exactly two groups, i.e. 2 unique values in column {column} (found {distinct})."
            ),
            Error::EmptyGroup { column, benchmark } => write!(
                f,
                "Benchmark value {benchmark} is not present in column {column}; the benchmark partition is empty."
            ),
            Error::RankDeficient { rows, cols } => write!(
                f,
                "Least-squares fit failed: covariate matrix ({rows}x{cols}) is rank deficient or ill-conditioned."
            ),
            Error::UnsupportedConvention { name } => {
                write!(f, "Unsupported reference-coefficient convention: {name:?}.")
            }
            Error::SchemaMismatch { detail } => write!(f, "Covariate schema mismatch: {detail}"),
            Error::InsufficientData { detail } => write!(f, "Insufficient data: {detail}"),
            Error::InternalConsistency { gap, reconstructed } => write!(
                f,
                "Decomposition identity violated: gap {gap} vs reconstructed {reconstructed}."
            ),
            Error::NotImplemented { feature } => write!(f, "{feature} is not implemented."),
            Error::InvalidInput { detail } => write!(f, "Invalid input: {detail}"),
        }
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

impl std::error::Error for Error {}
