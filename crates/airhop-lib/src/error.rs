use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the airhop library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A dataset file could not be located at the resolved path.
    #[error("dataset file not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the dataset")]
    ProjectDirsUnavailable,

    /// Raised when a dataset row cannot be interpreted.
    #[error("invalid record in {path} at line {line}: {message}")]
    InvalidRecord {
        path: PathBuf,
        line: u64,
        message: String,
    },

    /// Raised when an airport code could not be resolved.
    #[error("unknown airport code: {code}")]
    UnknownAirport { code: String },

    /// Raised when a route references an airport identifier that is not loaded.
    ///
    /// Routes are expected to be filtered by the dataset loader, so reaching
    /// the graph builder with one of these aborts construction.
    #[error("route endpoint {id} does not match any loaded airport")]
    UnknownRouteEndpoint { id: String },

    /// Raised when no route satisfies the search constraints.
    #[error("no route found between {from} and {to}")]
    RouteNotFound { from: String, to: String },

    /// Raised when a query carries an unusable hop budget.
    #[error("hop budget must be at least 1, got {max_hops}")]
    InvalidHopBudget { max_hops: usize },

    /// Wrapper for CSV parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
