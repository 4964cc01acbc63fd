//! Centralized error handling for movie-stats.
//!
//! Every fallible library operation returns [`Result<T>`], whose error type is
//! [`MovieStatsError`]. The two data-level failures the aggregation core can
//! raise are:
//!
//! - [`MovieStatsError::MalformedRecord`]: a record is missing a required field
//!   or carries a non-numeric value where a number is required. A single bad
//!   record invalidates the whole run.
//! - [`MovieStatsError::EmptyCollection`]: an operation that needs at least one
//!   record (mean, median, min/max lookups) was handed none.
//!
//! Values falling outside every histogram band are *not* errors; they are
//! skipped silently by the bucketing engine.
//!
//! ## Context Extension Trait
//!
//! The [`ResultExt`] trait adds `.context()` to any `Result` whose error can be
//! converted into [`MovieStatsError`]:
//!
//! ```no_run
//! use movie_stats::error::ResultExt as _;
//! use std::fs;
//!
//! fn load_raw() -> movie_stats::error::Result<String> {
//!     fs::read_to_string("data/movies.json").context("Failed to load dataset")
//! }
//! ```

use thiserror::Error;

/// Main error type for movie-stats operations.
#[derive(Debug, Error)]
pub enum MovieStatsError {
    /// I/O errors (reading datasets, writing reports)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON syntax or shape errors outside of individual records
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A record is missing a required field or holds a value of the wrong type
    #[error("Malformed record at index {index}: field `{field}` {reason}")]
    MalformedRecord {
        index: usize,
        field: String,
        reason: String,
    },

    /// An operation that needs data was invoked on zero records
    #[error("Cannot compute {operation} over an empty collection")]
    EmptyCollection { operation: &'static str },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Chart rendering errors
    #[error("Chart rendering error: {0}")]
    Chart(String),

    /// Workbook writing errors
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl MovieStatsError {
    pub(crate) fn malformed(index: usize, field: &str, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            index,
            field: field.to_owned(),
            reason: reason.into(),
        }
    }

    pub(crate) fn empty(operation: &'static str) -> Self {
        Self::EmptyCollection { operation }
    }
}

/// Result type alias for movie-stats operations.
pub type Result<T> = std::result::Result<T, MovieStatsError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<MovieStatsError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err: MovieStatsError = e.into();
            MovieStatsError::Other(format!("{}: {}", msg.into(), err))
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err: MovieStatsError = e.into();
            MovieStatsError::Other(format!("{}: {}", f(), err))
        })
    }
}
