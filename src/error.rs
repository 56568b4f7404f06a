//! Error types for the pagination engine
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Pagination Error Enum ==
/// Unified error type for the pagination engine.
#[derive(Error, Debug)]
pub enum PaginationError {
    /// A page number outside the valid range was requested.
    ///
    /// Carries both the requested page and the current total so callers can
    /// compose a useful message. Never retried automatically; the caller
    /// must supply a corrected page number.
    #[error("Invalid page {requested}: valid pages are 1 to {total_pages}")]
    InvalidPage {
        /// The page number that was requested
        requested: usize,
        /// The number of pages that actually exist
        total_pages: usize,
    },

    /// Impossible settings detected while building a configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Failure surfaced by a data source's fetch or count call
    #[error("Data source failure: {0}")]
    DataSource(#[source] anyhow::Error),

    /// A loader passed to `get_or_compute` failed; nothing was cached
    #[error("Cache load failed: {0}")]
    CacheLoad(#[source] Box<PaginationError>),
}

// == Result Type Alias ==
/// Convenience Result type for the pagination engine.
pub type Result<T> = std::result::Result<T, PaginationError>;
