//! Data Source Module
//!
//! Abstraction over fetching slices of an ordered dataset, with blocking and
//! non-blocking access paths.

mod memory;

pub use memory::InMemoryDataSource;

use async_trait::async_trait;

use crate::error::Result;

// == Data Source Trait ==
/// A pageable, ordered dataset.
///
/// Implementations supply a slice of items and a best-effort total count.
/// The count is re-read per request rather than assumed frozen, so a source
/// backed by changing data stays navigable.
///
/// The async methods default to their blocking counterparts, which is the
/// right choice for in-memory sources; implementations backed by real I/O
/// should override them.
#[async_trait]
pub trait DataSource<T>: Send + Sync {
    /// Returns up to `limit` items starting at `offset`.
    ///
    /// An `offset` at or past the end of the dataset yields an empty vec,
    /// not an error.
    fn fetch(&self, offset: usize, limit: usize) -> Result<Vec<T>>;

    /// Returns the total number of items, best-effort consistent with
    /// `fetch`.
    fn count(&self) -> Result<usize>;

    /// Stable identifier for this logical dataset and configuration.
    ///
    /// Used as the cache-key namespace: two sources with the same
    /// identifier are assumed to serve identical pages.
    fn identifier(&self) -> &str;

    /// Non-blocking variant of [`fetch`](DataSource::fetch).
    async fn fetch_async(&self, offset: usize, limit: usize) -> Result<Vec<T>> {
        self.fetch(offset, limit)
    }

    /// Non-blocking variant of [`count`](DataSource::count).
    async fn count_async(&self) -> Result<usize> {
        self.count()
    }
}
