//! In-Memory Data Source
//!
//! A [`DataSource`] over an owned collection. Filtering and sorting happen
//! once at construction; the snapshot is immutable afterwards, so every
//! fetch is a constant-time slice.

use std::cmp::Ordering;

use crate::error::Result;
use crate::source::DataSource;

// == In-Memory Data Source ==
/// Snapshot-backed data source.
#[derive(Debug, Clone)]
pub struct InMemoryDataSource<T> {
    identifier: String,
    items: Vec<T>,
}

impl<T: Clone + Send + Sync> InMemoryDataSource<T> {
    /// Creates a source over `items` as given.
    pub fn new(identifier: impl Into<String>, items: Vec<T>) -> Self {
        Self {
            identifier: identifier.into(),
            items,
        }
    }

    /// Creates a source keeping only items matching `filter`.
    pub fn with_filter(
        identifier: impl Into<String>,
        items: Vec<T>,
        filter: impl Fn(&T) -> bool,
    ) -> Self {
        let items = items.into_iter().filter(|item| filter(item)).collect();
        Self::new(identifier, items)
    }

    /// Creates a source with items ordered by `compare`.
    pub fn with_sort(
        identifier: impl Into<String>,
        items: Vec<T>,
        compare: impl Fn(&T, &T) -> Ordering,
    ) -> Self {
        let mut items = items;
        items.sort_by(&compare);
        Self::new(identifier, items)
    }

    /// Creates a source that filters, then sorts, once at construction.
    pub fn with_filter_and_sort(
        identifier: impl Into<String>,
        items: Vec<T>,
        filter: impl Fn(&T) -> bool,
        compare: impl Fn(&T, &T) -> Ordering,
    ) -> Self {
        let mut items: Vec<T> = items.into_iter().filter(|item| filter(item)).collect();
        items.sort_by(&compare);
        Self::new(identifier, items)
    }

    /// Number of items in the snapshot.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[async_trait::async_trait]
impl<T: Clone + Send + Sync> DataSource<T> for InMemoryDataSource<T> {
    fn fetch(&self, offset: usize, limit: usize) -> Result<Vec<T>> {
        if offset >= self.items.len() {
            return Ok(Vec::new());
        }
        let end = (offset + limit).min(self.items.len());
        Ok(self.items[offset..end].to_vec())
    }

    fn count(&self) -> Result<usize> {
        Ok(self.items.len())
    }

    fn identifier(&self) -> &str {
        &self.identifier
    }
}
