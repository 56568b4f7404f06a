//! Cache Key Module
//!
//! Identifies one cached page under one pagination configuration.

use std::fmt;

// == Cache Key ==
/// Key for a single cached page: source identifier, page number, page size.
///
/// Structural equality with a stable combined hash, so the same logical
/// page always maps to the same entry. The page size participates because
/// the same page number slices the dataset differently per size.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    source_id: String,
    page: usize,
    page_size: usize,
}

impl CacheKey {
    /// Creates a key for `page` of the dataset named by `source_id`.
    pub fn new(source_id: impl Into<String>, page: usize, page_size: usize) -> Self {
        Self {
            source_id: source_id.into(),
            page,
            page_size,
        }
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}@{}", self.source_id, self.page, self.page_size)
    }
}
