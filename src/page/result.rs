//! Paginated Result Module
//!
//! The assembled result for one page request: the items, the page position,
//! the navigation window and free-form metadata.

use serde::Serialize;

use crate::page::{NavigationWindow, PageInfo};

// == Metadata ==
/// String-keyed metadata preserving insertion order.
///
/// Consumers render entries in the order they were attached, so a plain
/// hash map is not enough. Inserting an existing key overwrites the value
/// in place without changing its position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Metadata(Vec<(String, String)>);

impl Metadata {
    /// Creates empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites a key, keeping the original position on
    /// overwrite.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Looks up a value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// == Paginated Result ==
/// One fully assembled page of results.
///
/// Immutable once built; cached and returned by value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginatedResult<T> {
    /// The items on this page, in dataset order
    pub items: Vec<T>,
    /// Position of this page within the dataset
    pub page_info: PageInfo,
    /// Sliding window of pages offered for navigation
    pub navigation_window: NavigationWindow,
    /// Free-form metadata, e.g. the source identifier
    pub metadata: Metadata,
}

impl<T> PaginatedResult<T> {
    /// Assembles a result from its parts.
    pub fn new(
        items: Vec<T>,
        page_info: PageInfo,
        navigation_window: NavigationWindow,
        metadata: Metadata,
    ) -> Self {
        Self {
            items,
            page_info,
            navigation_window,
            metadata,
        }
    }

    /// The 1-based page number this result holds.
    pub fn page_number(&self) -> usize {
        self.page_info.current_page
    }

    /// Number of items on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this page holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_next_page(&self) -> bool {
        self.page_info.has_next_page()
    }

    pub fn has_previous_page(&self) -> bool {
        self.page_info.has_previous_page()
    }
}
