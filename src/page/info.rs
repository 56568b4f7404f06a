//! Page Info Module
//!
//! Computes a page's position within a dataset from the page number, the
//! total element count and the page size.

use serde::Serialize;

// == Page Info ==
/// Position of one page within a dataset.
///
/// An empty dataset reports a single empty page rather than failing, so
/// callers can always render "page 1 of 1". Page numbers are 1-based;
/// offsets are 0-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    /// The 1-based page number
    pub current_page: usize,
    /// Number of items per page
    pub page_size: usize,
    /// Total number of elements in the dataset
    pub total_elements: usize,
    /// Total number of pages, always at least 1
    pub total_pages: usize,
}

impl PageInfo {
    /// Computes the page position for `current_page`.
    ///
    /// `total_pages` is `ceil(total_elements / page_size)`, clamped to a
    /// minimum of 1 so a zero-element dataset still has one (empty) page.
    /// Whether `current_page` actually lies within `1..=total_pages` is the
    /// caller's check; see [`PaginationService`](crate::PaginationService).
    pub fn new(current_page: usize, total_elements: usize, page_size: usize) -> Self {
        let total_pages = if total_elements == 0 {
            1
        } else {
            total_elements.div_ceil(page_size)
        };

        Self {
            current_page,
            page_size,
            total_elements,
            total_pages,
        }
    }

    /// 0-based index of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.current_page - 1) * self.page_size
    }

    /// 1-based index of the first item on this page, for display.
    pub fn start_index(&self) -> usize {
        self.offset() + 1
    }

    /// 1-based index of the last item on this page, for display.
    ///
    /// Clamped to `total_elements` on the final, possibly short, page.
    pub fn end_index(&self) -> usize {
        (self.offset() + self.page_size).min(self.total_elements)
    }

    /// Whether a page precedes this one.
    pub fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }

    /// Whether a page follows this one.
    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Whether the dataset holds no elements at all.
    pub fn is_empty(&self) -> bool {
        self.total_elements == 0
    }

    pub fn is_first_page(&self) -> bool {
        self.current_page == 1
    }

    pub fn is_last_page(&self) -> bool {
        self.current_page == self.total_pages
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_exact_division() {
        let info = PageInfo::new(1, 20, 5);
        assert_eq!(info.total_pages, 4);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let info = PageInfo::new(1, 23, 5);
        assert_eq!(info.total_pages, 5);
    }

    #[test]
    fn test_empty_dataset_has_one_page() {
        let info = PageInfo::new(1, 0, 10);
        assert_eq!(info.total_pages, 1);
        assert!(info.is_empty());
        assert!(!info.has_previous_page());
        assert!(!info.has_next_page());
        assert_eq!(info.end_index(), 0);
    }

    #[test]
    fn test_offset_and_display_range() {
        let info = PageInfo::new(3, 50, 10);
        assert_eq!(info.offset(), 20);
        assert_eq!(info.start_index(), 21);
        assert_eq!(info.end_index(), 30);
    }

    // pageSize=5, totalElements=23: page 5 holds items 21-23
    #[test]
    fn test_last_partial_page() {
        let info = PageInfo::new(5, 23, 5);
        assert_eq!(info.total_pages, 5);
        assert_eq!(info.offset(), 20);
        assert_eq!(info.start_index(), 21);
        assert_eq!(info.end_index(), 23);
        assert!(!info.has_next_page());
        assert!(info.has_previous_page());
        assert!(info.is_last_page());
    }

    #[test]
    fn test_first_and_last_flags() {
        let first = PageInfo::new(1, 30, 10);
        assert!(first.is_first_page());
        assert!(!first.is_last_page());
        assert!(first.has_next_page());
        assert!(!first.has_previous_page());

        let middle = PageInfo::new(2, 30, 10);
        assert!(middle.has_previous_page());
        assert!(middle.has_next_page());

        let last = PageInfo::new(3, 30, 10);
        assert!(last.is_last_page());
        assert!(!last.has_next_page());
    }

    #[test]
    fn test_single_element_dataset() {
        let info = PageInfo::new(1, 1, 10);
        assert_eq!(info.total_pages, 1);
        assert_eq!(info.start_index(), 1);
        assert_eq!(info.end_index(), 1);
    }

    #[test]
    fn test_serializes_to_json() {
        let info = PageInfo::new(2, 23, 5);
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["current_page"], 2);
        assert_eq!(json["total_pages"], 5);
    }
}
