//! Navigation Window Module
//!
//! Computes the sliding set of page numbers offered for direct navigation,
//! with ellipsis flags for the ranges hidden on either side.

use serde::Serialize;

// == Navigation Window ==
/// The bounded set of page numbers shown for direct navigation.
///
/// The window is centered on the current page where possible and re-anchored
/// at the dataset boundaries so it always spans
/// `min(total_pages, max_visible)` pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationWindow {
    /// The 1-based current page
    pub current_page: usize,
    /// Total number of pages
    pub total_pages: usize,
    /// Ordered page numbers inside the window
    pub visible_pages: Vec<usize>,
    /// Pages are hidden before the window
    pub show_start_ellipsis: bool,
    /// Pages are hidden after the window
    pub show_end_ellipsis: bool,
}

impl NavigationWindow {
    /// Computes the window of up to `max_visible` pages around `current_page`.
    ///
    /// `max_visible` is clamped to a minimum of 1 so the current page is
    /// always visible.
    pub fn new(current_page: usize, total_pages: usize, max_visible: usize) -> Self {
        let max_visible = max_visible.max(1);

        let (start, end) = if total_pages <= max_visible {
            (1, total_pages.max(1))
        } else {
            let half = max_visible / 2;
            let start = current_page.saturating_sub(half).max(1);
            let end = (start + max_visible - 1).min(total_pages);
            // Near the last page the forward half runs out of room; pull the
            // start back so the window keeps its full width.
            let start = if end - start < max_visible - 1 {
                end.saturating_sub(max_visible - 1).max(1)
            } else {
                start
            };
            (start, end)
        };

        let visible_pages: Vec<usize> = (start..=end).collect();
        let show_start_ellipsis = start > 1;
        let show_end_ellipsis = end < total_pages;

        Self {
            current_page,
            total_pages,
            visible_pages,
            show_start_ellipsis,
            show_end_ellipsis,
        }
    }

    /// Builds a window from a side-page radius: `max_visible = 2*side + 1`.
    pub fn with_side_pages(current_page: usize, total_pages: usize, side_pages: usize) -> Self {
        Self::new(current_page, total_pages, 2 * side_pages + 1)
    }

    /// First page number inside the window.
    pub fn first_visible(&self) -> Option<usize> {
        self.visible_pages.first().copied()
    }

    /// Last page number inside the window.
    pub fn last_visible(&self) -> Option<usize> {
        self.visible_pages.last().copied()
    }

    /// Whether `page` is offered for direct navigation.
    pub fn contains(&self, page: usize) -> bool {
        self.visible_pages.contains(&page)
    }
}
