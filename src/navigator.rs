//! Interactive Paginator Module
//!
//! Stateful navigation façade over a [`PaginationService`]: tracks the
//! current result, keeps a bounded back/forward history and notifies
//! registered listeners of every navigation.

use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::warn;

use crate::error::Result;
use crate::page::PaginatedResult;
use crate::service::PaginationService;

/// History entries kept when no explicit capacity is given.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

// == Navigation Events ==
/// The operation that produced a navigation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOp {
    NavigateTo,
    Next,
    Previous,
    First,
    Last,
    Jump,
    Back,
    Forward,
    Refresh,
}

/// Emitted to listeners after each successful navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEvent {
    /// Which operation moved the paginator
    pub operation: NavigationOp,
    /// The page now current
    pub page: usize,
    /// Total pages at the time of the move
    pub total_pages: usize,
}

/// Callback invoked for every navigation event.
pub type NavigationListener = Box<dyn Fn(&NavigationEvent) + Send + Sync>;

// == Navigation History ==
/// Bounded back/forward stack of visited page numbers.
///
/// Pushing after moving back discards the forward branch, as a browser
/// history does. Exceeding capacity drops the oldest entry and the cursor
/// shifts with it.
#[derive(Debug)]
struct NavigationHistory {
    entries: Vec<usize>,
    /// Index of the current entry; meaningful only when entries is non-empty
    cursor: usize,
    capacity: usize,
}

impl NavigationHistory {
    fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    fn push(&mut self, page: usize) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(page);
        if self.entries.len() > self.capacity {
            self.entries.remove(0);
        }
        self.cursor = self.entries.len() - 1;
    }

    fn back(&mut self) -> Option<usize> {
        if self.entries.is_empty() || self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.entries[self.cursor])
    }

    fn forward(&mut self) -> Option<usize> {
        if self.entries.is_empty() || self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.entries[self.cursor])
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

// == Interactive Paginator ==
/// Stateful navigator over a pagination service.
///
/// Starts with no result loaded; any navigation operation transitions it
/// to holding a current result, and it stays usable until dropped.
pub struct InteractivePaginator<T> {
    service: PaginationService<T>,
    current: Option<PaginatedResult<T>>,
    history: NavigationHistory,
    listeners: Vec<NavigationListener>,
}

impl<T> InteractivePaginator<T>
where
    T: Clone + Send + Sync + 'static,
{
    // == Constructors ==
    /// Wraps `service` with the default history capacity.
    pub fn new(service: PaginationService<T>) -> Self {
        Self::with_history_capacity(service, DEFAULT_HISTORY_CAPACITY)
    }

    /// Wraps `service`, keeping at most `capacity` history entries.
    pub fn with_history_capacity(service: PaginationService<T>, capacity: usize) -> Self {
        Self {
            service,
            current: None,
            history: NavigationHistory::new(capacity),
            listeners: Vec::new(),
        }
    }

    // == State ==
    /// The current result, if any navigation has happened yet.
    pub fn current(&self) -> Option<&PaginatedResult<T>> {
        self.current.as_ref()
    }

    /// The service this paginator navigates over.
    pub fn service(&self) -> &PaginationService<T> {
        &self.service
    }

    /// Number of history entries currently held.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Registers a listener for navigation events.
    ///
    /// A listener that panics is caught and logged; it cannot break
    /// navigation or starve other listeners.
    pub fn add_listener(&mut self, listener: impl Fn(&NavigationEvent) + Send + Sync + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // == Navigation Operations ==
    /// Moves to `page`, pushing it onto the history.
    pub fn navigate_to(&mut self, page: usize) -> Result<&PaginatedResult<T>> {
        self.go(page, NavigationOp::NavigateTo, true)
    }

    /// Moves to the page after the current one, or reports `None` at the
    /// end (and when nothing is loaded yet).
    pub fn next(&mut self) -> Result<Option<&PaginatedResult<T>>> {
        let page = match &self.current {
            Some(current) if current.has_next_page() => current.page_number() + 1,
            _ => return Ok(None),
        };
        self.go(page, NavigationOp::Next, true).map(Some)
    }

    /// Moves to the page before the current one, or reports `None` at the
    /// start.
    pub fn previous(&mut self) -> Result<Option<&PaginatedResult<T>>> {
        let page = match &self.current {
            Some(current) if current.has_previous_page() => current.page_number() - 1,
            _ => return Ok(None),
        };
        self.go(page, NavigationOp::Previous, true).map(Some)
    }

    /// Moves to the first page.
    pub fn first(&mut self) -> Result<&PaginatedResult<T>> {
        self.go(1, NavigationOp::First, true)
    }

    /// Moves to the last page, positioned by a fresh count.
    pub fn last(&mut self) -> Result<&PaginatedResult<T>> {
        let last = self.service.total_pages()?;
        self.go(last, NavigationOp::Last, true)
    }

    /// Moves `delta` pages from the current one, clamped to the valid
    /// range. `None` when nothing is loaded yet or the clamp lands on the
    /// current page.
    pub fn jump(&mut self, delta: isize) -> Result<Option<&PaginatedResult<T>>> {
        let target = match &self.current {
            Some(current) => {
                let total = current.page_info.total_pages as isize;
                let target = (current.page_number() as isize + delta).clamp(1, total) as usize;
                if target == current.page_number() {
                    return Ok(None);
                }
                target
            }
            None => return Ok(None),
        };
        self.go(target, NavigationOp::Jump, true).map(Some)
    }

    /// Re-fetches the current page, invalidating its cache entry first so
    /// the data source is consulted again. Does not touch the history.
    pub fn refresh(&mut self) -> Result<Option<&PaginatedResult<T>>> {
        let page = match &self.current {
            Some(current) => current.page_number(),
            None => return Ok(None),
        };
        self.service.invalidate_page(page);
        self.go(page, NavigationOp::Refresh, false).map(Some)
    }

    /// Moves the history cursor back one entry, re-fetching that page.
    /// `None` when there is nothing to go back to.
    pub fn back(&mut self) -> Result<Option<&PaginatedResult<T>>> {
        let Some(page) = self.history.back() else {
            return Ok(None);
        };
        self.go(page, NavigationOp::Back, false).map(Some)
    }

    /// Moves the history cursor forward one entry, re-fetching that page.
    /// `None` when there is nothing to go forward to.
    pub fn forward(&mut self) -> Result<Option<&PaginatedResult<T>>> {
        let Some(page) = self.history.forward() else {
            return Ok(None);
        };
        self.go(page, NavigationOp::Forward, false).map(Some)
    }

    // == Internals ==
    fn go(
        &mut self,
        page: usize,
        operation: NavigationOp,
        push_history: bool,
    ) -> Result<&PaginatedResult<T>> {
        let result = self.service.get_page(page)?;
        if push_history {
            self.history.push(page);
        }

        let event = NavigationEvent {
            operation,
            page,
            total_pages: result.page_info.total_pages,
        };
        self.current = Some(result);
        self.emit(&event);

        Ok(self
            .current
            .as_ref()
            .expect("current result was just stored"))
    }

    fn emit(&self, event: &NavigationEvent) {
        for listener in &self.listeners {
            if catch_unwind(AssertUnwindSafe(|| listener(event))).is_err() {
                warn!(page = event.page, "navigation listener panicked; ignoring");
            }
        }
    }
}
