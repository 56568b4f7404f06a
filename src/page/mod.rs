//! Page Value Types
//!
//! Pure, immutable values describing a page's position within a dataset and
//! the sliding navigation window around it. Constructed fresh per request
//! and discarded after use.

mod info;
mod result;
mod window;

// Re-export public types
pub use info::PageInfo;
pub use result::{Metadata, PaginatedResult};
pub use window::NavigationWindow;
