//! Pageflow - a paginated data caching and navigation engine
//!
//! Slices an arbitrary data source into fixed-size pages, computes page and
//! navigation-window metadata, and caches computed pages behind a bounded,
//! TTL-aware, LRU-evicting store with synchronous and asynchronous access
//! paths.

pub mod cache;
pub mod config;
pub mod error;
pub mod navigator;
pub mod page;
pub mod service;
pub mod source;
pub mod tasks;

pub use cache::{CacheKey, CacheStats, PageCache};
pub use config::{Config, ConfigBuilder};
pub use error::{PaginationError, Result};
pub use navigator::{InteractivePaginator, NavigationEvent, NavigationOp};
pub use page::{Metadata, NavigationWindow, PageInfo, PaginatedResult};
pub use service::PaginationService;
pub use source::{DataSource, InMemoryDataSource};
pub use tasks::spawn_cleanup_task;
