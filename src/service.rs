//! Pagination Service Module
//!
//! Orchestrates page requests: validates the page number, consults the page
//! cache, falls back to the data source, assembles the result and caches it.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::cache::{CacheKey, CacheStats, PageCache};
use crate::config::Config;
use crate::error::{PaginationError, Result};
use crate::page::{Metadata, NavigationWindow, PageInfo, PaginatedResult};
use crate::source::DataSource;
use crate::tasks::spawn_cleanup_task;

// == Pagination Service ==
/// Page-request orchestrator over one data source.
///
/// Page numbers are validated against a fresh count on every cache miss;
/// a dataset that grows or shrinks between calls is re-validated rather
/// than trusted. Cloning is cheap (the source and cache are shared).
pub struct PaginationService<T> {
    source: Arc<dyn DataSource<T>>,
    cache: Option<Arc<PageCache<PaginatedResult<T>>>>,
    config: Config,
}

impl<T> Clone for PaginationService<T> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            cache: self.cache.clone(),
            config: self.config.clone(),
        }
    }
}

impl<T> PaginationService<T>
where
    T: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates a service over `source`; a page cache is attached when the
    /// configuration enables one.
    pub fn new(source: Arc<dyn DataSource<T>>, config: Config) -> Self {
        let cache = config
            .cache_enabled
            .then(|| Arc::new(PageCache::new(config.cache_max_size, config.cache_ttl)));
        Self {
            source,
            cache,
            config,
        }
    }

    // == Get Page ==
    /// Returns page `page`, from the cache when possible.
    ///
    /// On a miss the dataset is re-counted before fetching, so a page
    /// number that was valid a moment ago but exceeds the current total is
    /// rejected with [`PaginationError::InvalidPage`].
    pub fn get_page(&self, page: usize) -> Result<PaginatedResult<T>> {
        if page < 1 {
            return Err(PaginationError::InvalidPage {
                requested: page,
                total_pages: self.total_pages()?,
            });
        }

        let key = self.cache_key(page);
        if let Some(cache) = &self.cache {
            if let Some(result) = cache.get(&key) {
                debug!(%key, "page served from cache");
                return Ok(result);
            }
        }

        let total_elements = self.source.count()?;
        let info = PageInfo::new(page, total_elements, self.config.page_size);
        if page > info.total_pages {
            return Err(PaginationError::InvalidPage {
                requested: page,
                total_pages: info.total_pages,
            });
        }

        let items = self.source.fetch(info.offset(), self.config.page_size)?;
        let result = self.assemble(info, items);
        if let Some(cache) = &self.cache {
            cache.put(key, result.clone());
        }
        Ok(result)
    }

    /// Non-blocking form of [`get_page`](PaginationService::get_page).
    pub async fn get_page_async(&self, page: usize) -> Result<PaginatedResult<T>> {
        if page < 1 {
            return Err(PaginationError::InvalidPage {
                requested: page,
                total_pages: self.total_pages_async().await?,
            });
        }

        let key = self.cache_key(page);
        if let Some(cache) = &self.cache {
            if let Some(result) = cache.get_async(&key).await {
                debug!(%key, "page served from cache");
                return Ok(result);
            }
        }

        let total_elements = self.source.count_async().await?;
        let info = PageInfo::new(page, total_elements, self.config.page_size);
        if page > info.total_pages {
            return Err(PaginationError::InvalidPage {
                requested: page,
                total_pages: info.total_pages,
            });
        }

        let items = self
            .source
            .fetch_async(info.offset(), self.config.page_size)
            .await?;
        let result = self.assemble(info, items);
        if let Some(cache) = &self.cache {
            cache.put_async(key, result.clone()).await;
        }
        Ok(result)
    }

    // == First / Last ==
    /// Returns the first page.
    pub fn get_first_page(&self) -> Result<PaginatedResult<T>> {
        self.get_page(1)
    }

    /// Returns the last page, positioned by a fresh count.
    pub fn get_last_page(&self) -> Result<PaginatedResult<T>> {
        let last = self.total_pages()?;
        self.get_page(last)
    }

    pub async fn get_first_page_async(&self) -> Result<PaginatedResult<T>> {
        self.get_page_async(1).await
    }

    pub async fn get_last_page_async(&self) -> Result<PaginatedResult<T>> {
        let last = self.total_pages_async().await?;
        self.get_page_async(last).await
    }

    // == Next / Previous ==
    /// Returns the page after `current`, or `None` when `current` is last.
    pub fn get_next_page(&self, current: &PaginatedResult<T>) -> Result<Option<PaginatedResult<T>>> {
        if !current.has_next_page() {
            return Ok(None);
        }
        self.get_page(current.page_number() + 1).map(Some)
    }

    /// Returns the page before `current`, or `None` when `current` is first.
    pub fn get_previous_page(
        &self,
        current: &PaginatedResult<T>,
    ) -> Result<Option<PaginatedResult<T>>> {
        if !current.has_previous_page() {
            return Ok(None);
        }
        self.get_page(current.page_number() - 1).map(Some)
    }

    pub async fn get_next_page_async(
        &self,
        current: &PaginatedResult<T>,
    ) -> Result<Option<PaginatedResult<T>>> {
        if !current.has_next_page() {
            return Ok(None);
        }
        self.get_page_async(current.page_number() + 1).await.map(Some)
    }

    pub async fn get_previous_page_async(
        &self,
        current: &PaginatedResult<T>,
    ) -> Result<Option<PaginatedResult<T>>> {
        if !current.has_previous_page() {
            return Ok(None);
        }
        self.get_page_async(current.page_number() - 1).await.map(Some)
    }

    // == Page Ranges ==
    /// Returns pages `start..=end` in order.
    ///
    /// Each page goes through the single-page path so caching applies
    /// uniformly. The batch fails fast: the first page error aborts and is
    /// returned; pages fetched before it remain cached. An inverted range
    /// is rejected as an invalid page request.
    pub fn get_pages(&self, start: usize, end: usize) -> Result<Vec<PaginatedResult<T>>> {
        if start < 1 || start > end {
            return Err(PaginationError::InvalidPage {
                requested: start,
                total_pages: self.total_pages()?,
            });
        }

        let mut results = Vec::with_capacity(end - start + 1);
        for page in start..=end {
            results.push(self.get_page(page)?);
        }
        Ok(results)
    }

    /// Non-blocking form of [`get_pages`](PaginationService::get_pages).
    pub async fn get_pages_async(&self, start: usize, end: usize) -> Result<Vec<PaginatedResult<T>>> {
        if start < 1 || start > end {
            return Err(PaginationError::InvalidPage {
                requested: start,
                total_pages: self.total_pages_async().await?,
            });
        }

        let mut results = Vec::with_capacity(end - start + 1);
        for page in start..=end {
            results.push(self.get_page_async(page).await?);
        }
        Ok(results)
    }

    // == Prefetch ==
    /// Warms the cache for the pages around `current_page`.
    ///
    /// Advisory: each page in `[current_page - radius, current_page +
    /// radius]` except the current one is loaded on a spawned task and any
    /// failure is swallowed. A no-op when caching or async operation is
    /// disabled, or when no runtime is available to spawn onto.
    pub fn prefetch(&self, current_page: usize, radius: usize) {
        if self.cache.is_none() || !self.config.async_enabled {
            return;
        }
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            debug!("prefetch skipped: no async runtime available");
            return;
        };

        let from = current_page.saturating_sub(radius).max(1);
        let to = current_page + radius;
        for page in from..=to {
            if page == current_page {
                continue;
            }
            let service = self.clone();
            handle.spawn(async move {
                if let Err(err) = service.get_page_async(page).await {
                    debug!(page, "prefetch skipped page: {err}");
                }
            });
        }
    }

    // == Invalidation ==
    /// Drops every cached page. A no-op when caching is disabled.
    pub fn invalidate_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.invalidate_all();
        }
    }

    /// Drops the cached entry for `page`. A no-op when caching is disabled.
    pub fn invalidate_page(&self, page: usize) {
        if let Some(cache) = &self.cache {
            cache.invalidate(&self.cache_key(page));
        }
    }

    // == Validation ==
    /// Non-throwing check of `page` against a fresh count.
    ///
    /// A failing count reports `false` rather than erroring.
    pub fn is_valid_page(&self, page: usize) -> bool {
        if page < 1 {
            return false;
        }
        match self.total_pages() {
            Ok(total) => page <= total,
            Err(err) => {
                debug!("count failed during page validation: {err}");
                false
            }
        }
    }

    // == Introspection ==
    /// Number of pages the dataset currently spans, from a fresh count.
    pub fn total_pages(&self) -> Result<usize> {
        let total_elements = self.source.count()?;
        Ok(PageInfo::new(1, total_elements, self.config.page_size).total_pages)
    }

    pub async fn total_pages_async(&self) -> Result<usize> {
        let total_elements = self.source.count_async().await?;
        Ok(PageInfo::new(1, total_elements, self.config.page_size).total_pages)
    }

    /// Statistics snapshot of the page cache, `None` when caching is
    /// disabled.
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(|cache| cache.stats())
    }

    pub fn page_size(&self) -> usize {
        self.config.page_size
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Spawns the periodic expired-entry sweep for this service's cache.
    ///
    /// Returns `None` when caching is disabled. The caller owns the handle
    /// and aborts it on shutdown.
    pub fn start_cache_cleanup(&self) -> Option<JoinHandle<()>> {
        let cache = self.cache.as_ref()?;
        Some(spawn_cleanup_task(
            Arc::clone(cache),
            self.config.cleanup_interval,
        ))
    }

    // == Internals ==
    fn cache_key(&self, page: usize) -> CacheKey {
        CacheKey::new(self.source.identifier(), page, self.config.page_size)
    }

    fn assemble(&self, info: PageInfo, items: Vec<T>) -> PaginatedResult<T> {
        let window = NavigationWindow::with_side_pages(
            info.current_page,
            info.total_pages,
            self.config.side_pages,
        );
        let mut metadata = Metadata::new();
        metadata.insert("source", self.source.identifier());
        PaginatedResult::new(items, info, window, metadata)
    }
}
