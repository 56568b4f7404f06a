//! Configuration Module
//!
//! Handles building and validating pagination engine configuration, either
//! programmatically through [`ConfigBuilder`] or from environment variables.

use std::env;
use std::time::Duration;

use crate::error::{PaginationError, Result};

// == Defaults ==
const DEFAULT_PAGE_SIZE: usize = 10;
const DEFAULT_SIDE_PAGES: usize = 2;
const DEFAULT_CACHE_MAX_SIZE: usize = 100;
const DEFAULT_CACHE_TTL_SECS: u64 = 300;
const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 60;

/// Pagination engine configuration.
///
/// Impossible settings are rejected when the configuration is built, before
/// any service is constructed.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of items per page (at least 1)
    pub page_size: usize,
    /// Pages shown on each side of the current page in the navigation window
    pub side_pages: usize,
    /// Whether computed pages are cached
    pub cache_enabled: bool,
    /// Maximum number of cached pages (at least 1)
    pub cache_max_size: usize,
    /// Time-to-live for cached pages
    pub cache_ttl: Duration,
    /// Interval between background sweeps of expired entries
    pub cleanup_interval: Duration,
    /// Whether background prefetching is allowed to spawn tasks
    pub async_enabled: bool,
}

impl Config {
    /// Returns a builder initialized with the default settings.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Creates a Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PAGE_SIZE` - Items per page (default: 10)
    /// - `SIDE_PAGES` - Window radius (default: 2)
    /// - `CACHE_ENABLED` - Enable the page cache (default: true)
    /// - `CACHE_MAX_SIZE` - Maximum cached pages (default: 100)
    /// - `CACHE_TTL_SECS` - Cached page TTL in seconds (default: 300)
    /// - `CLEANUP_INTERVAL_SECS` - Sweep frequency in seconds (default: 60)
    /// - `ASYNC_ENABLED` - Allow background prefetching (default: true)
    pub fn from_env() -> Result<Self> {
        ConfigBuilder {
            page_size: env_parse("PAGE_SIZE", DEFAULT_PAGE_SIZE),
            side_pages: env_parse("SIDE_PAGES", DEFAULT_SIDE_PAGES),
            cache_enabled: env_parse("CACHE_ENABLED", true),
            cache_max_size: env_parse("CACHE_MAX_SIZE", DEFAULT_CACHE_MAX_SIZE),
            cache_ttl: Duration::from_secs(env_parse("CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)),
            cleanup_interval: Duration::from_secs(env_parse(
                "CLEANUP_INTERVAL_SECS",
                DEFAULT_CLEANUP_INTERVAL_SECS,
            )),
            async_enabled: env_parse("ASYNC_ENABLED", true),
        }
        .build()
    }

    /// Width of the navigation window derived from the side-page radius.
    pub fn max_visible(&self) -> usize {
        2 * self.side_pages + 1
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            side_pages: DEFAULT_SIDE_PAGES,
            cache_enabled: true,
            cache_max_size: DEFAULT_CACHE_MAX_SIZE,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            cleanup_interval: Duration::from_secs(DEFAULT_CLEANUP_INTERVAL_SECS),
            async_enabled: true,
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// == Config Builder ==
/// Builder for [`Config`] with fail-fast validation.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    page_size: usize,
    side_pages: usize,
    cache_enabled: bool,
    cache_max_size: usize,
    cache_ttl: Duration,
    cleanup_interval: Duration,
    async_enabled: bool,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        let defaults = Config::default();
        Self {
            page_size: defaults.page_size,
            side_pages: defaults.side_pages,
            cache_enabled: defaults.cache_enabled,
            cache_max_size: defaults.cache_max_size,
            cache_ttl: defaults.cache_ttl,
            cleanup_interval: defaults.cleanup_interval,
            async_enabled: defaults.async_enabled,
        }
    }
}

impl ConfigBuilder {
    /// Sets the number of items per page.
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the navigation window radius.
    pub fn side_pages(mut self, side_pages: usize) -> Self {
        self.side_pages = side_pages;
        self
    }

    /// Enables or disables the page cache.
    pub fn cache_enabled(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    /// Sets the maximum number of cached pages.
    pub fn cache_max_size(mut self, max_size: usize) -> Self {
        self.cache_max_size = max_size;
        self
    }

    /// Sets the TTL applied to cached pages.
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Sets the interval between background sweeps.
    pub fn cleanup_interval(mut self, interval: Duration) -> Self {
        self.cleanup_interval = interval;
        self
    }

    /// Enables or disables background prefetching.
    pub fn async_enabled(mut self, enabled: bool) -> Self {
        self.async_enabled = enabled;
        self
    }

    /// Validates the settings and builds the configuration.
    pub fn build(self) -> Result<Config> {
        if self.page_size < 1 {
            return Err(PaginationError::Configuration(
                "page_size must be at least 1".to_string(),
            ));
        }
        if self.cache_max_size < 1 {
            return Err(PaginationError::Configuration(
                "cache_max_size must be at least 1".to_string(),
            ));
        }
        if self.cache_ttl.is_zero() {
            return Err(PaginationError::Configuration(
                "cache_ttl must be non-zero".to_string(),
            ));
        }

        Ok(Config {
            page_size: self.page_size,
            side_pages: self.side_pages,
            cache_enabled: self.cache_enabled,
            cache_max_size: self.cache_max_size,
            cache_ttl: self.cache_ttl,
            cleanup_interval: self.cleanup_interval,
            async_enabled: self.async_enabled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.side_pages, 2);
        assert!(config.cache_enabled);
        assert_eq!(config.cache_max_size, 100);
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
        assert!(config.async_enabled);
    }

    #[test]
    fn test_max_visible_from_side_pages() {
        let config = Config::builder().side_pages(2).build().unwrap();
        assert_eq!(config.max_visible(), 5);

        let config = Config::builder().side_pages(0).build().unwrap();
        assert_eq!(config.max_visible(), 1);
    }

    #[test]
    fn test_builder_rejects_zero_page_size() {
        let result = Config::builder().page_size(0).build();
        assert!(matches!(result, Err(PaginationError::Configuration(_))));
    }

    #[test]
    fn test_builder_rejects_zero_cache_size() {
        let result = Config::builder().cache_max_size(0).build();
        assert!(matches!(result, Err(PaginationError::Configuration(_))));
    }

    #[test]
    fn test_builder_rejects_zero_ttl() {
        let result = Config::builder().cache_ttl(Duration::ZERO).build();
        assert!(matches!(result, Err(PaginationError::Configuration(_))));
    }

    #[test]
    fn test_builder_overrides() {
        let config = Config::builder()
            .page_size(25)
            .side_pages(3)
            .cache_enabled(false)
            .cache_max_size(10)
            .cache_ttl(Duration::from_secs(30))
            .async_enabled(false)
            .build()
            .unwrap();

        assert_eq!(config.page_size, 25);
        assert_eq!(config.side_pages, 3);
        assert!(!config.cache_enabled);
        assert_eq!(config.cache_max_size, 10);
        assert_eq!(config.cache_ttl, Duration::from_secs(30));
        assert!(!config.async_enabled);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("PAGE_SIZE");
        env::remove_var("SIDE_PAGES");
        env::remove_var("CACHE_ENABLED");
        env::remove_var("CACHE_MAX_SIZE");
        env::remove_var("CACHE_TTL_SECS");
        env::remove_var("CLEANUP_INTERVAL_SECS");
        env::remove_var("ASYNC_ENABLED");

        let config = Config::from_env().unwrap();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.side_pages, 2);
        assert!(config.cache_enabled);
        assert_eq!(config.cache_max_size, 100);
        assert_eq!(config.cleanup_interval, Duration::from_secs(60));
    }
}
