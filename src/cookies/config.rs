//! Cookie store configuration.

use crate::cookies::persistence::FileLineStore;
use std::path::PathBuf;

/// Maximum cookies per domain (Chromium default).
pub const MAX_COOKIES_PER_DOMAIN: usize = 50;

/// Maximum total cookies.
/// Chromium uses 3300, but we use a slightly lower limit to keep memory usage predictable.
pub const MAX_COOKIES_TOTAL: usize = 3000;

/// Where cookies live on disk and how many the store keeps.
///
/// The data directory is supplied by the embedding application; the store
/// never resolves platform directories itself.
#[derive(Debug, Clone)]
pub struct CookieStoreConfig {
    /// Directory holding the cookie file.
    pub data_dir: PathBuf,
    /// Cookie file name inside `data_dir`.
    pub file_name: String,
    /// Per-domain limit; the oldest cookie is evicted past it.
    pub max_cookies_per_domain: usize,
    /// Store-wide limit; the oldest cookie is evicted past it.
    pub max_cookies_total: usize,
}

impl Default for CookieStoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            file_name: "cookies".to_string(),
            max_cookies_per_domain: MAX_COOKIES_PER_DOMAIN,
            max_cookies_total: MAX_COOKIES_TOTAL,
        }
    }
}

impl CookieStoreConfig {
    /// Create a config rooted at `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Set the cookie file name.
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    /// Set the per-domain limit. At least one cookie per domain is kept.
    pub fn max_cookies_per_domain(mut self, max: usize) -> Self {
        self.max_cookies_per_domain = max.max(1);
        self
    }

    /// Set the total limit. At least one cookie is kept.
    pub fn max_cookies_total(mut self, max: usize) -> Self {
        self.max_cookies_total = max.max(1);
        self
    }

    /// Full path of the cookie file.
    pub fn cookie_file(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }

    /// Line store backed by [`cookie_file`](Self::cookie_file).
    pub fn line_store(&self) -> FileLineStore {
        FileLineStore::new(self.cookie_file())
    }
}
