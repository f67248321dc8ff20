//! # cookiestore
//!
//! A persistent HTTP cookie store for Rust.
//!
//! `cookiestore` keeps an in-memory RFC 6265 cookie jar in sync with a
//! line-oriented text file, enforcing an accept policy on incoming cookies
//! and a retention policy on what reaches disk.
//!
//! ## Features
//!
//! - **Cookie Management**: RFC 6265 domain/path matching with PSL validation
//! - **Persistence**: one `Set-Cookie` record per line; session cookies never hit disk
//! - **Policy**: injected accept mode (`default` / `never`) and store flag
//! - **Lifecycle**: expired-cookie purge, per-domain and global LRU limits
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cookiestore::{CookieJar, CookiePolicy, CookieStore, CookieStoreConfig};
//!
//! let config = CookieStoreConfig::new(data_dir);
//! let mut jar = CookieStore::open(&config, CookiePolicy::default());
//! jar.set_cookies_from_headers(&url, response_set_cookie_headers);
//! // ... at shutdown
//! jar.save()?;
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error types and IO context helpers
//! - [`cookies`] - Cookie storage, parsing, policy, and persistence

pub mod base;
pub mod cookies;

pub use base::error::{CookieError, CookieResult};
pub use cookies::canonical_cookie::{CanonicalCookie, SameSite};
pub use cookies::config::CookieStoreConfig;
pub use cookies::persistence::{FileLineStore, LineStore, MemoryLineStore};
pub use cookies::policy::{AcceptMode, CookiePolicy, PolicyProvider};
pub use cookies::store::{CookieJar, CookieStore};
