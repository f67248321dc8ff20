//! Cookie storage, policy, and persistence.
//!
//! # Architecture
//!
//! This implementation mirrors Chromium's cookie storage split:
//!
//! | Chromium (C++) | cookiestore (Rust) | Responsibility |
//! |----------------|--------------------|----------------|
//! | `net::CookieMonster` | [`CookieStore`](store::CookieStore) | Cookie jar with LRU eviction |
//! | `net::CanonicalCookie` | [`CanonicalCookie`](canonical_cookie::CanonicalCookie) | Single cookie representation |
//! | `net::ParsedCookie` | [`rawform`] | `Set-Cookie` parsing and serialization |
//! | `PersistentCookieStore` | [`LineStore`](persistence::LineStore) | Disk persistence |
//!
//! # Persistence
//!
//! The on-disk format is one `Set-Cookie` record per line. Session cookies
//! are never written, and expired cookies are purged before every save.
//!
//! ```rust,no_run
//! use cookiestore::cookies::config::CookieStoreConfig;
//! use cookiestore::cookies::policy::CookiePolicy;
//! use cookiestore::cookies::store::{CookieJar, CookieStore};
//! use url::Url;
//!
//! let config = CookieStoreConfig::new("/var/lib/myapp");
//! let mut jar = CookieStore::open(&config, CookiePolicy::default());
//!
//! let url = Url::parse("https://example.com/").unwrap();
//! jar.set_cookies_from_headers(&url, ["id=42; Max-Age=3600"]);
//! assert_eq!(jar.cookies_for_url(&url).len(), 1);
//!
//! jar.save()?;
//! # Ok::<(), cookiestore::base::error::CookieError>(())
//! ```

pub mod canonical_cookie;
pub mod config;
pub mod matching;
pub mod persistence;
pub mod policy;
pub mod psl;
pub mod rawform;
pub mod store;
