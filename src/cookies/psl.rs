//! Public Suffix List (PSL) validation for cookie domain security.
//!
//! Prevents supercookie attacks by rejecting cookies set on public
//! suffixes like `.com`, `.co.uk`, etc.
//!
//! Uses Mozilla's Public Suffix List via the `psl` crate.

use crate::base::error::CookieError;
use crate::cookies::matching::domain_matches;
use psl::{List, Psl};

/// Check if a domain is a public suffix (e.g., "com", "co.uk").
pub fn is_public_suffix(domain: &str) -> bool {
    let domain_lower = domain.to_lowercase();
    let domain_bytes = domain_lower.as_bytes();

    match List.suffix(domain_bytes) {
        Some(suffix) => suffix.as_bytes() == domain_bytes,
        None => false,
    }
}

/// Check whether a server at `url_host` may set a cookie for `cookie_domain`.
///
/// The domain must domain-match the host and must not be a public suffix,
/// unless it is the host itself.
pub fn check_cookie_domain(cookie_domain: &str, url_host: &str) -> Result<(), CookieError> {
    let cookie_domain = cookie_domain.trim_start_matches('.').to_lowercase();
    let url_host = url_host.to_lowercase();

    if cookie_domain == url_host {
        return Ok(());
    }

    if !domain_matches(&cookie_domain, &url_host, false) {
        return Err(CookieError::CookieDomainMismatch {
            domain: cookie_domain,
            host: url_host,
        });
    }

    if is_public_suffix(&cookie_domain) {
        return Err(CookieError::CookiePublicSuffix);
    }

    Ok(())
}

/// Boolean form of [`check_cookie_domain`].
pub fn is_valid_cookie_domain(cookie_domain: &str, url_host: &str) -> bool {
    check_cookie_domain(cookie_domain, url_host).is_ok()
}
