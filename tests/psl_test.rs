//! Public Suffix List (PSL) integration tests.

use cookiestore::cookies::psl::{check_cookie_domain, is_public_suffix, is_valid_cookie_domain};
use cookiestore::CookieError;

#[test]
fn test_tld_is_public_suffix() {
    assert!(is_public_suffix("com"));
    assert!(is_public_suffix("org"));
    assert!(is_public_suffix("net"));
    assert!(is_public_suffix("co.uk"));
    assert!(is_public_suffix("com.au"));
}

#[test]
fn test_domain_not_public_suffix() {
    assert!(!is_public_suffix("example.com"));
    assert!(!is_public_suffix("google.com"));
    assert!(!is_public_suffix("bbc.co.uk"));
}

#[test]
fn test_cookie_domain_validation() {
    // (cookie_domain, url_host)
    assert!(is_valid_cookie_domain("example.com", "example.com"));
    assert!(is_valid_cookie_domain("example.com", "sub.example.com"));
    assert!(!is_valid_cookie_domain(".com", "example.com"));
    assert!(!is_valid_cookie_domain("other.com", "example.com"));
}

#[test]
fn test_supercookie_prevention() {
    for (domain, host) in [
        ("com", "example.com"),
        ("co.uk", "example.co.uk"),
        ("github.io", "user.github.io"),
    ] {
        assert!(
            matches!(
                check_cookie_domain(domain, host),
                Err(CookieError::CookiePublicSuffix)
            ),
            "{domain} from {host} should be rejected"
        );
    }
}

#[test]
fn test_wildcard_tlds() {
    assert!(is_public_suffix("github.io"));
    assert!(!is_public_suffix("user.github.io"));
}
