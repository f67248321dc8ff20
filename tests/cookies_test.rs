use cookiestore::cookies::rawform::parse_set_cookie_header;
use cookiestore::{
    AcceptMode, CanonicalCookie, CookieJar, CookiePolicy, CookieStore, MemoryLineStore,
};
use std::sync::{Arc, RwLock};
use time::{Duration, OffsetDateTime};
use url::Url;

fn store() -> CookieStore<MemoryLineStore, CookiePolicy> {
    CookieStore::new(MemoryLineStore::new(), CookiePolicy::default())
}

fn persistent(name: &str, domain: &str, expires: OffsetDateTime) -> CanonicalCookie {
    let mut c = CanonicalCookie::new(
        name.to_string(),
        "v".to_string(),
        domain.to_string(),
        "/".to_string(),
        OffsetDateTime::now_utc(),
        Some(expires),
    );
    c.host_only = false;
    c
}

#[test]
fn test_parse_and_save() {
    let mut store = store();
    let url = Url::parse("https://example.com/foo").unwrap();
    assert!(store.set_cookies_from_headers(&url, ["foo=bar; Path=/"]));

    let cookies = store.cookies_for_url(&url);
    assert_eq!(cookies.len(), 1);
    assert_eq!(cookies[0].name, "foo");
    assert_eq!(cookies[0].value, "bar");
    assert_eq!(cookies[0].path, "/");
}

#[test]
fn test_domain_matching() {
    let mut store = store();
    let url = Url::parse("https://a.example.com").unwrap();

    store.set_cookies_from_headers(&url, ["host=val", "domain=val; Domain=example.com"]);

    let cookies = store.cookies_for_url(&url);
    assert!(cookies.iter().any(|c| c.name == "host"));
    assert!(cookies.iter().any(|c| c.name == "domain"));

    // Only the domain cookie reaches a sibling host.
    let sibling = Url::parse("https://b.example.com").unwrap();
    let cookies = store.cookies_for_url(&sibling);
    assert_eq!(cookies.len(), 1);
    assert_eq!(cookies[0].name, "domain");
}

#[test]
fn test_path_matching() {
    let mut store = store();
    let url = Url::parse("https://example.com/foo/bar").unwrap();

    store.set_cookies_from_headers(
        &url,
        ["root=val; Path=/", "foo=val; Path=/foo", "baz=val; Path=/baz"],
    );

    let cookies = store.cookies_for_url(&url);
    assert_eq!(cookies.len(), 2);
    // Longest path first.
    assert_eq!(cookies[0].name, "foo");
    assert_eq!(cookies[1].name, "root");
}

#[test]
fn test_secure_flag() {
    let mut store = store();
    let https_url = Url::parse("https://example.com").unwrap();
    let http_url = Url::parse("http://example.com").unwrap();

    store.set_cookies_from_headers(&https_url, ["sec=saved; Secure"]);

    assert_eq!(store.cookies_for_url(&https_url).len(), 1);
    assert_eq!(store.cookies_for_url(&http_url).len(), 0);
}

#[test]
fn test_secure_cookie_from_http_is_rejected() {
    let mut store = store();
    let url = Url::parse("http://example.com").unwrap();
    assert!(!store.set_cookies_from_headers(&url, ["sec=1; Secure"]));
    assert!(store.is_empty());
}

#[test]
fn test_accept_never_rejects_and_leaves_store_unchanged() {
    let policy = Arc::new(RwLock::new(CookiePolicy::default()));
    let mut store = CookieStore::new(MemoryLineStore::new(), Arc::clone(&policy));
    let url = Url::parse("https://example.com/").unwrap();

    assert!(store.set_cookies_from_headers(&url, ["keep=1; Max-Age=3600"]));
    let before = store.all_cookies();

    policy.write().unwrap().accept = AcceptMode::Never;

    let offered = parse_set_cookie_header("new=1; Max-Age=3600");
    assert!(!store.set_cookies_from_url(offered, &url));
    assert_eq!(store.all_cookies(), before);
}

#[test]
fn test_domain_mismatch_returns_false() {
    let mut store = store();
    let url = Url::parse("https://example.com/").unwrap();
    let offered = parse_set_cookie_header("a=1; Domain=other.com");
    assert!(!store.set_cookies_from_url(offered, &url));
    assert!(store.is_empty());
}

#[test]
fn test_public_suffix_domain_returns_false() {
    let mut store = store();
    let url = Url::parse("https://shop.example.co.uk/").unwrap();
    assert!(!store.set_cookies_from_headers(&url, ["a=1; Domain=co.uk"]));
    assert!(store.set_cookies_from_headers(&url, ["a=1; Domain=example.co.uk"]));
}

#[test]
fn test_public_suffix_host_cookie_stays_on_host() {
    let mut store = store();
    let suffix = Url::parse("https://github.io/").unwrap();
    assert!(store.set_cookies_from_headers(&suffix, ["track=1; Domain=github.io"]));

    assert_eq!(store.cookies_for_url(&suffix).len(), 1);
    let sub = Url::parse("https://victim.github.io/").unwrap();
    assert!(store.cookies_for_url(&sub).is_empty());
    assert!(store.iter().all(|c| c.host_only));
}

#[test]
fn test_returns_true_if_any_cookie_set() {
    let mut store = store();
    let url = Url::parse("https://example.com/").unwrap();
    let offered = parse_set_cookie_header("good=1, bad=1; Domain=other.com");
    assert_eq!(offered.len(), 2);

    assert!(store.set_cookies_from_url(offered, &url));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_same_key_overwrites() {
    let mut store = store();
    let url = Url::parse("https://example.com/").unwrap();

    store.set_cookies_from_headers(&url, ["id=1; Path=/; Max-Age=3600"]);
    store.set_cookies_from_headers(&url, ["id=2; Path=/; Max-Age=3600; HttpOnly"]);

    let cookies = store.all_cookies();
    assert_eq!(cookies.len(), 1);
    assert_eq!(cookies[0].value, "2");
    assert!(cookies[0].http_only);
}

#[test]
fn test_expired_offer_deletes_existing() {
    let mut store = store();
    let url = Url::parse("https://example.com/").unwrap();

    store.set_cookies_from_headers(&url, ["id=1; Max-Age=3600"]);
    assert_eq!(store.len(), 1);

    assert!(!store.set_cookies_from_headers(&url, ["id=gone; Max-Age=0"]));
    assert!(store.is_empty());
}

#[test]
fn test_purge_drops_expired_keeps_future_and_session() {
    let now = OffsetDateTime::now_utc();
    let mut store = store();

    let mut session = persistent("c", "example.com", now);
    session.expiration_time = None;

    store.set_all_cookies(vec![
        persistent("a", "example.com", now - Duration::days(1)),
        persistent("b", "example.com", now + Duration::days(365)),
        session,
    ]);

    assert_eq!(store.purge_old_cookies(), 1);

    let mut names: Vec<_> = store.all_cookies().into_iter().map(|c| c.name).collect();
    names.sort();
    assert_eq!(names, ["b", "c"]);
}

#[test]
fn test_session_cookie_survives_any_clock() {
    let now = OffsetDateTime::now_utc();
    let mut store = store();
    let mut session = persistent("c", "example.com", now);
    session.expiration_time = None;
    store.set_all_cookies(vec![session]);

    store.purge_old_cookies_at(now + Duration::days(100_000));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_purge_boundary_is_inclusive() {
    let at = OffsetDateTime::now_utc() + Duration::days(1);
    let mut store = store();
    store.set_all_cookies(vec![persistent("edge", "example.com", at)]);

    assert_eq!(store.purge_old_cookies_at(at), 0);
    assert_eq!(store.purge_old_cookies_at(at + Duration::seconds(1)), 1);
}

#[test]
fn test_purge_is_idempotent() {
    let now = OffsetDateTime::now_utc();
    let mut store = store();
    store.set_all_cookies(vec![
        persistent("a", "example.com", now - Duration::days(1)),
        persistent("b", "example.com", now + Duration::days(1)),
    ]);

    store.purge_old_cookies_at(now);
    let first = store.all_cookies();
    assert_eq!(store.purge_old_cookies_at(now), 0);
    assert_eq!(store.all_cookies(), first);
}

#[test]
fn test_delete_and_clear() {
    let now = OffsetDateTime::now_utc();
    let mut store = store();
    let a = persistent("a", "example.com", now + Duration::days(1));
    store.set_all_cookies(vec![a.clone(), persistent("b", "other.com", now + Duration::days(1))]);

    assert!(store.delete_cookie(&a));
    assert!(!store.delete_cookie(&a));
    assert_eq!(store.len(), 1);

    store.clear();
    assert!(store.is_empty());
}
