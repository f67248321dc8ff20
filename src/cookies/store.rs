use crate::base::error::{CookieError, CookieResult};
use crate::cookies::canonical_cookie::CanonicalCookie;
use crate::cookies::config::CookieStoreConfig;
use crate::cookies::matching::{candidate_domains, default_path, domain_matches, path_matches};
use crate::cookies::persistence::{FileLineStore, LineStore};
use crate::cookies::policy::{AcceptMode, PolicyProvider};
use crate::cookies::{psl, rawform};
use std::collections::BTreeMap;
use time::OffsetDateTime;
use url::{Host, Url};

/// What a cookie jar can do, independent of where cookies are kept.
pub trait CookieJar {
    /// Snapshot of every stored cookie.
    fn all_cookies(&self) -> Vec<CanonicalCookie>;

    /// Replace the whole collection. Later cookies win on a key collision.
    fn set_all_cookies(&mut self, cookies: Vec<CanonicalCookie>);

    /// Cookies to send with a request to `url`.
    fn cookies_for_url(&self, url: &Url) -> Vec<CanonicalCookie>;

    /// Store cookies a response from `url` offered.
    /// Returns true if one or more cookies were set.
    fn set_cookies_from_url(&mut self, cookies: Vec<CanonicalCookie>, url: &Url) -> bool;
}

/// Persistent cookie jar.
///
/// Loaded once from its [`LineStore`] on construction and written back only
/// by [`save`](Self::save). Both the accept decision and the save decision
/// consult the [`PolicyProvider`] at call time.
///
/// Mutation takes `&mut self`. Callers that set cookies and save from
/// different threads wrap the store in a `Mutex`.
pub struct CookieStore<S: LineStore, P: PolicyProvider> {
    // Map<Domain, List<Cookie>>
    store: BTreeMap<String, Vec<CanonicalCookie>>,
    lines: S,
    policy: P,
    max_per_domain: usize,
    max_total: usize,
}

impl<P: PolicyProvider> CookieStore<FileLineStore, P> {
    /// Open the cookie file described by `config`.
    pub fn open(config: &CookieStoreConfig, policy: P) -> Self {
        Self::with_config(config.line_store(), policy, config)
    }
}

impl<S: LineStore, P: PolicyProvider> CookieStore<S, P> {
    pub fn new(lines: S, policy: P) -> Self {
        Self::with_config(lines, policy, &CookieStoreConfig::default())
    }

    /// Load every persisted line. Unparseable lines are skipped and a failed
    /// load leaves the store empty.
    pub fn with_config(mut lines: S, policy: P, config: &CookieStoreConfig) -> Self {
        let raw = match lines.load() {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load persisted cookies, starting empty");
                Vec::new()
            }
        };

        let now = OffsetDateTime::now_utc();
        let mut cookies = Vec::new();
        for (idx, line) in raw.iter().enumerate() {
            let parsed = rawform::parse_cookies_at(line, now);
            if parsed.is_empty() {
                tracing::debug!(line = idx + 1, "skipping cookie line without cookies");
            }
            // A stored cookie without a domain can never be sent anywhere.
            cookies.extend(parsed.into_iter().filter(|c| !c.domain.is_empty()));
        }

        let mut store = Self {
            store: BTreeMap::new(),
            lines,
            policy,
            max_per_domain: config.max_cookies_per_domain.max(1),
            max_total: config.max_cookies_total.max(1),
        };
        store.set_all_cookies(cookies);

        tracing::debug!(lines = raw.len(), cookies = store.len(), "loaded persisted cookies");
        store
    }

    /// Drop every non-session cookie that expired before now.
    /// Returns the number of cookies removed.
    pub fn purge_old_cookies(&mut self) -> usize {
        self.purge_old_cookies_at(OffsetDateTime::now_utc())
    }

    /// Drop every non-session cookie whose expiration is strictly before `now`.
    pub fn purge_old_cookies_at(&mut self, now: OffsetDateTime) -> usize {
        let before = self.len();

        for cookies in self.store.values_mut() {
            cookies.retain(|c| c.is_session() || !c.is_expired(now));
        }
        self.store.retain(|_, cookies| !cookies.is_empty());

        let removed = before - self.len();
        if removed > 0 {
            tracing::debug!(removed, "purged expired cookies");
        }
        removed
    }

    /// Write every non-session, non-expired cookie to the line store,
    /// one raw-form record per line.
    ///
    /// Does nothing when storing is disabled. A cookie file written earlier
    /// is left as it was in that case.
    pub fn save(&mut self) -> CookieResult<()> {
        if !self.policy.store_enabled() {
            tracing::debug!("cookie storage disabled, not saving");
            return Ok(());
        }

        self.purge_old_cookies();

        let lines: Vec<String> = self
            .iter()
            .filter(|c| !c.is_session())
            .map(CanonicalCookie::to_raw_form)
            .collect();
        let count = lines.len();

        self.lines.set_content(lines);
        self.lines.persist()?;

        tracing::debug!(count, "saved cookies");
        Ok(())
    }

    /// Parse `Set-Cookie` header values and store the result as
    /// [`set_cookies_from_url`](CookieJar::set_cookies_from_url) would.
    pub fn set_cookies_from_headers<I, H>(&mut self, url: &Url, headers: I) -> bool
    where
        I: IntoIterator<Item = H>,
        H: AsRef<str>,
    {
        let cookies = headers
            .into_iter()
            .flat_map(|h| rawform::parse_set_cookie_header(h.as_ref()))
            .collect();
        self.set_cookies_from_url(cookies, url)
    }

    /// Remove the cookie with the same (domain, path, name) key.
    pub fn delete_cookie(&mut self, cookie: &CanonicalCookie) -> bool {
        let Some(entry) = self.store.get_mut(&cookie.domain) else {
            return false;
        };
        let before = entry.len();
        entry.retain(|c| !c.same_key(cookie));
        let removed = entry.len() != before;
        if entry.is_empty() {
            self.store.remove(&cookie.domain);
        }
        removed
    }

    /// Get total cookie count.
    pub fn len(&self) -> usize {
        self.store.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Clear all cookies in memory. The line store is untouched until the next save.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &CanonicalCookie> + '_ {
        self.store.values().flatten()
    }

    pub fn line_store(&self) -> &S {
        &self.lines
    }

    pub fn into_line_store(self) -> S {
        self.lines
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    fn insert(&mut self, mut cookie: CanonicalCookie) -> bool {
        let entry = self.store.entry(cookie.domain.clone()).or_default();

        // Replace an existing cookie with the same key, keeping its creation time.
        if let Some(pos) = entry.iter().position(|c| c.same_key(&cookie)) {
            cookie.creation_time = entry.remove(pos).creation_time;
        }

        // Enforce per-domain limit with LRU eviction
        while entry.len() >= self.max_per_domain {
            if let Some(oldest_idx) = entry
                .iter()
                .enumerate()
                .min_by_key(|(_, c)| c.creation_time)
                .map(|(i, _)| i)
            {
                let evicted = entry.remove(oldest_idx);
                tracing::debug!(domain = %evicted.domain, name = %evicted.name, "evicted cookie over domain limit");
            }
        }

        let key = cookie.clone();
        entry.push(cookie);

        self.enforce_global_limit();

        // Whether the cookie outlived eviction.
        self.store
            .get(&key.domain)
            .is_some_and(|cookies| cookies.iter().any(|c| c.same_key(&key)))
    }

    /// Enforce the global cookie limit by evicting oldest cookies.
    fn enforce_global_limit(&mut self) {
        let mut total = self.len();
        while total > self.max_total {
            let oldest = self
                .store
                .iter()
                .flat_map(|(domain, cookies)| {
                    cookies
                        .iter()
                        .enumerate()
                        .map(move |(idx, c)| (domain, idx, c.creation_time))
                })
                .min_by_key(|(_, _, created)| *created)
                .map(|(domain, idx, _)| (domain.clone(), idx));

            let Some((domain, idx)) = oldest else {
                break;
            };
            if let Some(entry) = self.store.get_mut(&domain) {
                entry.remove(idx);
                if entry.is_empty() {
                    self.store.remove(&domain);
                }
            }
            total -= 1;
        }
    }
}

impl<S: LineStore, P: PolicyProvider> CookieJar for CookieStore<S, P> {
    fn all_cookies(&self) -> Vec<CanonicalCookie> {
        self.iter().cloned().collect()
    }

    fn set_all_cookies(&mut self, cookies: Vec<CanonicalCookie>) {
        self.store.clear();
        for cookie in cookies {
            self.insert(cookie);
        }
    }

    /// Get cookies matching the URL with proper domain suffix matching.
    fn cookies_for_url(&self, url: &Url) -> Vec<CanonicalCookie> {
        let mut result = Vec::new();
        let Some(host) = url.host_str().map(str::to_lowercase) else {
            return result;
        };
        let now = OffsetDateTime::now_utc();

        for domain in candidate_domains(&host) {
            let Some(entry) = self.store.get(&domain) else {
                continue;
            };
            for cookie in entry {
                if !domain_matches(&cookie.domain, &host, cookie.host_only) {
                    continue;
                }
                if !path_matches(&cookie.path, url.path()) {
                    continue;
                }
                if cookie.secure && url.scheme() != "https" {
                    continue;
                }
                if cookie.is_expired(now) {
                    continue;
                }
                result.push(cookie.clone());
            }
        }

        // Sort by path length (longest first) then creation time
        result.sort_by(|a, b| {
            b.path
                .len()
                .cmp(&a.path.len())
                .then_with(|| a.creation_time.cmp(&b.creation_time))
        });

        result
    }

    fn set_cookies_from_url(&mut self, cookies: Vec<CanonicalCookie>, url: &Url) -> bool {
        if self.policy.accept_mode() == AcceptMode::Never {
            tracing::debug!(url = %url, offered = cookies.len(), "cookies refused by accept policy");
            return false;
        }

        let now = OffsetDateTime::now_utc();
        let mut added = false;

        for cookie in cookies {
            let cookie = match canonicalize_for_url(cookie, url, now) {
                Ok(cookie) => cookie,
                Err(e) => {
                    tracing::debug!(url = %url, error = %e, "cookie rejected");
                    continue;
                }
            };

            // An already-expired cookie is a deletion.
            if cookie.is_expired(now) {
                self.delete_cookie(&cookie);
                continue;
            }

            if self.insert(cookie) {
                added = true;
            }
        }

        added
    }
}

/// Fill in the URL-derived defaults of an offered cookie and check that
/// `url` may set it.
fn canonicalize_for_url(
    mut cookie: CanonicalCookie,
    url: &Url,
    now: OffsetDateTime,
) -> CookieResult<CanonicalCookie> {
    let host = url
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or(CookieError::CookieNoHost)?
        .to_lowercase();

    let domain = cookie.domain.trim_start_matches('.').to_lowercase();
    if domain.is_empty() {
        cookie.domain = host.clone();
        cookie.host_only = true;
    } else if cookie.host_only || matches!(url.host(), Some(Host::Ipv4(_) | Host::Ipv6(_))) {
        // Host cookies and cookies on IP addresses need an exact match.
        if domain != host {
            return Err(CookieError::CookieDomainMismatch { domain, host });
        }
        cookie.domain = domain;
    } else {
        psl::check_cookie_domain(&domain, &host)?;
        // A public suffix may only set cookies for itself (RFC 6265 5.3 step 5).
        if domain == host && psl::is_public_suffix(&domain) {
            cookie.host_only = true;
        }
        cookie.domain = domain;
    }

    if !cookie.path.starts_with('/') {
        cookie.path = default_path(url.path());
    }

    let secure_origin = url.scheme() == "https";
    if cookie.secure && !secure_origin {
        return Err(CookieError::CookieInsecureOrigin);
    }
    cookie.validate_prefix(secure_origin)?;

    cookie.creation_time = now;
    cookie.last_access_time = now;
    Ok(cookie)
}
