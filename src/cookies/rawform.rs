//! `Set-Cookie` raw form: parsing lines into cookies and back.
//!
//! A raw line may carry several records, separated by newlines or by
//! commas (legacy folded `Set-Cookie` headers). The comma inside an
//! `Expires` date is not a separator.
//!
//! On disk, `Domain=.example.com` marks a domain cookie and
//! `Domain=example.com` a host-only cookie. Network headers use
//! [`parse_set_cookie_header`], where any `Domain` attribute yields a
//! domain cookie as RFC 6265 requires.
//!
//! The stored name and value are percent-encoded, so a `,` or `;` inside a
//! value cannot split the record. Header values are taken verbatim.

use crate::cookies::canonical_cookie::{CanonicalCookie, SameSite};
use std::fmt::Write;
use time::macros::format_description;
use time::{Duration, OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// Parse a stored line into zero or more cookies.
pub fn parse_cookies(raw: &str) -> Vec<CanonicalCookie> {
    parse_cookies_at(raw, OffsetDateTime::now_utc())
}

/// Like [`parse_cookies`], resolving `Max-Age` against `now`.
pub fn parse_cookies_at(raw: &str, now: OffsetDateTime) -> Vec<CanonicalCookie> {
    parse_lines(raw, now, true)
}

/// Parse a `Set-Cookie` header value received from a server.
///
/// Unlike stored lines, a dotless `Domain` attribute still makes a domain
/// cookie here.
pub fn parse_set_cookie_header(raw: &str) -> Vec<CanonicalCookie> {
    let mut cookies = parse_lines(raw, OffsetDateTime::now_utc(), false);
    for cookie in &mut cookies {
        if !cookie.domain.is_empty() {
            cookie.host_only = false;
        }
    }
    cookies
}

/// Serialize a cookie into its canonical raw form.
pub fn to_raw_form(cookie: &CanonicalCookie) -> String {
    let pair = cookie::Cookie::new(cookie.name.as_str(), cookie.value.as_str());
    let mut out = pair.encoded().to_string();

    if cookie.secure {
        out.push_str("; Secure");
    }
    if cookie.http_only {
        out.push_str("; HttpOnly");
    }
    match cookie.same_site {
        SameSite::Lax => out.push_str("; SameSite=Lax"),
        SameSite::Strict => out.push_str("; SameSite=Strict"),
        SameSite::NoRestriction => out.push_str("; SameSite=None"),
        SameSite::Unspecified => {}
    }
    if let Some(expires) = cookie.expiration_time {
        match format_http_date(expires) {
            Some(date) => {
                let _ = write!(out, "; Expires={}", date);
            }
            None => tracing::debug!(name = %cookie.name, "expiry out of range, dropping Expires"),
        }
    }
    if !cookie.domain.is_empty() {
        let dot = if cookie.host_only { "" } else { "." };
        let _ = write!(out, "; Domain={}{}", dot, cookie.domain);
    }
    if !cookie.path.is_empty() {
        let _ = write!(out, "; Path={}", cookie.path);
    }

    out
}

/// IMF-fixdate, e.g. `Wed, 21 Oct 2015 07:28:00 GMT`.
fn format_http_date(t: OffsetDateTime) -> Option<String> {
    t.to_offset(UtcOffset::UTC)
        .format(format_description!(
            "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
        ))
        .ok()
}

fn parse_lines(raw: &str, now: OffsetDateTime, decode: bool) -> Vec<CanonicalCookie> {
    raw.split('\n')
        .flat_map(split_records)
        .filter_map(|record| parse_record(record, now, decode))
        .collect()
}

fn split_records(line: &str) -> Vec<&str> {
    let mut records = Vec::new();
    let mut start = 0;
    let mut attr_start = 0;

    for (i, b) in line.bytes().enumerate() {
        match b {
            b';' => attr_start = i + 1,
            b',' => {
                if is_inside_expires_date(&line[attr_start..i]) {
                    continue;
                }
                records.push(&line[start..i]);
                start = i + 1;
                attr_start = i + 1;
            }
            _ => {}
        }
    }
    records.push(&line[start..]);

    records
}

/// `Expires=Wed, 21 Oct ...` has exactly one comma, right after the weekday.
fn is_inside_expires_date(attr: &str) -> bool {
    match attr.split_once('=') {
        Some((key, value)) => key.trim().eq_ignore_ascii_case("expires") && !value.contains(','),
        None => false,
    }
}

fn parse_record(record: &str, now: OffsetDateTime, decode: bool) -> Option<CanonicalCookie> {
    let record = record.trim();
    if record.is_empty() {
        return None;
    }

    // A stray `%` that does not decode is kept as written.
    let parsed = if decode {
        cookie::Cookie::parse_encoded(record).or_else(|_| cookie::Cookie::parse(record))
    } else {
        cookie::Cookie::parse(record)
    };
    let parsed = match parsed {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::debug!(error = %e, "skipping unparseable cookie record");
            return None;
        }
    };
    if parsed.name().is_empty() {
        return None;
    }

    let domain = parsed.domain().map(|d| d.trim_start_matches('.'));
    let (domain, host_only) = match domain.filter(|d| !d.is_empty()) {
        Some(d) => (d.to_lowercase(), !has_dotted_domain(record)),
        None => (String::new(), true),
    };

    // Max-Age wins over Expires.
    let expiration_time = match parsed.max_age() {
        Some(max_age) => {
            let secs = max_age.whole_seconds();
            if secs <= 0 {
                Some(OffsetDateTime::UNIX_EPOCH)
            } else {
                Some(
                    now.checked_add(Duration::seconds(secs))
                        .unwrap_or(PrimitiveDateTime::MAX.assume_utc()),
                )
            }
        }
        None => parsed.expires_datetime(),
    };

    let same_site = match parsed.same_site() {
        Some(cookie::SameSite::Lax) => SameSite::Lax,
        Some(cookie::SameSite::Strict) => SameSite::Strict,
        Some(cookie::SameSite::None) => SameSite::NoRestriction,
        None => SameSite::Unspecified,
    };

    Some(CanonicalCookie {
        name: parsed.name().to_string(),
        value: parsed.value().to_string(),
        domain,
        path: parsed.path().unwrap_or("").to_string(),
        creation_time: now,
        expiration_time,
        last_access_time: now,
        secure: parsed.secure().unwrap_or(false),
        http_only: parsed.http_only().unwrap_or(false),
        host_only,
        same_site,
    })
}

/// The `cookie` crate strips the leading dot, so look at the raw attribute.
fn has_dotted_domain(record: &str) -> bool {
    record
        .split(';')
        .skip(1)
        .filter_map(|attr| attr.split_once('='))
        .filter(|(key, _)| key.trim().eq_ignore_ascii_case("domain"))
        .last()
        .is_some_and(|(_, value)| value.trim().starts_with('.'))
}
