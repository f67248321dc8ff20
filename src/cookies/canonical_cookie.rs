use crate::base::error::CookieError;
use time::OffsetDateTime;

/// Represents a cookie.
/// Modeled after Chromium's `net::CanonicalCookie`.
///
/// `domain` is stored lowercase and without a leading dot; `host_only`
/// carries the distinction between a host cookie and a domain cookie.
/// A cookie without an `expiration_time` is a session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalCookie {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
    pub creation_time: OffsetDateTime,
    pub expiration_time: Option<OffsetDateTime>,
    pub last_access_time: OffsetDateTime,
    pub secure: bool,
    pub http_only: bool,
    pub host_only: bool,
    pub same_site: SameSite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Unspecified,
    NoRestriction,
    Lax,
    Strict,
}

impl CanonicalCookie {
    /// Create a host-only cookie with default attributes.
    pub fn new(
        name: String,
        value: String,
        domain: String,
        path: String,
        creation_time: OffsetDateTime,
        expiration_time: Option<OffsetDateTime>,
    ) -> Self {
        Self {
            name,
            value,
            domain,
            path,
            creation_time,
            expiration_time,
            last_access_time: creation_time,
            secure: false,
            http_only: false,
            host_only: true,
            same_site: SameSite::Unspecified,
        }
    }

    /// True iff the cookie has no expiration time.
    pub fn is_session(&self) -> bool {
        self.expiration_time.is_none()
    }

    /// Session cookies never expire on their own.
    pub fn is_expired(&self, current_time: OffsetDateTime) -> bool {
        match self.expiration_time {
            Some(expiry) => expiry < current_time,
            None => false,
        }
    }

    /// Whether `other` occupies the same (domain, path, name) slot.
    pub fn same_key(&self, other: &CanonicalCookie) -> bool {
        self.name == other.name && self.path == other.path && self.domain == other.domain
    }

    /// Canonical `Set-Cookie` serialization, used both on the wire and on disk.
    pub fn to_raw_form(&self) -> String {
        crate::cookies::rawform::to_raw_form(self)
    }

    /// Validate __Secure- and __Host- cookie prefixes per RFC 6265bis.
    /// - __Secure- cookies MUST have the Secure attribute
    /// - __Host- cookies MUST have Secure, Path="/", and no Domain attribute
    pub fn validate_prefix(&self, secure_origin: bool) -> Result<(), CookieError> {
        if self.name.starts_with("__Secure-") && (!self.secure || !secure_origin) {
            return Err(CookieError::CookieInvalidPrefix);
        }

        if self.name.starts_with("__Host-") {
            // __Host- requires: Secure flag, Path="/", host-only (no Domain), secure origin
            if !self.secure || self.path != "/" || !self.host_only || !secure_origin {
                return Err(CookieError::CookieInvalidPrefix);
            }
        }

        Ok(())
    }
}
