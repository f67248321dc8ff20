use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CookieError {
    // Persistence
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // Policy configuration
    #[error("Invalid cookie policy value: {0}")]
    InvalidPolicy(String),
    #[error("Malformed cookie policy file: {0}")]
    PolicyFormat(#[from] serde_json::Error),

    // Cookie rejection
    #[error("URL has no host to set cookies for")]
    CookieNoHost,
    #[error("Cookie domain {domain} does not match host {host}")]
    CookieDomainMismatch { domain: String, host: String },
    #[error("Cookie domain is a public suffix")]
    CookiePublicSuffix,
    #[error("Secure cookie set from an insecure origin")]
    CookieInsecureOrigin,
    #[error("Cookie prefix validation failed")]
    CookieInvalidPrefix,
}

impl CookieError {
    /// Create an I/O error tagged with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CookieError::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error describes a cookie the store refused, as opposed
    /// to a failure of the store itself.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            CookieError::CookieNoHost
                | CookieError::CookieDomainMismatch { .. }
                | CookieError::CookiePublicSuffix
                | CookieError::CookieInsecureOrigin
                | CookieError::CookieInvalidPrefix
        )
    }
}

pub type CookieResult<T> = Result<T, CookieError>;
