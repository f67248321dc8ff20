//! Cookie accept/store policy.
//!
//! The store never reads configuration globally; it asks an injected
//! [`PolicyProvider`] at the moment a decision is made, so a policy
//! changed at runtime takes effect on the next call.

use crate::base::context::IoResultExt;
use crate::base::error::{CookieError, CookieResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock};

/// Configuration key for the accept mode.
pub const COOKIES_ACCEPT: &str = "cookies-accept";
/// Configuration key for the store flag.
pub const COOKIES_STORE: &str = "cookies-store";

/// Whether incoming cookies are stored in memory at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AcceptMode {
    /// Accept cookies subject to the usual domain and path rules.
    #[default]
    Default,
    /// Reject every cookie.
    Never,
}

impl AcceptMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AcceptMode::Default => "default",
            AcceptMode::Never => "never",
        }
    }
}

impl fmt::Display for AcceptMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AcceptMode {
    type Err = CookieError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(AcceptMode::Default),
            "never" => Ok(AcceptMode::Never),
            other => Err(CookieError::InvalidPolicy(format!(
                "{COOKIES_ACCEPT} = {other:?}"
            ))),
        }
    }
}

/// Source of the current cookie policy.
pub trait PolicyProvider {
    fn accept_mode(&self) -> AcceptMode;

    fn store_enabled(&self) -> bool;

    /// String lookup by configuration key. Unknown keys yield `None`.
    fn get(&self, key: &str) -> Option<String> {
        match key {
            COOKIES_ACCEPT => Some(self.accept_mode().to_string()),
            COOKIES_STORE => Some(self.store_enabled().to_string()),
            _ => None,
        }
    }
}

/// Static policy values, loadable from a JSON settings file:
///
/// ```json
/// { "cookies-accept": "never", "cookies-store": false }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CookiePolicy {
    #[serde(rename = "cookies-accept")]
    pub accept: AcceptMode,
    #[serde(rename = "cookies-store")]
    pub store: bool,
}

impl Default for CookiePolicy {
    fn default() -> Self {
        Self {
            accept: AcceptMode::Default,
            store: true,
        }
    }
}

impl CookiePolicy {
    /// Create a policy with defaults (accept and store).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the accept mode.
    pub fn accept(mut self, mode: AcceptMode) -> Self {
        self.accept = mode;
        self
    }

    /// Enable or disable persistent storage.
    pub fn store(mut self, enabled: bool) -> Self {
        self.store = enabled;
        self
    }

    pub fn from_json(json: &str) -> CookieResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> CookieResult<Self> {
        let json = std::fs::read_to_string(path).path_context(path)?;
        Self::from_json(&json)
    }
}

impl PolicyProvider for CookiePolicy {
    fn accept_mode(&self) -> AcceptMode {
        self.accept
    }

    fn store_enabled(&self) -> bool {
        self.store
    }
}

impl<P: PolicyProvider + ?Sized> PolicyProvider for &P {
    fn accept_mode(&self) -> AcceptMode {
        (**self).accept_mode()
    }

    fn store_enabled(&self) -> bool {
        (**self).store_enabled()
    }
}

impl<P: PolicyProvider + ?Sized> PolicyProvider for Arc<P> {
    fn accept_mode(&self) -> AcceptMode {
        (**self).accept_mode()
    }

    fn store_enabled(&self) -> bool {
        (**self).store_enabled()
    }
}

/// Lets an application keep a handle and flip settings while the store runs.
impl<P: PolicyProvider> PolicyProvider for RwLock<P> {
    fn accept_mode(&self) -> AcceptMode {
        self.read()
            .unwrap_or_else(PoisonError::into_inner)
            .accept_mode()
    }

    fn store_enabled(&self) -> bool {
        self.read()
            .unwrap_or_else(PoisonError::into_inner)
            .store_enabled()
    }
}
