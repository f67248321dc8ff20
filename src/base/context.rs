//! Ergonomic error context helpers.
//!
//! Provides an extension trait for converting IO errors into
//! path-tagged `CookieError` variants.

use crate::base::error::CookieError;
use std::io;
use std::path::Path;

/// Extension trait for adding context to IO Results.
pub trait IoResultExt<T> {
    /// Tag an IO error with the file it happened on.
    ///
    /// # Example
    /// ```ignore
    /// use cookiestore::base::context::IoResultExt;
    ///
    /// let text = std::fs::read_to_string(&path).path_context(&path)?;
    /// // Error: "I/O error on /data/cookies: permission denied"
    /// ```
    fn path_context(self, path: &Path) -> Result<T, CookieError>;
}

impl<T> IoResultExt<T> for Result<T, io::Error> {
    fn path_context(self, path: &Path) -> Result<T, CookieError> {
        self.map_err(|e| CookieError::io(path, e))
    }
}
