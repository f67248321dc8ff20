//! Cookie persistence - line-oriented storage behind the cookie store.
//!
//! The store hands over one raw-form cookie per line and never touches the
//! filesystem itself. [`FileLineStore`] is the disk-backed implementation;
//! [`MemoryLineStore`] keeps everything in memory.

use crate::base::context::IoResultExt;
use crate::base::error::{CookieError, CookieResult};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// An ordered sequence of text lines that can be loaded and persisted.
pub trait LineStore {
    /// Read the persisted lines. Called once, when the cookie store is built.
    fn load(&mut self) -> CookieResult<Vec<String>>;

    /// Replace the pending content.
    fn set_content(&mut self, lines: Vec<String>);

    /// Write the pending content as one complete unit.
    fn persist(&mut self) -> CookieResult<()>;
}

/// A line file on disk.
///
/// Blank lines are skipped on load, as are lines that are not valid UTF-8.
/// Every other line is handed to the store as written. A missing file loads
/// as empty.
#[derive(Debug, Clone)]
pub struct FileLineStore {
    path: PathBuf,
    content: Vec<String>,
}

impl FileLineStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            content: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lines as last loaded or set.
    pub fn content(&self) -> &[String] {
        &self.content
    }
}

impl LineStore for FileLineStore {
    fn load(&mut self) -> CookieResult<Vec<String>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no cookie file yet");
                self.content.clear();
                return Ok(Vec::new());
            }
            Err(e) => return Err(CookieError::io(&self.path, e)),
        };

        let mut lines = Vec::new();
        for (idx, raw) in bytes.split(|&b| b == b'\n').enumerate() {
            let Ok(line) = std::str::from_utf8(raw) else {
                tracing::debug!(
                    path = %self.path.display(),
                    line = idx + 1,
                    "skipping line that is not valid UTF-8"
                );
                continue;
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            lines.push(line.to_string());
        }

        self.content = lines.clone();
        Ok(lines)
    }

    fn set_content(&mut self, lines: Vec<String>) {
        self.content = lines;
    }

    fn persist(&mut self) -> CookieResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).path_context(parent)?;
        }

        let mut data = String::with_capacity(self.content.iter().map(|l| l.len() + 1).sum());
        for line in &self.content {
            data.push_str(line);
            data.push('\n');
        }

        // Write beside the target, then swap it in.
        let tmp = temp_path(&self.path);
        fs::write(&tmp, data).path_context(&tmp)?;
        fs::rename(&tmp, &self.path).path_context(&self.path)?;

        tracing::debug!(path = %self.path.display(), lines = self.content.len(), "persisted lines");
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// In-memory line store.
///
/// Tracks pending content separately from what was last persisted, so a
/// caller can tell whether a save actually happened.
#[derive(Debug, Clone, Default)]
pub struct MemoryLineStore {
    pending: Vec<String>,
    persisted: Vec<String>,
    persist_count: usize,
    fail_persist: bool,
}

impl MemoryLineStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose persisted content is already `lines`.
    pub fn with_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let persisted: Vec<String> = lines.into_iter().map(Into::into).collect();
        Self {
            pending: persisted.clone(),
            persisted,
            ..Self::default()
        }
    }

    /// Make every `persist` call fail with an I/O error.
    pub fn failing(mut self) -> Self {
        self.fail_persist = true;
        self
    }

    pub fn persisted(&self) -> &[String] {
        &self.persisted
    }

    pub fn persist_count(&self) -> usize {
        self.persist_count
    }
}

impl LineStore for MemoryLineStore {
    fn load(&mut self) -> CookieResult<Vec<String>> {
        Ok(self.persisted.clone())
    }

    fn set_content(&mut self, lines: Vec<String>) {
        self.pending = lines;
    }

    fn persist(&mut self) -> CookieResult<()> {
        if self.fail_persist {
            return Err(CookieError::io(
                "<memory>",
                io::Error::new(io::ErrorKind::Other, "persist disabled"),
            ));
        }
        self.persisted = self.pending.clone();
        self.persist_count += 1;
        Ok(())
    }
}
