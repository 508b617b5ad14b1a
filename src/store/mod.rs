//! File storage under a single base directory.
//!
//! Every client-supplied name is joined onto the base directory, normalized
//! lexically and then checked for containment before any I/O happens. That
//! check is the only traversal defense.
//!
//! Concurrent uploads of the same name are not coordinated; the last writer
//! wins.

pub mod path;

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

/// Failures surfaced by [`FileStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("path escapes the base directory: {0:?}")]
    Forbidden(String),
    #[error("file not readable: {0}")]
    NotFound(#[source] io::Error),
    #[error("failed to write file: {0}")]
    WriteFailed(#[source] io::Error),
}

/// Read/write access to files below a fixed base directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `base`. The path is normalized once here.
    pub fn new(base: impl AsRef<Path>) -> Self {
        Self {
            base: path::normalize(base.as_ref()),
        }
    }

    /// The normalized base directory.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Maps a client-supplied name to a path inside the base directory.
    ///
    /// The name is appended as `<base>/<name>` before normalizing, so an
    /// absolute name like `/etc/passwd` still lands below the base.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, StoreError> {
        let mut joined = OsString::from(self.base.as_os_str());
        joined.push("/");
        joined.push(name);

        let resolved = path::normalize(Path::new(&joined));
        if !path::is_within(&self.base, &resolved) {
            return Err(StoreError::Forbidden(name.to_string()));
        }

        Ok(resolved)
    }

    /// Reads the whole file. Any I/O failure, including a missing file or a
    /// directory, is reported as `NotFound`.
    pub async fn read(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        let path = self.resolve(name)?;
        fs::read(&path).await.map_err(StoreError::NotFound)
    }

    /// Creates or truncates the file and writes `contents` in full.
    pub async fn write(&self, name: &str, contents: &[u8]) -> Result<(), StoreError> {
        let path = self.resolve(name)?;

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o644);

        let mut file = options.open(&path).await.map_err(StoreError::WriteFailed)?;
        file.write_all(contents).await.map_err(StoreError::WriteFailed)?;
        file.flush().await.map_err(StoreError::WriteFailed)?;

        Ok(())
    }
}
