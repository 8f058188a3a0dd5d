//! JDK cache directory shared by all providers
//!
//! The cache root is resolved once per invocation from a configured path,
//! created on first use and validated for read/write access. Providers
//! materialize JDKs beneath it through [`CacheEntry`], which keeps each
//! entry either complete or absent.
//!
//! # Layout
//!
//! | Path | Description |
//! |------|-------------|
//! | `<root>/<entry>/` | Materialized entry |
//! | `<root>/<entry>/.jlinkw-complete` | Completion marker (`<fingerprint>  <entry>`) |
//! | `<root>/.staging-<entry>-<uuid>/` | Entry under construction |

pub mod entry;

pub use entry::CacheEntry;

use crate::error::{JlinkwError, JlinkwResult};
use faccess::PathExt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Validated cache root directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheRoot {
    path: PathBuf,
}

impl CacheRoot {
    /// Resolve the cache root from a configured path string.
    ///
    /// Creates the directory (and parents) when missing, then checks that it
    /// is a directory, readable and writable, reporting the first failing
    /// check in that order.
    pub fn resolve(path: &str) -> JlinkwResult<Self> {
        if path.trim().is_empty() {
            return Err(JlinkwError::Configuration(
                "Path to the cache folder is not provided".to_string(),
            ));
        }

        let path = PathBuf::from(path);

        if !path.exists() {
            debug!("Creating cache folder {}", path.display());
            fs::create_dir_all(&path).map_err(|e| {
                JlinkwError::io(format!("creating cache folder {}", path.display()), e)
            })?;
        }

        let is_dir = path.is_dir();
        let readable = path.readable();
        let writable = path.writable();

        if !is_dir {
            return Err(JlinkwError::path_invalid(&path, "Cache path is not a folder"));
        }
        if !readable {
            return Err(JlinkwError::path_invalid(
                &path,
                "Can't read from the cache folder, check rights",
            ));
        }
        if !writable {
            return Err(JlinkwError::path_invalid(
                &path,
                "Can't write to the cache folder, check rights",
            ));
        }

        Ok(Self { path })
    }

    /// Path of the validated cache root
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Handle to a named entry beneath the root
    pub fn entry(&self, name: &str) -> CacheEntry {
        CacheEntry::new(self.path.clone(), name)
    }
}
