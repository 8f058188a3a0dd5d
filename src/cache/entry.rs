//! Complete-or-absent cache entries
//!
//! An entry is built in a private staging directory and renamed into place
//! only after its builder succeeded and the completion marker was written.
//! An interrupted build therefore never looks like a finished one.

use crate::error::{JlinkwError, JlinkwResult};
use crate::text::extract_file_hash;
use std::future::Future;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

/// Name of the completion marker inside a materialized entry
pub const COMPLETE_MARKER: &str = ".jlinkw-complete";

/// A named entry beneath the cache root
#[derive(Debug, Clone)]
pub struct CacheEntry {
    root: PathBuf,
    name: String,
}

impl CacheEntry {
    pub(crate) fn new(root: PathBuf, name: &str) -> Self {
        Self {
            root,
            name: name.to_string(),
        }
    }

    /// Final location of the entry
    pub fn path(&self) -> PathBuf {
        self.root.join(&self.name)
    }

    /// Entry name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check whether the entry was fully materialized for `fingerprint`
    pub async fn is_complete(&self, fingerprint: &str) -> bool {
        let marker = self.path().join(COMPLETE_MARKER);
        match fs::read_to_string(&marker).await {
            Ok(content) => extract_file_hash(&content)
                .map(|hash| hash.eq_ignore_ascii_case(fingerprint))
                .unwrap_or(false),
            Err(_) => false,
        }
    }

    /// Materialize the entry unless it is already complete.
    ///
    /// `build` receives an empty staging directory and must fill it. On
    /// failure the staging directory is removed and the entry stays absent.
    pub async fn materialize<F, Fut>(&self, fingerprint: &str, build: F) -> JlinkwResult<PathBuf>
    where
        F: FnOnce(PathBuf) -> Fut,
        Fut: Future<Output = JlinkwResult<()>>,
    {
        let target = self.path();
        if self.is_complete(fingerprint).await {
            debug!("Cache hit: {}", target.display());
            return Ok(target);
        }

        let staging = self.root.join(format!(
            ".staging-{}-{}",
            self.name,
            Uuid::new_v4().simple()
        ));
        fs::create_dir_all(&staging).await.map_err(|e| {
            JlinkwError::io(format!("creating staging folder {}", staging.display()), e)
        })?;

        if let Err(e) = build(staging.clone()).await {
            discard(&staging).await;
            return Err(e);
        }

        let marker = format!("{}  {}\n", fingerprint, self.name);
        if let Err(e) = fs::write(staging.join(COMPLETE_MARKER), marker).await {
            discard(&staging).await;
            return Err(JlinkwError::io(
                format!("writing cache marker for {}", self.name),
                e,
            ));
        }

        // Another build may have finished the same entry meanwhile
        if self.is_complete(fingerprint).await {
            discard(&staging).await;
            return Ok(target);
        }

        if target.exists() {
            warn!("Removing incomplete cache entry {}", target.display());
            if let Err(e) = fs::remove_dir_all(&target).await {
                discard(&staging).await;
                return Err(JlinkwError::io(
                    format!("removing stale entry {}", target.display()),
                    e,
                ));
            }
        }

        if let Err(e) = fs::rename(&staging, &target).await {
            discard(&staging).await;
            return Err(JlinkwError::io(
                format!("moving cache entry into {}", target.display()),
                e,
            ));
        }

        debug!("Cache entry materialized: {}", target.display());
        Ok(target)
    }
}

async fn discard(staging: &Path) {
    if let Err(e) = fs::remove_dir_all(staging).await {
        debug!("Failed to remove staging folder {}: {}", staging.display(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheRoot;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    fn root(temp: &TempDir) -> CacheRoot {
        CacheRoot::resolve(temp.path().to_str().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn materialize_then_short_circuit() {
        let temp = TempDir::new().unwrap();
        let entry = root(&temp).entry("jdk");
        let calls = AtomicUsize::new(0);

        for _ in 0..2 {
            let path = entry
                .materialize("abc123", |dir| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async move {
                        std::fs::create_dir_all(dir.join("jmods")).unwrap();
                        Ok(())
                    }
                })
                .await
                .unwrap();
            assert!(path.join("jmods").is_dir());
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(entry.is_complete("abc123").await);
        assert!(!entry.is_complete("other").await);
    }

    #[tokio::test]
    async fn failed_build_leaves_entry_absent() {
        let temp = TempDir::new().unwrap();
        let entry = root(&temp).entry("jdk");

        let result = entry
            .materialize("abc123", |dir| async move {
                std::fs::write(dir.join("partial.bin"), b"half").unwrap();
                Err(JlinkwError::Provider("checksum mismatch".to_string()))
            })
            .await;

        assert!(matches!(result, Err(JlinkwError::Provider(_))));
        assert!(!entry.path().exists());
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn incomplete_entry_is_rebuilt() {
        let temp = TempDir::new().unwrap();
        let entry = root(&temp).entry("jdk");
        std::fs::create_dir_all(entry.path().join("leftover")).unwrap();
        assert!(!entry.is_complete("abc123").await);

        let path = entry
            .materialize("abc123", |dir| async move {
                std::fs::create_dir_all(dir.join("jmods")).unwrap();
                Ok(())
            })
            .await
            .unwrap();

        assert!(path.join("jmods").is_dir());
        assert!(!path.join("leftover").exists());
    }

    #[tokio::test]
    async fn failed_move_discards_staging() {
        let temp = TempDir::new().unwrap();
        let entry = root(&temp).entry("jdk");
        // A file in place of the entry can't be removed as a folder
        std::fs::write(entry.path(), b"not a folder").unwrap();

        let result = entry
            .materialize("abc123", |dir| async move {
                std::fs::create_dir_all(dir.join("jmods")).unwrap();
                Ok(())
            })
            .await;

        assert!(matches!(result, Err(JlinkwError::Io { .. })));
        let names: Vec<_> = std::fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("jdk")]);
    }
}
