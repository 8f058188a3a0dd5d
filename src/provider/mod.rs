//! JDK providers
//!
//! A provider guarantees that a JDK with a `jmods/` folder exists and returns
//! its home. Providers that fetch JDKs materialize them under the cache root
//! and must not touch the network in offline mode.
//!
//! Available providers:
//! - `local`: a JDK already installed on this machine, used in place

mod local;

pub use local::LocalJdkProvider;

use crate::cache::{CacheEntry, CacheRoot};
use crate::config::schema::ProxySettings;
use crate::error::{JlinkwError, JlinkwResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Folder inside a JDK home holding the platform modules
pub const JMODS_DIR: &str = "jmods";

/// Abstract JDK provider interface
#[async_trait]
pub trait JdkProvider: Send + Sync {
    /// Ensure the JDK described by `config` is available and return its home.
    ///
    /// Repeated calls with the same config return the already prepared JDK
    /// without fetching it again.
    async fn prepare_jdk_folder(&self, config: &ProviderConfig) -> JlinkwResult<PathBuf>;

    /// Human-readable provider name
    fn provider_name(&self) -> &'static str;
}

/// Provider-specific options, opaque to the pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderConfig(BTreeMap<String, String>);

impl ProviderConfig {
    pub fn new(options: BTreeMap<String, String>) -> Self {
        Self(options)
    }

    /// Look up an option
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Set an option
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Stable SHA-256 over the sorted options, usable as a cache key
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for (key, value) in &self.0 {
            hasher.update(key.as_bytes());
            hasher.update([0u8]);
            hasher.update(value.as_bytes());
            hasher.update([0u8]);
        }
        hex::encode(hasher.finalize())
    }
}

/// Shared state handed to every provider
#[derive(Debug, Clone)]
pub struct ProviderContext {
    /// Validated cache root
    pub cache_root: CacheRoot,
    /// Network access forbidden
    pub offline: bool,
    /// Skip TLS certificate checks when fetching
    pub disable_ssl_check: bool,
    /// Proxy for network access
    pub proxy: Option<ProxySettings>,
}

impl ProviderContext {
    /// Look up a cache entry before fetching.
    ///
    /// Returns the entry path when it is complete, `None` when the caller
    /// may fetch it, and `OfflineUnavailable` when it is missing offline.
    pub async fn cached_or_fetchable(
        &self,
        entry: &CacheEntry,
        fingerprint: &str,
    ) -> JlinkwResult<Option<PathBuf>> {
        if entry.is_complete(fingerprint).await {
            debug!("Using cached JDK {}", entry.path().display());
            return Ok(Some(entry.path()));
        }
        if self.offline {
            return Err(JlinkwError::OfflineUnavailable {
                artifact: entry.name().to_string(),
            });
        }
        Ok(None)
    }
}

/// Check that a JDK home can serve as jlink module path
pub fn ensure_jmods(jdk_home: &Path) -> JlinkwResult<PathBuf> {
    let jmods = jdk_home.join(JMODS_DIR);
    if jmods.is_dir() {
        Ok(jmods)
    } else {
        Err(JlinkwError::Provider(format!(
            "JDK has no {} folder: {}",
            JMODS_DIR,
            jdk_home.display()
        )))
    }
}

/// Provider identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ProviderId {
    /// JDK installed on this machine
    #[default]
    Local,
}

impl ProviderId {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Local => "local",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ProviderId {
    type Err = JlinkwError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            other => Err(JlinkwError::UnknownProvider(other.to_string())),
        }
    }
}

impl TryFrom<String> for ProviderId {
    type Error = JlinkwError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Create the provider selected by `id`
pub fn create_provider(id: ProviderId, ctx: ProviderContext) -> Box<dyn JdkProvider> {
    match id {
        ProviderId::Local => Box::new(LocalJdkProvider::new(ctx)),
    }
}
