//! Configuration schema for jlinkw
//!
//! Configuration is read from `jlinkw.toml` in the project (or an ancestor
//! directory), falling back to `~/.config/jlinkw/config.toml`.

use crate::provider::{ProviderConfig, ProviderId};
use crate::session::Requirements;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Skip the build step entirely
    pub skip: bool,

    /// General settings
    pub general: GeneralConfig,

    /// JDK cache settings
    pub cache: CacheConfig,

    /// Network settings consumed by providers
    pub network: NetworkConfig,

    /// JDK provider selection
    pub provider: ProviderSection,

    /// Toolchain lookup for the jlink executable
    pub toolchains: ToolchainsConfig,

    /// jlink invocation
    pub jlink: JlinkConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// JDK cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache folder; `~` expands to the home directory
    pub path: String,

    /// Never fetch, only use JDKs already in the cache
    pub use_only_cache: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: super::ConfigManager::default_cache_dir()
                .to_string_lossy()
                .into_owned(),
            use_only_cache: false,
        }
    }
}

/// Network configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Disable TLS certificate checks
    pub disable_ssl_check: bool,

    /// Proxy for provider downloads
    pub proxy: Option<ProxySettings>,
}

/// Proxy settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxySettings {
    pub host: String,

    pub port: u16,

    #[serde(default = "default_proxy_protocol")]
    pub protocol: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Hosts reached without the proxy
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub non_proxy_hosts: Vec<String>,
}

fn default_proxy_protocol() -> String {
    "http".to_string()
}

impl ProxySettings {
    /// Proxy URL without credentials, e.g. `http://proxy.local:3128`
    pub fn url(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.host, self.port)
    }
}

/// JDK provider selection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSection {
    /// Provider identifier
    pub id: ProviderId,

    /// Provider-specific options
    pub config: ProviderConfig,
}

/// Toolchain lookup configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainsConfig {
    /// Toolchains registry file (default: `~/.config/jlinkw/toolchains.toml`)
    pub file: Option<PathBuf>,

    /// JDK whose jlink is used, bypassing the registry
    pub tool_jdk: Option<PathBuf>,

    /// Requirements of the toolchain selected for this build
    pub select: Requirements,
}

/// jlink invocation settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JlinkConfig {
    /// Image output folder
    pub output: Option<PathBuf>,

    /// jdeps report to mine module names from
    pub jdeps_report: Option<PathBuf>,

    /// Modules added explicitly
    pub add_modules: Vec<String>,

    /// Raw jlink options
    pub options: Vec<String>,
}
