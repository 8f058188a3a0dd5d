//! Local JDK provider
//!
//! Uses a JDK installed on this machine in place. Nothing is fetched, so
//! offline mode has no effect.

use crate::error::{JlinkwError, JlinkwResult};
use crate::provider::{ensure_jmods, JdkProvider, ProviderConfig, ProviderContext};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{debug, info};

/// Config key holding the JDK home
pub const HOME_KEY: &str = "home";

/// Provider for an already installed JDK
pub struct LocalJdkProvider {
    ctx: ProviderContext,
}

impl LocalJdkProvider {
    pub fn new(ctx: ProviderContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl JdkProvider for LocalJdkProvider {
    async fn prepare_jdk_folder(&self, config: &ProviderConfig) -> JlinkwResult<PathBuf> {
        let home = config
            .get(HOME_KEY)
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .ok_or_else(|| {
                JlinkwError::Provider(format!(
                    "Provider config must contain '{}' with the JDK folder",
                    HOME_KEY
                ))
            })?;
        let home = PathBuf::from(home);

        debug!(
            "Local provider (offline: {}, cache: {})",
            self.ctx.offline,
            self.ctx.cache_root.path().display()
        );

        if !home.is_dir() {
            return Err(JlinkwError::Provider(format!(
                "Can't find local JDK folder: {}",
                home.display()
            )));
        }
        ensure_jmods(&home)?;

        info!("Using local JDK: {}", home.display());
        Ok(home)
    }

    fn provider_name(&self) -> &'static str {
        "Local JDK"
    }
}
