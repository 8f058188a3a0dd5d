//! CLI command implementations

pub mod build;
pub mod config;
pub mod modules;
pub mod toolchains;

pub use build::execute as build;
pub use config::execute as config;
pub use modules::execute as modules;
pub use toolchains::execute as toolchains;

use crate::config::{Config, ConfigManager};
use crate::error::JlinkwResult;
use crate::toolchain::FileToolchainRegistry;
use std::path::PathBuf;

/// Toolchains file configured for this build, or the default location
fn toolchains_path(config: &Config) -> PathBuf {
    config
        .toolchains
        .file
        .clone()
        .unwrap_or_else(ConfigManager::default_toolchains_path)
}

fn load_registry(config: &Config) -> JlinkwResult<FileToolchainRegistry> {
    FileToolchainRegistry::load(&toolchains_path(config))
}
