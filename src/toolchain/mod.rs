//! JDK toolchain lookup
//!
//! Locates JDK tools either in an explicitly configured JDK home or through
//! a registry of installed JDK toolchains.

mod registry;
mod resolver;
mod version;

pub use registry::{FileToolchainRegistry, JdkToolchain, ToolchainRegistry};
pub use resolver::{ToolchainResolver, JDK_KIND, MIN_JDK_VERSION};
pub use version::{coerce_version, parse_version_requirement, requirements_match};

use std::env::consts::EXE_SUFFIX;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A registered toolchain able to locate its own tools
pub trait Toolchain: fmt::Debug + Send + Sync {
    /// Toolchain kind, `jdk` for JDK installations
    fn kind(&self) -> &str;

    /// Locate a tool by name, e.g. `jlink`
    fn find_tool(&self, name: &str) -> Option<PathBuf>;
}

/// Append the platform executable suffix unless already present
pub fn ensure_os_extension(path: PathBuf) -> PathBuf {
    if EXE_SUFFIX.is_empty() {
        return path;
    }
    let has_suffix = path
        .to_string_lossy()
        .to_ascii_lowercase()
        .ends_with(EXE_SUFFIX);
    if has_suffix {
        path
    } else {
        let mut raw = path.into_os_string();
        raw.push(EXE_SUFFIX);
        PathBuf::from(raw)
    }
}

/// Find an executable tool inside a JDK home (`bin/` first, then the home itself)
pub fn find_jdk_executable(jdk_home: &Path, tool_name: &str) -> Option<PathBuf> {
    let file_name = format!("{}{}", tool_name, EXE_SUFFIX);
    let candidates = [jdk_home.join("bin").join(&file_name), jdk_home.join(&file_name)];

    let found = candidates.into_iter().find(|candidate| candidate.is_file());
    match &found {
        Some(path) => debug!("Found {} at {}", tool_name, path.display()),
        None => debug!("No {} in {}", tool_name, jdk_home.display()),
    }
    found
}
