//! Toolchain registry
//!
//! The registry answers two questions: which toolchain did this build select
//! (single result), and which registered toolchains satisfy a set of
//! requirements (extended lookup). The extended lookup is optional; a
//! registry that cannot answer it keeps the default implementation.

use crate::error::{JlinkwError, JlinkwResult};
use crate::session::{BuildSession, Requirements};
use crate::toolchain::version::requirements_match;
use crate::toolchain::{ensure_os_extension, find_jdk_executable, Toolchain};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Source of registered toolchains
pub trait ToolchainRegistry: Send + Sync {
    /// Toolchain of `kind` selected for the current build, if any
    fn find_in_build_context(
        &self,
        kind: &str,
        session: &BuildSession,
    ) -> Option<Box<dyn Toolchain>>;

    /// All toolchains of `kind` satisfying `requirements`, in registration order
    fn find_matching(
        &self,
        kind: &str,
        _requirements: &Requirements,
        _session: &BuildSession,
    ) -> JlinkwResult<Vec<Box<dyn Toolchain>>> {
        Err(JlinkwError::Unsupported(format!(
            "extended lookup of {} toolchains",
            kind
        )))
    }
}

fn default_kind() -> String {
    "jdk".to_string()
}

/// A JDK installation registered in `toolchains.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JdkToolchain {
    /// Toolchain kind
    #[serde(default = "default_kind")]
    pub kind: String,

    /// JDK home directory
    pub home: PathBuf,

    /// Attributes matched against requirements (version, vendor, ...)
    #[serde(default)]
    pub provides: BTreeMap<String, String>,
}

impl Toolchain for JdkToolchain {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn find_tool(&self, name: &str) -> Option<PathBuf> {
        find_jdk_executable(&self.home, name).map(ensure_os_extension)
    }
}

#[derive(Debug, Default, Deserialize)]
struct ToolchainsFile {
    #[serde(default)]
    toolchain: Vec<JdkToolchain>,
}

/// Registry backed by a TOML file of `[[toolchain]]` tables
#[derive(Debug, Clone, Default)]
pub struct FileToolchainRegistry {
    toolchains: Vec<JdkToolchain>,
}

impl FileToolchainRegistry {
    /// Create a registry from already loaded toolchains
    pub fn new(toolchains: Vec<JdkToolchain>) -> Self {
        Self { toolchains }
    }

    /// Load the registry; a missing file yields an empty registry
    pub fn load(path: &Path) -> JlinkwResult<Self> {
        if !path.exists() {
            debug!("No toolchains file at {}", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            JlinkwError::io(format!("reading toolchains from {}", path.display()), e)
        })?;
        Self::parse(&content).map_err(|e| JlinkwError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Parse registry content
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        let file: ToolchainsFile = toml::from_str(content)?;
        debug!("Loaded {} toolchains", file.toolchain.len());
        Ok(Self::new(file.toolchain))
    }

    /// Registered toolchains in file order
    pub fn toolchains(&self) -> &[JdkToolchain] {
        &self.toolchains
    }

    fn matching<'a>(
        &'a self,
        kind: &'a str,
        requirements: &'a Requirements,
    ) -> impl Iterator<Item = &'a JdkToolchain> {
        self.toolchains
            .iter()
            .filter(move |t| t.kind == kind && requirements_match(&t.provides, requirements))
    }
}

impl ToolchainRegistry for FileToolchainRegistry {
    fn find_in_build_context(
        &self,
        kind: &str,
        session: &BuildSession,
    ) -> Option<Box<dyn Toolchain>> {
        if !session.has_toolchain_selection() {
            return None;
        }
        self.matching(kind, &session.toolchain_requirements)
            .next()
            .map(|t| Box::new(t.clone()) as Box<dyn Toolchain>)
    }

    fn find_matching(
        &self,
        kind: &str,
        requirements: &Requirements,
        _session: &BuildSession,
    ) -> JlinkwResult<Vec<Box<dyn Toolchain>>> {
        Ok(self
            .matching(kind, requirements)
            .map(|t| Box::new(t.clone()) as Box<dyn Toolchain>)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TOOLCHAINS: &str = r#"
        [[toolchain]]
        home = "/usr/lib/jvm/jdk-11"
        [toolchain.provides]
        version = "11.0.21"
        vendor = "temurin"

        [[toolchain]]
        kind = "jdk"
        home = "/usr/lib/jvm/jdk-21"
        [toolchain.provides]
        version = "21.0.2"
        vendor = "temurin"

        [[toolchain]]
        kind = "netbeans"
        home = "/opt/netbeans"
    "#;

    fn session(pairs: &[(&str, &str)]) -> BuildSession {
        let requirements = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        BuildSession::new(false, requirements)
    }

    #[test]
    fn parses_toolchains_file() {
        let registry = FileToolchainRegistry::parse(TOOLCHAINS).unwrap();
        assert_eq!(registry.toolchains().len(), 3);
        assert_eq!(registry.toolchains()[0].kind, "jdk");
    }

    #[test]
    fn build_context_requires_selection() {
        let registry = FileToolchainRegistry::parse(TOOLCHAINS).unwrap();
        assert!(registry
            .find_in_build_context("jdk", &BuildSession::default())
            .is_none());
    }

    #[test]
    fn build_context_returns_first_match() {
        let registry = FileToolchainRegistry::parse(TOOLCHAINS).unwrap();
        let found = registry.find_in_build_context("jdk", &session(&[("vendor", "temurin")]));
        assert_eq!(
            format!("{:?}", found.unwrap()),
            format!("{:?}", registry.toolchains()[0])
        );
    }

    #[test]
    fn extended_lookup_filters_kind_and_version() {
        let registry = FileToolchainRegistry::parse(TOOLCHAINS).unwrap();
        let mut requirements = Requirements::new();
        requirements.insert("version".to_string(), "[17,)".to_string());

        let found = registry
            .find_matching("jdk", &requirements, &BuildSession::default())
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind(), "jdk");
    }

    #[test]
    fn missing_file_is_empty_registry() {
        let temp = TempDir::new().unwrap();
        let registry = FileToolchainRegistry::load(&temp.path().join("toolchains.toml")).unwrap();
        assert!(registry.toolchains().is_empty());
    }

    #[test]
    fn invalid_file_is_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("toolchains.toml");
        std::fs::write(&path, "[[toolchain]]\nkind = 3\n").unwrap();

        assert!(matches!(
            FileToolchainRegistry::load(&path),
            Err(JlinkwError::ConfigInvalid { .. })
        ));
    }
}
