//! Tool path resolution
//!
//! An explicit JDK home wins. Otherwise the toolchain selected by the build
//! is used, falling back to every registered JDK of version 1.8 or newer,
//! of which the last one registered is taken.

use crate::session::{BuildSession, Requirements};
use crate::toolchain::registry::ToolchainRegistry;
use crate::toolchain::{ensure_os_extension, find_jdk_executable, Toolchain};
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// Toolchain kind of JDK installations
pub const JDK_KIND: &str = "jdk";

/// Oldest JDK accepted by the extended lookup
pub const MIN_JDK_VERSION: &str = "[1.8,)";

/// Resolves JDK tools against a registry for one build session
pub struct ToolchainResolver<'a> {
    registry: &'a dyn ToolchainRegistry,
    session: &'a BuildSession,
}

impl<'a> ToolchainResolver<'a> {
    pub fn new(registry: &'a dyn ToolchainRegistry, session: &'a BuildSession) -> Self {
        Self { registry, session }
    }

    /// Resolve the path of `tool_name`.
    ///
    /// Returns `None` when neither the explicit JDK home nor any toolchain
    /// provides the tool; the caller decides whether that is fatal.
    pub fn resolve_tool_path(
        &self,
        tool_name: &str,
        explicit_jdk_home: Option<&Path>,
    ) -> Option<PathBuf> {
        if let Some(jdk_home) = explicit_jdk_home {
            if !jdk_home.is_dir() {
                error!("Can't find directory: {}", jdk_home.display());
                return None;
            }
            return find_jdk_executable(jdk_home, tool_name);
        }

        let toolchain = self.select_toolchain()?;
        debug!("Using toolchain {:?}", toolchain);
        toolchain.find_tool(tool_name).map(ensure_os_extension)
    }

    /// Pick the JDK toolchain for this build
    pub fn select_toolchain(&self) -> Option<Box<dyn Toolchain>> {
        if let Some(toolchain) = self.registry.find_in_build_context(JDK_KIND, self.session) {
            return Some(toolchain);
        }

        let mut requirements = Requirements::new();
        requirements.insert("version".to_string(), MIN_JDK_VERSION.to_string());

        match self
            .registry
            .find_matching(JDK_KIND, &requirements, self.session)
        {
            // Last registered toolchain has the highest priority
            Ok(mut toolchains) => toolchains.pop(),
            Err(e) => {
                debug!("Extended toolchain lookup failed: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{JlinkwError, JlinkwResult};
    use crate::toolchain::{FileToolchainRegistry, JdkToolchain};
    use std::collections::BTreeMap;
    use std::env::consts::EXE_SUFFIX;
    use tempfile::TempDir;

    /// Registry with only the single-result lookup
    struct ContextOnlyRegistry(Option<JdkToolchain>);

    impl ToolchainRegistry for ContextOnlyRegistry {
        fn find_in_build_context(
            &self,
            _kind: &str,
            _session: &BuildSession,
        ) -> Option<Box<dyn Toolchain>> {
            self.0.clone().map(|t| Box::new(t) as Box<dyn Toolchain>)
        }
    }

    /// Registry whose extended lookup fails
    struct FailingRegistry;

    impl ToolchainRegistry for FailingRegistry {
        fn find_in_build_context(
            &self,
            _kind: &str,
            _session: &BuildSession,
        ) -> Option<Box<dyn Toolchain>> {
            None
        }

        fn find_matching(
            &self,
            _kind: &str,
            _requirements: &Requirements,
            _session: &BuildSession,
        ) -> JlinkwResult<Vec<Box<dyn Toolchain>>> {
            Err(JlinkwError::Provider("registry offline".to_string()))
        }
    }

    fn fake_jdk(temp: &TempDir, name: &str, version: &str) -> JdkToolchain {
        let home = temp.path().join(name);
        let bin = home.join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        std::fs::write(bin.join(format!("jlink{}", EXE_SUFFIX)), "").unwrap();

        let mut provides = BTreeMap::new();
        provides.insert("version".to_string(), version.to_string());
        JdkToolchain {
            kind: JDK_KIND.to_string(),
            home,
            provides,
        }
    }

    #[test]
    fn explicit_home_wins() {
        let temp = TempDir::new().unwrap();
        let jdk = fake_jdk(&temp, "explicit", "21");
        let registry = ContextOnlyRegistry(None);
        let session = BuildSession::default();

        let found = ToolchainResolver::new(&registry, &session)
            .resolve_tool_path("jlink", Some(&jdk.home))
            .unwrap();
        assert!(found.starts_with(&jdk.home));
    }

    #[test]
    fn missing_explicit_home_is_none() {
        let temp = TempDir::new().unwrap();
        let registry = ContextOnlyRegistry(Some(fake_jdk(&temp, "ctx", "21")));
        let session = BuildSession::default();

        let found = ToolchainResolver::new(&registry, &session)
            .resolve_tool_path("jlink", Some(&temp.path().join("absent")));
        assert!(found.is_none());
    }

    #[test]
    fn extended_lookup_picks_last() {
        let temp = TempDir::new().unwrap();
        let old = fake_jdk(&temp, "jdk-7", "1.7");
        let first = fake_jdk(&temp, "jdk-11", "11");
        let last = fake_jdk(&temp, "jdk-21", "21");
        let registry = FileToolchainRegistry::new(vec![first, last.clone(), old]);
        let session = BuildSession::default();

        let found = ToolchainResolver::new(&registry, &session)
            .resolve_tool_path("jlink", None)
            .unwrap();
        assert!(found.starts_with(&last.home));
    }

    #[test]
    fn build_context_preferred_over_extended_lookup() {
        let temp = TempDir::new().unwrap();
        let jdk11 = fake_jdk(&temp, "jdk-11", "11");
        let jdk21 = fake_jdk(&temp, "jdk-21", "21");
        let registry = FileToolchainRegistry::new(vec![jdk11.clone(), jdk21]);
        let mut requirements = Requirements::new();
        requirements.insert("version".to_string(), "11".to_string());
        let session = BuildSession::new(false, requirements);

        let found = ToolchainResolver::new(&registry, &session)
            .resolve_tool_path("jlink", None)
            .unwrap();
        assert!(found.starts_with(&jdk11.home));
    }

    #[test]
    fn unsupported_extended_lookup_is_none() {
        let registry = ContextOnlyRegistry(None);
        let session = BuildSession::default();
        assert!(ToolchainResolver::new(&registry, &session)
            .resolve_tool_path("jlink", None)
            .is_none());
    }

    #[test]
    fn failing_extended_lookup_is_none() {
        let session = BuildSession::default();
        assert!(ToolchainResolver::new(&FailingRegistry, &session)
            .select_toolchain()
            .is_none());
    }
}
