//! Build session state
//!
//! Ambient state of the build that invokes jlinkw: whether it runs offline
//! and which toolchain it selected.

use std::collections::BTreeMap;

/// Toolchain requirements, e.g. `version = "17"`, `vendor = "temurin"`
pub type Requirements = BTreeMap<String, String>;

/// State of the current build invocation
#[derive(Debug, Clone, Default)]
pub struct BuildSession {
    /// The build as a whole runs without network access
    pub offline: bool,
    /// JDK requirements the build selected for its toolchain
    pub toolchain_requirements: Requirements,
}

impl BuildSession {
    /// Create a session
    pub fn new(offline: bool, toolchain_requirements: Requirements) -> Self {
        Self {
            offline,
            toolchain_requirements,
        }
    }

    /// Whether the build selected a toolchain at all
    pub fn has_toolchain_selection(&self) -> bool {
        !self.toolchain_requirements.is_empty()
    }
}

/// Offline mode: cache-only configuration or an offline build session
pub fn offline_mode(use_only_cache: bool, session: &BuildSession) -> bool {
    use_only_cache || session.offline
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offline_when_either_signal_set() {
        let online = BuildSession::default();
        let offline = BuildSession::new(true, Requirements::new());

        assert!(!offline_mode(false, &online));
        assert!(offline_mode(true, &online));
        assert!(offline_mode(false, &offline));
        assert!(offline_mode(true, &offline));
    }

    #[test]
    fn toolchain_selection() {
        let mut requirements = Requirements::new();
        assert!(!BuildSession::new(false, requirements.clone()).has_toolchain_selection());
        requirements.insert("version".to_string(), "21".to_string());
        assert!(BuildSession::new(false, requirements).has_toolchain_selection());
    }
}
