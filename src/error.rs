//! Error types for jlinkw
//!
//! All modules use `JlinkwResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for jlinkw operations
pub type JlinkwResult<T> = Result<T, JlinkwError>;

/// Hint attached to jlink failures that look like a JDK version mismatch.
pub const INCOMPATIBLE_JDK_HINT: &str =
    "It looks like the working JDK is incompatible with the source module JDK";

/// All errors that can occur in jlinkw
#[derive(Error, Debug)]
pub enum JlinkwError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown JDK provider: {0}")]
    UnknownProvider(String),

    #[error("Can't find {tool} in JDK")]
    ToolNotFound { tool: String },

    #[error("There are no modules to be added")]
    NoModules,

    // Provider errors
    #[error("JDK not available in cache and offline mode is active: {artifact}")]
    OfflineUnavailable { artifact: String },

    #[error("Provider failure: {0}")]
    Provider(String),

    #[error("Operation not supported: {0}")]
    Unsupported(String),

    // Input errors
    #[error("Can't read jdeps report {path}: {source}")]
    ReportRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{reason}: {path}")]
    PathInvalid { path: PathBuf, reason: String },

    // Process errors
    #[error("Can't launch {command}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Execution interrupted")]
    Interrupted,

    #[error("jlink returned error status code {code}\n{diagnostic}")]
    ToolExecution { code: i32, diagnostic: String },

    // Serialization errors
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl JlinkwError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a path validation error
    pub fn path_invalid(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::PathInvalid {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a launch error
    pub fn launch(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::Launch {
            command: command.into(),
            source,
        }
    }

    /// True for failures detected before any external process runs
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Configuration(_)
                | Self::ConfigInvalid { .. }
                | Self::UnknownProvider(_)
                | Self::ToolNotFound { .. }
                | Self::NoModules
        )
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::OfflineUnavailable { .. } => {
                Some("Disable offline mode (--offline / cache.use_only_cache) to allow fetching")
            }
            Self::UnknownProvider(_) => Some("Supported providers: local"),
            Self::NoModules => {
                Some("Set jlink.add_modules, pass --add-modules or provide a jdeps report")
            }
            Self::ToolNotFound { .. } => {
                Some("Set toolchains.tool_jdk or register a JDK in toolchains.toml")
            }
            Self::ToolExecution { diagnostic, .. }
                if diagnostic.contains(INCOMPATIBLE_JDK_HINT) =>
            {
                Some("Run jlink from a JDK matching the provider JDK version")
            }
            _ => None,
        }
    }
}
