//! jlink command line assembly

use crate::error::{JlinkwError, JlinkwResult};
use crate::jlink::modules::join_modules;
use crate::provider::JMODS_DIR;
use std::fmt;
use std::path::Path;
use tokio::fs;
use tracing::warn;

pub const OUTPUT_FLAG: &str = "--output";
pub const MODULE_PATH_FLAG: &str = "--module-path";
pub const ADD_MODULES_FLAG: &str = "--add-modules";

/// An assembled command; element zero is the executable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine(Vec<String>);

impl CommandLine {
    #[cfg(test)]
    pub(crate) fn from_argv(argv: Vec<String>) -> Self {
        assert!(!argv.is_empty(), "command line needs an executable");
        Self(argv)
    }

    /// Executable path
    pub fn program(&self) -> &str {
        &self.0[0]
    }

    /// Arguments after the executable
    pub fn args(&self) -> &[String] {
        &self.0[1..]
    }

    /// Full argument vector
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}

/// Build the jlink invocation.
///
/// `passthrough` options are kept in order, followed by the module path of
/// the provider JDK. Modules are merged into an existing `--add-modules`
/// value when the caller supplied one, otherwise a new flag is appended.
pub fn build_command(
    jlink_exe: &Path,
    output: &Path,
    jdk_home: &Path,
    modules: &[String],
    passthrough: &[String],
) -> JlinkwResult<CommandLine> {
    let joined = join_modules(modules);
    let mut options = passthrough.to_vec();
    let existing = options.iter().position(|o| o == ADD_MODULES_FLAG);
    let trailing = existing.is_some_and(|index| index + 1 == passthrough.len());

    if (existing.is_none() || trailing) && joined.is_empty() {
        return Err(JlinkwError::NoModules);
    }

    // A trailing flag takes the module list as its value
    if trailing {
        options.push(joined.clone());
    }

    options.push(MODULE_PATH_FLAG.to_string());
    options.push(jdk_home.join(JMODS_DIR).to_string_lossy().into_owned());

    match existing {
        None => {
            options.push(ADD_MODULES_FLAG.to_string());
            options.push(joined);
        }
        Some(index) if !trailing && !joined.is_empty() => {
            let value = &mut options[index + 1];
            value.push(',');
            value.push_str(&joined);
        }
        Some(_) => {}
    }

    let mut argv = Vec::with_capacity(options.len() + 3);
    argv.push(jlink_exe.to_string_lossy().into_owned());
    argv.push(OUTPUT_FLAG.to_string());
    argv.push(output.to_string_lossy().into_owned());
    argv.extend(options);

    Ok(CommandLine(argv))
}

/// Delete a previous image so jlink can create the output folder
pub async fn clear_output_dir(output: &Path) -> JlinkwResult<()> {
    if !output.is_dir() {
        return Ok(());
    }

    warn!("Deleting existing output folder: {}", output.display());
    fs::remove_dir_all(output)
        .await
        .map_err(|e| JlinkwError::io(format!("deleting output folder {}", output.display()), e))
}
