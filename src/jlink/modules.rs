//! Module list for `--add-modules`

use crate::error::{JlinkwError, JlinkwResult};
use crate::text::extract_module_names;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Merge modules mined from a jdeps report with explicitly configured ones.
///
/// Report modules come first in report order, followed by explicit modules
/// in configured order. Names are trimmed and blank explicit entries dropped;
/// duplicates are kept since jlink accepts them.
pub fn build_module_list(
    explicit: &[String],
    jdeps_report: Option<&Path>,
) -> JlinkwResult<Vec<String>> {
    let mut modules = match jdeps_report {
        Some(path) => read_report_modules(path)?,
        None => Vec::new(),
    };

    modules.extend(
        explicit
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(str::to_string),
    );

    Ok(modules)
}

/// Join modules into the `--add-modules` value
pub fn join_modules(modules: &[String]) -> String {
    modules.join(",")
}

fn read_report_modules(path: &Path) -> JlinkwResult<Vec<String>> {
    let bytes = fs::read(path).map_err(|e| JlinkwError::ReportRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let modules = extract_module_names(&String::from_utf8_lossy(&bytes));
    debug!(
        "Found {} modules in jdeps report {}",
        modules.len(),
        path.display()
    );
    Ok(modules)
}
