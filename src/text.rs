//! Text extraction helpers
//!
//! Pure parsing of checksum lines and jdeps dependency reports.

use crate::error::{JlinkwError, JlinkwResult};

/// Extract the hash from a `<hex>  <file name>` checksum line.
///
/// Leading and trailing whitespace is ignored. The hash must be a non-empty
/// run of hex digits followed by whitespace and a non-empty file name.
pub fn extract_file_hash(line: &str) -> JlinkwResult<String> {
    let text = line.trim();
    let hash_end = text
        .find(|c: char| !c.is_ascii_hexdigit())
        .unwrap_or(text.len());
    let (hash, rest) = text.split_at(hash_end);

    let has_separator = rest.starts_with(char::is_whitespace);
    let has_file_name = !rest.trim_start().is_empty();

    if hash.is_empty() || !has_separator || !has_file_name {
        return Err(JlinkwError::Parse(format!(
            "Can't extract file hash from '{}'",
            line
        )));
    }

    Ok(hash.to_string())
}

/// Extract target module names from a jdeps report.
///
/// Every line of the form `<source> -> <target>` contributes its trimmed
/// target. Targets containing whitespace carry annotations such as
/// `(not found)` or a package plus module pair and are skipped.
pub fn extract_module_names(report: &str) -> Vec<String> {
    report
        .split('\n')
        .filter_map(|line| line.rsplit_once("->"))
        .map(|(_, target)| target.trim())
        .filter(|target| !target.is_empty() && !target.contains(char::is_whitespace))
        .map(str::to_string)
        .collect()
}
