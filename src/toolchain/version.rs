//! Java version requirements
//!
//! JDK versions come as `1.8`, `17`, `21.0.2+13` or `1.8.0_392`; they are
//! coerced to semver before matching. Requirements accept semver syntax
//! (`17`, `>=11`) and Maven-style ranges (`[1.8,)`, `[11,17)`).

use crate::session::Requirements;
use semver::{Version, VersionReq};
use std::collections::BTreeMap;

/// Coerce a Java version string into a semver version
pub fn coerce_version(raw: &str) -> Option<Version> {
    let core = raw.trim().split(['+', '-', '_']).next()?;
    let mut parts = core.split('.');

    let major = parts.next()?.parse::<u64>().ok()?;
    let minor = match parts.next() {
        Some(part) => part.parse::<u64>().ok()?,
        None => 0,
    };
    let patch = match parts.next() {
        Some(part) => part.parse::<u64>().ok()?,
        None => 0,
    };

    Some(Version::new(major, minor, patch))
}

/// Parse a version requirement in semver or Maven range syntax
pub fn parse_version_requirement(raw: &str) -> Option<VersionReq> {
    let raw = raw.trim();
    if raw.starts_with('[') || raw.starts_with('(') {
        return parse_maven_range(raw);
    }
    VersionReq::parse(raw).ok()
}

fn parse_maven_range(raw: &str) -> Option<VersionReq> {
    let lower_inclusive = raw.starts_with('[');
    let upper_inclusive = raw.ends_with(']');
    if !upper_inclusive && !raw.ends_with(')') {
        return None;
    }
    let body = &raw[1..raw.len() - 1];

    let Some((lower, upper)) = body.split_once(',') else {
        // `[17]` pins a single version
        let exact = body.trim();
        coerce_version(exact)?;
        return VersionReq::parse(&format!("={}", exact)).ok();
    };

    let mut comparators = Vec::new();
    if !lower.trim().is_empty() {
        let op = if lower_inclusive { ">=" } else { ">" };
        comparators.push(format!("{}{}", op, coerce_version(lower)?));
    }
    if !upper.trim().is_empty() {
        let op = if upper_inclusive { "<=" } else { "<" };
        comparators.push(format!("{}{}", op, coerce_version(upper)?));
    }
    if comparators.is_empty() {
        return Some(VersionReq::STAR);
    }

    VersionReq::parse(&comparators.join(", ")).ok()
}

/// Check that every requirement is satisfied by the provided attributes.
///
/// `version` is matched as a version requirement, all other keys by exact
/// string equality.
pub fn requirements_match(
    provides: &BTreeMap<String, String>,
    requirements: &Requirements,
) -> bool {
    requirements.iter().all(|(key, expected)| {
        let Some(provided) = provides.get(key) else {
            return false;
        };
        if key == "version" {
            match (parse_version_requirement(expected), coerce_version(provided)) {
                (Some(req), Some(version)) => req.matches(&version),
                _ => false,
            }
        } else {
            provided == expected
        }
    })
}
