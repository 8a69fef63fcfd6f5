//! # Version Parsing and Release Selection
//!
//! This module provides the version handling used when resolving a "latest"
//! upstream ref. Upstream release tags follow a loose `vMAJOR.MINOR.PATCH`
//! convention, with occasional short tags (`v1.9`) and pre-release suffixes
//! (`v1.9.0-rc1`), so the standard semver rules do not apply directly:
//!
//! - Tags with fewer than three numeric components are zero-padded on the
//!   right (`v1.9` orders like `1.9.0`).
//! - A `-`-delimited suffix marks a pre-release tag. The suffix is ignored
//!   for ordering but makes the tag ineligible for "latest" selection.
//! - More than three numeric components is rejected as malformed.
//!
//! ## Process
//!
//! 1. **Parsing**: Each raw tag string is parsed into a [`Version`] holding
//!    the numeric triple, the optional suffix, and the original string.
//! 2. **Release Filtering**: Tags carrying a suffix are dropped.
//! 3. **Selection**: The maximum remaining version (numeric triple ordering,
//!    so `1.10.0 > 1.2.0`) is returned; an empty remainder is an error.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::error::{Error, Result};

/// A parsed version tag.
///
/// Ordering and equality consider the numeric `(major, minor, patch)` triple
/// only; the pre-release suffix is deliberately excluded so that `v1.9.0-rc1`
/// and `v1.9.0` compare equal. Release eligibility is a separate property,
/// queried via [`Version::is_release`].
#[derive(Debug, Clone)]
pub struct Version {
    raw: String,
    triple: (u64, u64, u64),
    suffix: Option<String>,
}

impl Version {
    /// Parse a raw tag string into a `Version`.
    ///
    /// Accepts an optional leading `v` and an optional `-`-delimited
    /// pre-release suffix. Fails with [`Error::MalformedVersion`] when a
    /// numeric component does not parse or more than three components are
    /// present.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.strip_prefix('v').unwrap_or(raw);

        let (numeric, suffix) = match trimmed.split_once('-') {
            Some((numeric, suffix)) => (numeric, Some(suffix.to_string())),
            None => (trimmed, None),
        };

        let mut components = Vec::new();
        for part in numeric.split('.') {
            let value = part.parse::<u64>().map_err(|_| Error::MalformedVersion {
                raw: raw.to_string(),
                message: format!("non-numeric component {:?}", part),
            })?;
            components.push(value);
        }

        if components.len() > 3 {
            return Err(Error::MalformedVersion {
                raw: raw.to_string(),
                message: format!("{} numeric components, expected at most 3", components.len()),
            });
        }
        // Short tags zero-pad on the right: v1.9 orders like 1.9.0.
        components.resize(3, 0);

        Ok(Self {
            raw: raw.to_string(),
            triple: (components[0], components[1], components[2]),
            suffix,
        })
    }

    /// The major version number.
    pub fn major(&self) -> u64 {
        self.triple.0
    }

    /// The minor version number.
    pub fn minor(&self) -> u64 {
        self.triple.1
    }

    /// The patch version number.
    pub fn patch(&self) -> u64 {
        self.triple.2
    }

    /// The numeric `(major, minor, patch)` triple.
    pub fn triple(&self) -> (u64, u64, u64) {
        self.triple
    }

    /// The pre-release suffix, if any.
    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    /// Whether this version is a release (no pre-release suffix).
    ///
    /// Only release versions are eligible for "latest" selection.
    pub fn is_release(&self) -> bool {
        self.suffix.is_none()
    }

    /// The original tag string this version was parsed from.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.triple == other.triple
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.triple.cmp(&other.triple)
    }
}

/// Select the latest release version from a list of raw tag strings.
///
/// Tags that do not parse as versions are skipped (upstream repositories
/// carry non-version tags), pre-release tags are filtered out, and the
/// maximum of the remainder is returned. Fails with
/// [`Error::NoReleaseFound`] when nothing release-eligible remains.
///
/// If two distinct tags map to an equal numeric triple, whichever scans
/// later is returned; the choice is non-deterministic across input
/// orderings in that degenerate case.
pub fn select_latest(tags: &[String]) -> Result<Version> {
    let mut latest: Option<Version> = None;

    for tag in tags {
        let version = match Version::parse(tag) {
            Ok(version) => version,
            Err(err) => {
                debug!("Skipping unparsable tag {:?}: {}", tag, err);
                continue;
            }
        };
        if !version.is_release() {
            debug!("Skipping pre-release tag {:?}", tag);
            continue;
        }
        match &latest {
            Some(current) if version < *current => {}
            _ => latest = Some(version),
        }
    }

    latest.ok_or(Error::NoReleaseFound { count: tags.len() })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_full_triple() {
        let v = Version::parse("v1.22.2").unwrap();
        assert_eq!(v.triple(), (1, 22, 2));
        assert!(v.is_release());
        assert_eq!(v.to_string(), "v1.22.2");
    }

    #[test]
    fn test_parse_without_v_prefix() {
        let v = Version::parse("2.0.1").unwrap();
        assert_eq!(v.triple(), (2, 0, 1));
    }

    #[test]
    fn test_parse_short_versions_zero_pad() {
        assert_eq!(Version::parse("v1").unwrap().triple(), (1, 0, 0));
        assert_eq!(Version::parse("v1.9").unwrap().triple(), (1, 9, 0));
    }

    #[test]
    fn test_parse_suffix_marks_pre_release() {
        let v = Version::parse("v1.9.0-rc1").unwrap();
        assert_eq!(v.triple(), (1, 9, 0));
        assert_eq!(v.suffix(), Some("rc1"));
        assert!(!v.is_release());
    }

    #[test]
    fn test_parse_suffix_with_dashes() {
        // Only the first dash delimits the suffix
        let v = Version::parse("v1.2.3-preview-2").unwrap();
        assert_eq!(v.suffix(), Some("preview-2"));
    }

    #[test]
    fn test_parse_rejects_four_components() {
        let err = Version::parse("v1.2.3.4").unwrap_err();
        assert!(matches!(err, Error::MalformedVersion { .. }));
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        let err = Version::parse("v1.x.0").unwrap_err();
        assert!(matches!(err, Error::MalformedVersion { .. }));
    }

    #[test]
    fn test_ordering_is_numeric_not_lexicographic() {
        let small = Version::parse("v1.2.0").unwrap();
        let large = Version::parse("v1.10.0").unwrap();
        assert!(large > small);
    }

    #[test]
    fn test_equality_ignores_suffix() {
        let release = Version::parse("v1.9.0").unwrap();
        let rc = Version::parse("v1.9.0-rc1").unwrap();
        assert_eq!(release, rc);
    }

    #[test]
    fn test_select_latest_skips_pre_releases() {
        let latest =
            select_latest(&tags(&["v1.2.0", "v1.10.0", "v1.9.9-preview"])).unwrap();
        assert_eq!(latest.triple(), (1, 10, 0));
        assert_eq!(latest.to_string(), "v1.10.0");
    }

    #[test]
    fn test_select_latest_empty_fails() {
        let err = select_latest(&[]).unwrap_err();
        assert!(matches!(err, Error::NoReleaseFound { count: 0 }));
    }

    #[test]
    fn test_select_latest_only_pre_releases_fails() {
        let err = select_latest(&tags(&["v1.0.0-rc1"])).unwrap_err();
        assert!(matches!(err, Error::NoReleaseFound { count: 1 }));
    }

    #[test]
    fn test_select_latest_skips_non_version_tags() {
        let latest =
            select_latest(&tags(&["pico-w-initial", "v1.19.1", "docs-freeze"])).unwrap();
        assert_eq!(latest.to_string(), "v1.19.1");
    }

    #[test]
    fn test_select_latest_pads_short_tags() {
        // v1.9 orders as 1.9.0, below 1.9.4
        let latest = select_latest(&tags(&["v1.9", "v1.9.4"])).unwrap();
        assert_eq!(latest.to_string(), "v1.9.4");
    }
}
