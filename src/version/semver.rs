//! Version grammar and bump kinds
//!
//! Accepted grammar: `MAJOR.MINOR.PATCH[-PRERELEASE]`, where the numeric parts
//! are non-negative integers and PRERELEASE is a dot-separated list of
//! alphanumeric identifiers (hyphens allowed). Build metadata (`+...`), a `v`
//! prefix and any other component count are rejected.

use crate::core::error::{RelverError, RelverResult, VersionError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static VERSION_GRAMMAR: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^(\d+)\.(\d+)\.(\d+)(?:-([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?$").expect("version grammar is valid")
});

/// Parse a version string against the record grammar
///
/// The prerelease tag is carried over verbatim so callers can tell whether one
/// was present; bumping always drops it.
pub fn parse_version(version: &str) -> RelverResult<semver::Version> {
  let invalid = || {
    RelverError::Version(VersionError::InvalidVersionFormat {
      version: version.to_string(),
    })
  };

  let caps = VERSION_GRAMMAR.captures(version).ok_or_else(invalid)?;
  let number = |i: usize| caps[i].parse::<u64>().map_err(|_| invalid());

  let mut parsed = semver::Version::new(number(1)?, number(2)?, number(3)?);
  if let Some(pre) = caps.get(4) {
    // The grammar is looser than semver here (leading zeros in numeric
    // identifiers); fall back to an empty tag rather than rejecting it.
    parsed.pre = semver::Prerelease::new(pre.as_str()).unwrap_or(semver::Prerelease::EMPTY);
  }
  Ok(parsed)
}

/// Returns true if the string matches the record grammar
pub fn is_valid_version(version: &str) -> bool {
  parse_version(version).is_ok()
}

/// Which version component a release increments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpKind {
  /// Breaking changes
  Major,
  /// New features
  Minor,
  /// Bug fixes
  Patch,
}

impl BumpKind {
  /// Apply bump to a version; prerelease and build metadata are dropped
  pub fn apply(&self, version: &semver::Version) -> semver::Version {
    match self {
      BumpKind::Major => semver::Version::new(version.major.saturating_add(1), 0, 0),
      BumpKind::Minor => semver::Version::new(version.major, version.minor.saturating_add(1), 0),
      BumpKind::Patch => semver::Version::new(version.major, version.minor, version.patch.saturating_add(1)),
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      BumpKind::Major => "major",
      BumpKind::Minor => "minor",
      BumpKind::Patch => "patch",
    }
  }
}

impl FromStr for BumpKind {
  type Err = RelverError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "major" => Ok(BumpKind::Major),
      "minor" => Ok(BumpKind::Minor),
      "patch" => Ok(BumpKind::Patch),
      _ => Err(RelverError::Version(VersionError::UnrecognizedBumpKind { kind: s.to_string() })),
    }
  }
}

impl fmt::Display for BumpKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
