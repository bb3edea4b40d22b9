//! The version record file and its single-writer store

use crate::core::error::{RelverError, RelverResult, VersionError};
use crate::core::fs::write_atomic;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Canonical version record
///
/// Unknown fields are kept in `extra` and written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionRecord {
  pub version: String,
  /// Build counter; absent or null reads as 0
  #[serde(default, deserialize_with = "deserialize_build")]
  pub build: u64,
  #[serde(rename = "lastCommit", default, skip_serializing_if = "Option::is_none")]
  pub last_commit: Option<String>,
  #[serde(flatten)]
  pub extra: serde_json::Map<String, serde_json::Value>,
}

fn deserialize_build<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
  D: serde::Deserializer<'de>,
{
  Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or(0))
}

impl VersionRecord {
  /// Fresh record with no build history
  pub fn new(version: impl Into<String>) -> Self {
    Self {
      version: version.into(),
      build: 0,
      last_commit: None,
      extra: serde_json::Map::new(),
    }
  }

  /// Parse a record document
  pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
    serde_json::from_str(content)
  }

  /// Serialize with 2-space indentation and a trailing newline
  pub fn to_json(&self) -> Result<String, serde_json::Error> {
    let mut out = serde_json::to_string_pretty(self)?;
    out.push('\n');
    Ok(out)
  }
}

/// Reads and writes the version record file
///
/// All mutation goes through [`VersionStore::update`], the one place a
/// cross-process file lock would be taken.
#[derive(Debug, Clone)]
pub struct VersionStore {
  path: PathBuf,
}

impl VersionStore {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Load the record
  pub fn load(&self) -> RelverResult<VersionRecord> {
    let content = fs::read_to_string(&self.path).map_err(|e| {
      if e.kind() == io::ErrorKind::NotFound {
        RelverError::Version(VersionError::RecordNotFound {
          path: self.path.clone(),
        })
      } else {
        RelverError::Version(VersionError::MalformedRecord {
          path: self.path.clone(),
          reason: e.to_string(),
        })
      }
    })?;

    VersionRecord::from_json(&content).map_err(|e| {
      RelverError::Version(VersionError::MalformedRecord {
        path: self.path.clone(),
        reason: e.to_string(),
      })
    })
  }

  /// Write the full record, replacing the file atomically
  pub fn save(&self, record: &VersionRecord) -> RelverResult<()> {
    let json = record.to_json()?;
    write_atomic(&self.path, json.as_bytes())?;
    log::debug!("wrote {}", self.path.display());
    Ok(())
  }

  /// Load, mutate, save
  ///
  /// Nothing is written when `mutate` fails.
  pub fn update<T, F>(&self, mutate: F) -> RelverResult<(VersionRecord, T)>
  where
    F: FnOnce(&mut VersionRecord) -> RelverResult<T>,
  {
    let mut record = self.load()?;
    let value = mutate(&mut record)?;
    self.save(&record)?;
    Ok((record, value))
  }
}
