//! Propagates the canonical version into dependent manifests
//!
//! Each manifest is an independent update: a failure stops the remaining
//! manifests but does not roll back the ones already written. Re-running the
//! sync is always safe since every strategy is idempotent.

use super::StrategyKind;
use crate::core::config::ManifestConfig;
use crate::core::error::{ManifestError, RelverError, RelverResult};
use crate::core::fs::write_atomic;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// One manifest as the synchronizer sees it
#[derive(Debug, Clone)]
pub struct ManifestTarget {
  /// Absolute path
  pub path: PathBuf,
  pub strategy: StrategyKind,
}

/// What a sync did
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
  /// Manifests whose content changed
  pub updated: Vec<PathBuf>,
  /// Manifests that already carried the version
  pub unchanged: Vec<PathBuf>,
}

/// A manifest and the version it currently carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestState {
  pub path: PathBuf,
  /// `None` when the file is missing, unreadable or has no version field
  pub version: Option<String>,
}

/// Writes the record version into every configured manifest
pub struct ManifestSynchronizer {
  targets: Vec<ManifestTarget>,
}

impl ManifestSynchronizer {
  pub fn new(targets: Vec<ManifestTarget>) -> Self {
    Self { targets }
  }

  /// Build from config entries relative to a project root
  pub fn from_config(root: &Path, manifests: &[ManifestConfig]) -> Self {
    Self::new(
      manifests
        .iter()
        .map(|m| ManifestTarget {
          path: root.join(&m.path),
          strategy: m.strategy,
        })
        .collect(),
    )
  }

  /// Read the version every manifest carries right now, without writing
  pub fn inspect(&self) -> Vec<ManifestState> {
    self
      .targets
      .iter()
      .map(|target| {
        let version = fs::read_to_string(&target.path)
          .ok()
          .and_then(|content| {
            target
              .strategy
              .strategy()
              .read_version(&target.path, &content)
              .ok()
          })
          .flatten();
        ManifestState {
          path: target.path.clone(),
          version,
        }
      })
      .collect()
  }

  /// Sync every manifest to `version`, in order
  pub fn sync(&self, version: &str) -> RelverResult<SyncReport> {
    let mut report = SyncReport::default();

    for target in &self.targets {
      let changed = sync_one(target, version).map_err(|e| {
        if !report.updated.is_empty() {
          log::warn!(
            "{} manifest(s) were already updated to {} before this failure",
            report.updated.len(),
            version
          );
        }
        e
      })?;

      if changed {
        log::info!("synced {} to {}", target.path.display(), version);
        report.updated.push(target.path.clone());
      } else {
        report.unchanged.push(target.path.clone());
      }
    }

    Ok(report)
  }
}

/// Update a single manifest; returns whether the file changed
fn sync_one(target: &ManifestTarget, version: &str) -> RelverResult<bool> {
  let content = fs::read_to_string(&target.path).map_err(|e| {
    if e.kind() == io::ErrorKind::NotFound {
      RelverError::Manifest(ManifestError::ManifestNotFound {
        path: target.path.clone(),
      })
    } else {
      RelverError::Manifest(ManifestError::MalformedManifest {
        path: target.path.clone(),
        reason: e.to_string(),
      })
    }
  })?;

  let updated = target.strategy.strategy().apply(&target.path, &content, version)?;
  if updated == content {
    return Ok(false);
  }

  write_atomic(&target.path, updated.as_bytes()).map_err(|e| {
    RelverError::Manifest(ManifestError::ManifestUnwritable {
      path: target.path.clone(),
      reason: e.to_string(),
    })
  })?;

  Ok(true)
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(
      temp.path().join("package.json"),
      "{\n  \"name\": \"tool\",\n  \"version\": \"0.1.0\"\n}\n",
    )
    .unwrap();
    fs::write(
      temp.path().join("Cargo.toml"),
      "[package]\nname = \"tool\"\nversion = \"0.1.0\" # synced\n",
    )
    .unwrap();
    temp
  }

  fn defaults(root: &Path) -> ManifestSynchronizer {
    ManifestSynchronizer::from_config(root, &crate::core::config::RelverConfig::default().manifests)
  }

  #[test]
  fn test_sync_updates_all_manifests() {
    let temp = project();
    let report = defaults(temp.path()).sync("1.4.0-beta.1").unwrap();

    assert_eq!(report.updated.len(), 2);
    let pkg: serde_json::Value =
      serde_json::from_str(&fs::read_to_string(temp.path().join("package.json")).unwrap()).unwrap();
    assert_eq!(pkg["version"], "1.4.0-beta.1");
    assert_eq!(
      fs::read_to_string(temp.path().join("Cargo.toml")).unwrap(),
      "[package]\nname = \"tool\"\nversion = \"1.4.0-beta.1\" # synced\n"
    );
  }

  #[test]
  fn test_sync_is_idempotent() {
    let temp = project();
    let sync = defaults(temp.path());
    sync.sync("2.0.0").unwrap();
    let second = sync.sync("2.0.0").unwrap();

    assert!(second.updated.is_empty());
    assert_eq!(second.unchanged.len(), 2);
  }

  #[test]
  fn test_missing_manifest_stops_without_rollback() {
    let temp = project();
    fs::remove_file(temp.path().join("Cargo.toml")).unwrap();

    let err = defaults(temp.path()).sync("3.0.0").unwrap_err();
    assert!(matches!(
      err,
      RelverError::Manifest(ManifestError::ManifestNotFound { .. })
    ));

    // package.json was synced first and stays synced
    let pkg: serde_json::Value =
      serde_json::from_str(&fs::read_to_string(temp.path().join("package.json")).unwrap()).unwrap();
    assert_eq!(pkg["version"], "3.0.0");
  }

  #[test]
  fn test_read_only_manifest_is_unwritable() {
    let temp = project();
    let cargo = temp.path().join("Cargo.toml");
    let mut perms = fs::metadata(&cargo).unwrap().permissions();
    perms.set_readonly(true);
    fs::set_permissions(&cargo, perms).unwrap();

    let sync = ManifestSynchronizer::new(vec![ManifestTarget {
      path: cargo.clone(),
      strategy: StrategyKind::TomlPattern,
    }]);
    let err = sync.sync("0.2.0").unwrap_err();

    assert!(matches!(
      err,
      RelverError::Manifest(ManifestError::ManifestUnwritable { .. })
    ));
    assert!(fs::read_to_string(&cargo).unwrap().contains("version = \"0.1.0\""));
  }
}
