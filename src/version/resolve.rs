//! Runtime resolution of the installed version
//!
//! Checked in order: the `RELVER_VERSION` override, a record next to the
//! running executable (placed there by `copy-version`), the record at the
//! project root, and finally the version relver was compiled as.

use crate::version::record::{VersionRecord, VersionStore};
use crate::version::semver::is_valid_version;
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};

/// Environment override for the reported version
pub const VERSION_ENV: &str = "RELVER_VERSION";

/// Where the effective version came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "kebab-case")]
pub enum VersionSource {
  Environment,
  BesideExecutable(PathBuf),
  ProjectRoot(PathBuf),
  Compiled,
}

/// Effective version and the record it came from, if any
#[derive(Debug, Clone)]
pub struct ResolvedVersion {
  pub record: VersionRecord,
  pub source: VersionSource,
}

/// Inputs for resolution, gathered once from the process environment
#[derive(Debug, Clone, Default)]
pub struct ResolveInputs {
  pub env_override: Option<String>,
  pub exe_dir: Option<PathBuf>,
  pub project_record: Option<PathBuf>,
}

impl ResolveInputs {
  /// Gather inputs from the running process
  pub fn from_process(project_record: Option<PathBuf>) -> Self {
    Self {
      env_override: env::var(VERSION_ENV).ok(),
      exe_dir: env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf)),
      project_record,
    }
  }
}

/// Resolve the effective version
pub fn resolve(inputs: &ResolveInputs, record_filename: &str) -> ResolvedVersion {
  if let Some(v) = inputs.env_override.as_deref().map(str::trim)
    && !v.is_empty()
  {
    if is_valid_version(v) {
      return ResolvedVersion {
        record: VersionRecord::new(v),
        source: VersionSource::Environment,
      };
    }
    log::warn!("ignoring {}={:?}: not a MAJOR.MINOR.PATCH version", VERSION_ENV, v);
  }

  if let Some(dir) = &inputs.exe_dir {
    let path = dir.join(record_filename);
    if let Some(record) = try_load(&path) {
      return ResolvedVersion {
        record,
        source: VersionSource::BesideExecutable(path),
      };
    }
  }

  if let Some(path) = &inputs.project_record
    && let Some(record) = try_load(path)
  {
    return ResolvedVersion {
      record,
      source: VersionSource::ProjectRoot(path.clone()),
    };
  }

  ResolvedVersion {
    record: VersionRecord::new(env!("CARGO_PKG_VERSION")),
    source: VersionSource::Compiled,
  }
}

fn try_load(path: &Path) -> Option<VersionRecord> {
  if !path.is_file() {
    return None;
  }
  match VersionStore::new(path).load() {
    Ok(record) => Some(record),
    Err(e) => {
      log::warn!("ignoring unreadable version record: {}", e);
      None
    }
  }
}
