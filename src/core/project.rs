//! Project root discovery
//!
//! A project root is the nearest ancestor of the working directory holding the
//! version record or a relver config file.

use crate::core::config::{CONFIG_CANDIDATES, RECORD_FILENAME};
use crate::core::error::{RelverError, RelverResult};
use std::env;
use std::path::{Path, PathBuf};

/// Returns true if the directory looks like a project root
pub fn is_project_root(dir: &Path) -> bool {
  dir.join(RECORD_FILENAME).is_file() || CONFIG_CANDIDATES.iter().any(|c| dir.join(c).is_file())
}

/// Walk upward from `start` to the first project root
pub fn find_project_root_from(start: &Path) -> Option<PathBuf> {
  start
    .ancestors()
    .find(|ancestor| is_project_root(ancestor))
    .map(Path::to_path_buf)
}

/// Project root for the current working directory
///
/// Falls back to the working directory itself when no marker is found, so
/// commands report a precise "not found" error for the record later on.
pub fn project_root() -> RelverResult<PathBuf> {
  let cwd = current_dir()?;
  Ok(find_project_root_from(&cwd).unwrap_or(cwd))
}

/// Current working directory with a readable error
pub fn current_dir() -> RelverResult<PathBuf> {
  env::current_dir().map_err(|e| {
    RelverError::with_help(
      format!("Failed to get current directory: {}", e),
      "Run relver from a directory that still exists.",
    )
  })
}
