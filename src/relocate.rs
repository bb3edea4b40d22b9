//! Copying the version record next to a built binary
//!
//! Bundled binaries ship without the project tree, so the record is placed in
//! the binary's directory where runtime version resolution looks for it.

use crate::core::config::RECORD_FILENAME;
use crate::core::error::{RelocateError, RelverError, RelverResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Where the record should be copied to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
  /// Path of a binary; the record goes into its directory
  Binary(PathBuf),
  /// Explicit directory
  Directory(PathBuf),
  /// Current working directory
  WorkingDir,
}

impl Destination {
  /// Pick a destination from CLI flags; `--binary` wins over `--out-dir`
  pub fn from_args(binary: Option<PathBuf>, out_dir: Option<PathBuf>) -> Self {
    match (binary, out_dir) {
      (Some(binary), _) => Destination::Binary(binary),
      (None, Some(dir)) => Destination::Directory(dir),
      (None, None) => Destination::WorkingDir,
    }
  }

  /// Resolve to a concrete directory
  ///
  /// A binary path is reduced to its parent when it is an existing file or
  /// looks like a file name (has an extension); otherwise it is taken as a
  /// directory. Relative paths are anchored at `cwd`.
  pub fn resolve(&self, cwd: Option<&Path>) -> RelverResult<PathBuf> {
    let dir = match self {
      Destination::Binary(path) => {
        if path.as_os_str().is_empty() {
          return Err(unresolved("--binary was given an empty path"));
        }
        if path.is_file() || path.extension().is_some() {
          match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            Some(_) => PathBuf::new(),
            None => return Err(unresolved(format!("{} has no parent directory", path.display()))),
          }
        } else {
          path.clone()
        }
      }
      Destination::Directory(dir) => {
        if dir.as_os_str().is_empty() {
          return Err(unresolved("--out-dir was given an empty path"));
        }
        dir.clone()
      }
      Destination::WorkingDir => PathBuf::new(),
    };

    if dir.is_absolute() {
      return Ok(dir);
    }

    let cwd = cwd.ok_or_else(|| unresolved("the current working directory is not accessible"))?;
    if dir.as_os_str().is_empty() {
      Ok(cwd.to_path_buf())
    } else {
      Ok(cwd.join(dir))
    }
  }
}

/// Copies a version record into a destination directory
pub struct BinaryRelocator {
  source: PathBuf,
}

impl BinaryRelocator {
  pub fn new(source: impl Into<PathBuf>) -> Self {
    Self { source: source.into() }
  }

  pub fn source(&self) -> &Path {
    &self.source
  }

  /// Resolve `destination` and copy the record there under its canonical name
  ///
  /// Returns the path of the written copy.
  pub fn relocate(&self, destination: &Destination, cwd: Option<&Path>) -> RelverResult<PathBuf> {
    if !self.source.is_file() {
      return Err(RelverError::Relocate(RelocateError::SourceNotFound {
        path: self.source.clone(),
      }));
    }

    let dir = destination.resolve(cwd)?;
    let target = dir.join(RECORD_FILENAME);

    fs::create_dir_all(&dir).map_err(|e| self.copy_failed(&target, e))?;

    if is_same_file(&self.source, &target) {
      log::debug!("{} is already in place", target.display());
      return Ok(target);
    }

    fs::copy(&self.source, &target).map_err(|e| self.copy_failed(&target, e))?;
    log::info!("copied {} to {}", self.source.display(), target.display());

    Ok(target)
  }

  fn copy_failed(&self, target: &Path, err: std::io::Error) -> RelverError {
    RelverError::Relocate(RelocateError::CopyFailed {
      from: self.source.clone(),
      to: target.to_path_buf(),
      reason: err.to_string(),
    })
  }
}

fn unresolved(reason: impl Into<String>) -> RelverError {
  RelverError::Relocate(RelocateError::DestinationUnresolved { reason: reason.into() })
}

// Copying a file onto itself truncates it
fn is_same_file(a: &Path, b: &Path) -> bool {
  match (fs::canonicalize(a), fs::canonicalize(b)) {
    (Ok(a), Ok(b)) => a == b,
    _ => false,
  }
}
