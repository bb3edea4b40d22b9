pub mod system_git;

pub use system_git::SystemGit;

use crate::core::error::RelverResult;
use std::path::{Path, PathBuf};

/// Source of the current version-control revision
///
/// The build stamper only needs "what is HEAD right now"; hiding that behind a
/// trait keeps the stamper testable without a real repository.
pub trait RevisionSource {
  /// Full identifier of the checked-out revision
  fn current_revision(&self) -> RelverResult<String>;
}

impl<R: RevisionSource> RevisionSource for &R {
  fn current_revision(&self) -> RelverResult<String> {
    R::current_revision(*self)
  }
}

/// Revision source backed by the system `git` in a given directory
#[derive(Debug, Clone)]
pub struct GitRevision {
  dir: PathBuf,
}

impl GitRevision {
  pub fn new(dir: &Path) -> Self {
    Self { dir: dir.to_path_buf() }
  }
}

impl RevisionSource for GitRevision {
  fn current_revision(&self) -> RelverResult<String> {
    SystemGit::open(&self.dir)?.head_commit()
  }
}
