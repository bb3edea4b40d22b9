//! bump → stamp → sync as one release

use crate::core::error::{RelverResult, ResultExt};
use crate::core::vcs::RevisionSource;
use crate::manifest::{ManifestState, ManifestSynchronizer, SyncReport};
use crate::version::bump::BumpResult;
use crate::version::{BuildStamper, VersionBumper, VersionStore};
use serde::Serialize;
use std::path::PathBuf;

/// Everything a successful release changed
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseReport {
  pub previous_version: String,
  pub version: String,
  pub build: u64,
  pub last_commit: Option<String>,
  pub updated_manifests: Vec<PathBuf>,
  pub unchanged_manifests: Vec<PathBuf>,
  /// Non-fatal problems (e.g. no VCS context)
  pub warnings: Vec<String>,
}

/// What a dry run would do
#[derive(Debug, Clone)]
pub struct ReleasePreview {
  pub record: PathBuf,
  pub bump: BumpResult,
  pub manifests: Vec<ManifestState>,
}

/// Orchestrates a release against one project
pub struct ReleasePipeline<R: RevisionSource> {
  store: VersionStore,
  revisions: R,
  synchronizer: ManifestSynchronizer,
}

impl<R: RevisionSource> ReleasePipeline<R> {
  pub fn new(store: VersionStore, revisions: R, synchronizer: ManifestSynchronizer) -> Self {
    Self {
      store,
      revisions,
      synchronizer,
    }
  }

  /// Run the release; the first failing step aborts the rest
  pub fn release(&self, kind: &str) -> RelverResult<ReleaseReport> {
    let bump = VersionBumper::new(&self.store).bump(kind)?;

    let stamp = BuildStamper::new(&self.store, &self.revisions)
      .stamp()
      .with_context(|| format!("Version was bumped to {} but build stamping failed", bump.next))?;

    let SyncReport { updated, unchanged } = self.synchronizer.sync(&stamp.record.version)?;

    Ok(ReleaseReport {
      previous_version: bump.previous,
      version: stamp.record.version,
      build: stamp.record.build,
      last_commit: stamp.record.last_commit,
      updated_manifests: updated,
      unchanged_manifests: unchanged,
      warnings: stamp.warning.into_iter().collect(),
    })
  }

  /// Compute the release without writing anything
  pub fn preview(&self, kind: &str) -> RelverResult<ReleasePreview> {
    let bump = VersionBumper::new(&self.store).preview(kind)?;
    Ok(ReleasePreview {
      record: self.store.path().to_path_buf(),
      bump,
      manifests: self.synchronizer.inspect(),
    })
  }
}
