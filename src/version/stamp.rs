//! Build counter and revision stamping

use crate::core::error::RelverResult;
use crate::core::vcs::RevisionSource;
use crate::version::record::{VersionRecord, VersionStore};

/// Result of a stamp
#[derive(Debug, Clone)]
pub struct StampResult {
  /// Record as persisted
  pub record: VersionRecord,
  /// Set when the revision could not be read; `lastCommit` was left as is
  pub warning: Option<String>,
}

/// Increments the build counter and records the current revision
pub struct BuildStamper<'a, R: RevisionSource> {
  store: &'a VersionStore,
  revisions: R,
}

impl<'a, R: RevisionSource> BuildStamper<'a, R> {
  pub fn new(store: &'a VersionStore, revisions: R) -> Self {
    Self { store, revisions }
  }

  /// Stamp the record
  ///
  /// A missing VCS context is not an error: the counter still advances and a
  /// warning is logged and returned.
  pub fn stamp(&self) -> RelverResult<StampResult> {
    let (record, warning) = self.store.update(|record| {
      record.build = record.build.saturating_add(1);

      match self.revisions.current_revision() {
        Ok(sha) => {
          record.last_commit = Some(sha);
          Ok(None)
        }
        Err(e) => {
          let warning = format!("could not read current revision, lastCommit left unchanged: {}", e);
          log::warn!("{}", warning);
          Ok(Some(warning))
        }
      }
    })?;

    log::info!("stamped build {} ({})", record.build, record.last_commit.as_deref().unwrap_or("no revision"));
    Ok(StampResult { record, warning })
  }
}
