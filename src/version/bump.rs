//! Semantic version bumping against the version record

use crate::core::error::RelverResult;
use crate::version::record::VersionStore;
use crate::version::semver::{BumpKind, parse_version};

/// Outcome of a bump
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpResult {
  pub previous: String,
  pub next: String,
  pub kind: BumpKind,
}

/// Computes the next version and writes it through the store
pub struct VersionBumper<'a> {
  store: &'a VersionStore,
}

impl<'a> VersionBumper<'a> {
  pub fn new(store: &'a VersionStore) -> Self {
    Self { store }
  }

  /// Next version for the stored record, without writing
  pub fn preview(&self, kind: &str) -> RelverResult<BumpResult> {
    let record = self.store.load()?;
    compute(&record.version, kind)
  }

  /// Bump the stored version and persist it
  ///
  /// The kind is validated before the record is touched, and an invalid stored
  /// version aborts before any write.
  pub fn bump(&self, kind: &str) -> RelverResult<BumpResult> {
    let kind: BumpKind = kind.parse()?;
    let (_, result) = self.store.update(|record| {
      let result = compute(&record.version, kind.as_str())?;
      record.version = result.next.clone();
      Ok(result)
    })?;

    log::info!("bumped version {} -> {} ({})", result.previous, result.next, result.kind);
    Ok(result)
  }
}

/// Pure bump computation on a version string
pub fn compute(current: &str, kind: &str) -> RelverResult<BumpResult> {
  let kind: BumpKind = kind.parse()?;
  let parsed = parse_version(current)?;
  Ok(BumpResult {
    previous: current.to_string(),
    next: kind.apply(&parsed).to_string(),
    kind,
  })
}
