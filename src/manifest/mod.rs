//! Dependent manifest update strategies
//!
//! This module provides a small abstraction for writing the canonical version
//! into files owned by other ecosystems.
//!
//! Currently supports:
//! - `json`: parse and rewrite a JSON document's top-level `version` (package.json)
//! - `toml-pattern`: replace the first `version = "..."` line in place, byte-exact elsewhere
//! - `toml-document`: set `[package].version` through a format-preserving TOML parser

use crate::core::error::RelverResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

pub mod json;
pub mod sync;
pub mod toml_document;
pub mod toml_pattern;

pub use sync::{ManifestState, ManifestSynchronizer, SyncReport};

/// Strategy identifiers as written in relver.toml
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
  Json,
  TomlPattern,
  TomlDocument,
}

impl StrategyKind {
  /// Get the strategy implementation for this kind
  pub fn strategy(self) -> Box<dyn ManifestStrategy> {
    match self {
      StrategyKind::Json => Box::new(json::JsonRewrite),
      StrategyKind::TomlPattern => Box::new(toml_pattern::TomlPattern),
      StrategyKind::TomlDocument => Box::new(toml_document::TomlDocument),
    }
  }
}

impl fmt::Display for StrategyKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.strategy().name())
  }
}

/// Manifest update strategy
///
/// Strategies are pure text transforms; reading, writing and error mapping
/// for missing or unwritable files live in the synchronizer.
pub trait ManifestStrategy: Send + Sync {
  /// Name as used in relver.toml
  fn name(&self) -> &'static str;

  /// Return `content` with its version field set to `version`
  ///
  /// `path` is only used for error messages.
  fn apply(&self, path: &Path, content: &str, version: &str) -> RelverResult<String>;

  /// Read the version field, if present
  fn read_version(&self, path: &Path, content: &str) -> RelverResult<Option<String>>;
}
