//! Structured `[package].version` update for TOML manifests

use super::ManifestStrategy;
use crate::core::error::{ManifestError, RelverError, RelverResult};
use std::path::Path;
use toml_edit::DocumentMut;

/// Sets `[package].version` with a lossless TOML editor
///
/// Unlike `toml-pattern` this understands TOML structure, so it finds the
/// field wherever it sits in the table, at the cost of requiring a parseable
/// document.
pub struct TomlDocument;

impl TomlDocument {
  fn parse(path: &Path, content: &str) -> RelverResult<DocumentMut> {
    content.parse::<DocumentMut>().map_err(|e| {
      RelverError::Manifest(ManifestError::MalformedManifest {
        path: path.to_path_buf(),
        reason: e.to_string(),
      })
    })
  }
}

impl ManifestStrategy for TomlDocument {
  fn name(&self) -> &'static str {
    "toml-document"
  }

  fn apply(&self, path: &Path, content: &str, version: &str) -> RelverResult<String> {
    let mut doc = Self::parse(path, content)?;

    let Some(package) = doc.get_mut("package").and_then(|p| p.as_table_like_mut()) else {
      return Err(RelverError::Manifest(ManifestError::VersionFieldMissing {
        path: path.to_path_buf(),
        strategy: self.name().to_string(),
      }));
    };

    if !package.contains_key("version") {
      package.insert("version", toml_edit::value(version));
      return Ok(doc.to_string());
    }

    // `version.workspace = true` and other non-string forms are left alone
    let Some(existing) = package
      .get_mut("version")
      .and_then(|v| v.as_value_mut())
      .filter(|v| v.is_str())
    else {
      return Err(RelverError::Manifest(ManifestError::VersionFieldMissing {
        path: path.to_path_buf(),
        strategy: self.name().to_string(),
      }));
    };

    // Keep the existing value's decoration (spacing, trailing comment)
    let decor = existing.decor().clone();
    *existing = toml_edit::Value::from(version);
    *existing.decor_mut() = decor;

    Ok(doc.to_string())
  }

  fn read_version(&self, path: &Path, content: &str) -> RelverResult<Option<String>> {
    let doc = Self::parse(path, content)?;
    Ok(
      doc
        .get("package")
        .and_then(|p| p.get("version"))
        .and_then(|v| v.as_str())
        .map(str::to_string),
    )
  }
}
