//! Structured rewrite for JSON package descriptors

use super::ManifestStrategy;
use crate::core::error::{ManifestError, RelverError, RelverResult};
use serde_json::Value;
use std::path::Path;

/// Parses the whole document, sets the top-level `version`, re-serializes
///
/// Key order is kept; indentation is normalized to two spaces with a trailing
/// newline, matching what npm writes.
pub struct JsonRewrite;

impl JsonRewrite {
  fn parse(path: &Path, content: &str) -> RelverResult<serde_json::Map<String, Value>> {
    match serde_json::from_str::<Value>(content) {
      Ok(Value::Object(map)) => Ok(map),
      Ok(_) => Err(malformed(path, "top-level value is not an object")),
      Err(e) => Err(malformed(path, e.to_string())),
    }
  }
}

impl ManifestStrategy for JsonRewrite {
  fn name(&self) -> &'static str {
    "json"
  }

  fn apply(&self, path: &Path, content: &str, version: &str) -> RelverResult<String> {
    let mut doc = Self::parse(path, content)?;
    doc.insert("version".to_string(), Value::String(version.to_string()));

    let mut out = serde_json::to_string_pretty(&Value::Object(doc))?;
    out.push('\n');
    Ok(out)
  }

  fn read_version(&self, path: &Path, content: &str) -> RelverResult<Option<String>> {
    let doc = Self::parse(path, content)?;
    Ok(doc.get("version").and_then(Value::as_str).map(str::to_string))
  }
}

fn malformed(path: &Path, reason: impl Into<String>) -> RelverError {
  RelverError::Manifest(ManifestError::MalformedManifest {
    path: path.to_path_buf(),
    reason: reason.into(),
  })
}
