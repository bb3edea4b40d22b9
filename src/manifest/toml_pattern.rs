//! In-place `version = "..."` substitution
//!
//! Only the value between the quotes of the first matching line changes; every
//! other byte (comments, spacing, ordering) is left exactly as it was. A line
//! only matches when `version` is the first token on it, so `rust-version`
//! and inline-table dependency versions are never touched.

use super::ManifestStrategy;
use crate::core::error::{ManifestError, RelverError, RelverResult};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static VERSION_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"(?m)^[ \t]*version[ \t]*=[ \t]*"([^"\r\n]*)""#).expect("version assignment pattern is valid")
});

pub struct TomlPattern;

impl TomlPattern {
  fn missing(&self, path: &Path) -> RelverError {
    RelverError::Manifest(ManifestError::VersionFieldMissing {
      path: path.to_path_buf(),
      strategy: self.name().to_string(),
    })
  }
}

impl ManifestStrategy for TomlPattern {
  fn name(&self) -> &'static str {
    "toml-pattern"
  }

  fn apply(&self, path: &Path, content: &str, version: &str) -> RelverResult<String> {
    let value = VERSION_ASSIGNMENT
      .captures(content)
      .and_then(|caps| caps.get(1))
      .ok_or_else(|| self.missing(path))?;

    let mut out = String::with_capacity(content.len() + version.len());
    out.push_str(&content[..value.start()]);
    out.push_str(version);
    out.push_str(&content[value.end()..]);
    Ok(out)
  }

  fn read_version(&self, _path: &Path, content: &str) -> RelverResult<Option<String>> {
    Ok(
      VERSION_ASSIGNMENT
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string()),
    )
  }
}
