//! Target platform detection for binary downloads.

use crate::core::error::{ProvisionError, RelverError, RelverResult};
use std::fmt;

/// Platforms with a published prebuilt binary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
  Windows,
  MacOS,
  Linux,
}

impl Platform {
  /// Parse a platform identifier
  ///
  /// Accepts Rust (`std::env::consts::OS`) and Node (`process.platform`)
  /// spellings, case-insensitively.
  pub fn from_id(id: &str) -> RelverResult<Self> {
    match id.trim().to_ascii_lowercase().as_str() {
      "windows" | "win32" => Ok(Platform::Windows),
      "macos" | "darwin" => Ok(Platform::MacOS),
      "linux" => Ok(Platform::Linux),
      _ => Err(RelverError::Provision(ProvisionError::UnsupportedPlatform {
        platform: id.to_string(),
      })),
    }
  }

  /// Detect the running platform
  pub fn current() -> RelverResult<Self> {
    Self::from_id(std::env::consts::OS)
  }

  /// Rust target triple of the published binary
  pub fn target_triple(&self) -> &'static str {
    match self {
      Platform::Windows => "x86_64-pc-windows-msvc",
      Platform::MacOS => "x86_64-apple-darwin",
      Platform::Linux => "x86_64-unknown-linux-gnu",
    }
  }

  /// Release asset filename for `tool` on this platform
  pub fn artifact_name(&self, tool: &str) -> String {
    match self {
      Platform::Windows => format!("{}-{}.exe", tool, self.target_triple()),
      Platform::MacOS | Platform::Linux => format!("{}-{}", tool, self.target_triple()),
    }
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Platform::Windows => "windows",
      Platform::MacOS => "macos",
      Platform::Linux => "linux",
    };
    f.write_str(name)
  }
}

/// Map a platform identifier straight to an artifact name
pub fn resolve(platform_id: &str, tool: &str) -> RelverResult<String> {
  Ok(Platform::from_id(platform_id)?.artifact_name(tool))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_resolve_supported_platforms() {
    assert_eq!(resolve("windows", "tool").unwrap(), "tool-x86_64-pc-windows-msvc.exe");
    assert_eq!(resolve("win32", "tool").unwrap(), "tool-x86_64-pc-windows-msvc.exe");
    assert_eq!(resolve("macos", "tool").unwrap(), "tool-x86_64-apple-darwin");
    assert_eq!(resolve("darwin", "tool").unwrap(), "tool-x86_64-apple-darwin");
    assert_eq!(resolve("Linux", "tool").unwrap(), "tool-x86_64-unknown-linux-gnu");
  }

  #[test]
  fn test_resolve_unsupported() {
    for id in ["freebsd", "aix", "android", ""] {
      assert!(matches!(
        resolve(id, "tool"),
        Err(RelverError::Provision(ProvisionError::UnsupportedPlatform { .. }))
      ));
    }
  }

  #[test]
  fn test_display_round_trips_through_from_id() {
    for platform in [Platform::Windows, Platform::MacOS, Platform::Linux] {
      assert_eq!(Platform::from_id(&platform.to_string()).unwrap(), platform);
    }
  }

  #[cfg(target_os = "linux")]
  #[test]
  fn test_linux_platform() {
    assert_eq!(Platform::current().unwrap(), Platform::Linux);
  }

  #[cfg(target_os = "macos")]
  #[test]
  fn test_macos_platform() {
    assert_eq!(Platform::current().unwrap(), Platform::MacOS);
  }

  #[cfg(target_os = "windows")]
  #[test]
  fn test_windows_platform() {
    assert_eq!(Platform::current().unwrap(), Platform::Windows);
  }
}
