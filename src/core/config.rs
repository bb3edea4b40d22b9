use crate::core::error::{ConfigError, RelverError, RelverResult};
use crate::manifest::StrategyKind;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Canonical filename of the version record
pub const RECORD_FILENAME: &str = "project-version.json";

/// Config file locations, relative to the project root, in search order
pub const CONFIG_CANDIDATES: [&str; 3] = ["relver.toml", ".relver.toml", ".config/relver.toml"];

/// Configuration for relver
/// Searched in order: relver.toml, .relver.toml, .config/relver.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelverConfig {
  /// Version record path, relative to the project root
  #[serde(default = "default_record")]
  pub record: PathBuf,
  /// Dependent manifests, synced in this order
  #[serde(default = "default_manifests")]
  pub manifests: Vec<ManifestConfig>,
  #[serde(default)]
  pub provision: ProvisionConfig,
}

/// One dependent manifest and the strategy used to update it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestConfig {
  pub path: PathBuf,
  pub strategy: StrategyKind,
}

/// Where prebuilt binaries are downloaded from and installed to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisionConfig {
  /// Release host, e.g. "github.com" or "127.0.0.1:8080"
  #[serde(default = "default_host")]
  pub host: String,
  #[serde(default = "default_org")]
  pub org: String,
  /// Tool name, used both in the URL path and as artifact prefix
  #[serde(default = "default_tool")]
  pub tool: String,
  /// Install directory, relative to the install root
  #[serde(default = "default_bin_dir")]
  pub bin_dir: PathBuf,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

fn default_record() -> PathBuf {
  PathBuf::from(RECORD_FILENAME)
}

fn default_manifests() -> Vec<ManifestConfig> {
  vec![
    ManifestConfig {
      path: PathBuf::from("package.json"),
      strategy: StrategyKind::Json,
    },
    ManifestConfig {
      path: PathBuf::from("Cargo.toml"),
      strategy: StrategyKind::TomlPattern,
    },
  ]
}

fn default_host() -> String {
  "github.com".to_string()
}

fn default_org() -> String {
  "relver-project".to_string()
}

fn default_tool() -> String {
  "relver".to_string()
}

fn default_bin_dir() -> PathBuf {
  PathBuf::from("bin")
}

fn default_timeout_secs() -> u64 {
  300
}

impl Default for ProvisionConfig {
  fn default() -> Self {
    Self {
      host: default_host(),
      org: default_org(),
      tool: default_tool(),
      bin_dir: default_bin_dir(),
      timeout_secs: default_timeout_secs(),
    }
  }
}

impl Default for RelverConfig {
  fn default() -> Self {
    Self {
      record: default_record(),
      manifests: default_manifests(),
      provision: ProvisionConfig::default(),
    }
  }
}

impl RelverConfig {
  /// Find the config file under a project root, if any
  pub fn find_config_path(root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
      .iter()
      .map(|candidate| root.join(candidate))
      .find(|path| path.is_file())
  }

  /// Load configuration for a project root, falling back to defaults
  pub fn load(root: &Path) -> RelverResult<Self> {
    let Some(path) = Self::find_config_path(root) else {
      log::debug!("no relver config under {}, using defaults", root.display());
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&path)?;
    let config: RelverConfig = toml_edit::de::from_str(&content).map_err(|e| {
      RelverError::Config(ConfigError::Parse {
        path: path.clone(),
        reason: e.to_string(),
      })
    })?;

    config.validate()?;
    log::debug!("loaded config from {}", path.display());
    Ok(config)
  }

  /// Validate configuration
  pub fn validate(&self) -> RelverResult<()> {
    if self.record.as_os_str().is_empty() {
      return Err(invalid("record path must not be empty"));
    }

    let mut seen = HashSet::new();
    for manifest in &self.manifests {
      if manifest.path.as_os_str().is_empty() {
        return Err(invalid("manifest path must not be empty"));
      }
      if !seen.insert(&manifest.path) {
        return Err(invalid(format!("manifest '{}' is listed twice", manifest.path.display())));
      }
    }

    let provision = &self.provision;
    if provision.host.trim().is_empty() || provision.org.trim().is_empty() || provision.tool.trim().is_empty() {
      return Err(invalid("provision host, org and tool must not be empty"));
    }
    if provision.timeout_secs == 0 {
      return Err(invalid("provision timeout_secs must be greater than zero"));
    }

    Ok(())
  }

  /// Absolute path of the version record for a project root
  pub fn record_path(&self, root: &Path) -> PathBuf {
    root.join(&self.record)
  }
}

fn invalid(reason: impl Into<String>) -> RelverError {
  RelverError::Config(ConfigError::Invalid { reason: reason.into() })
}
