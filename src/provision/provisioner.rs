//! Binary download and installation.
//!
//! Provisioning is best-effort: a missing release asset, an HTTP error or a
//! network failure is logged and reported, never raised. Only local
//! filesystem failures make provisioning fail.

use super::fetch::Fetcher;
use crate::core::config::ProvisionConfig;
use crate::core::error::{ProvisionError, RelverError, RelverResult};
use crate::ui::progress::DownloadProgress;
use crate::version::VersionRecord;
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const CHUNK_SIZE: usize = 8192;

/// How a provisioning attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionOutcome {
  /// Binary written and made executable
  Downloaded { path: PathBuf, bytes: u64, sha256: String },
  /// Server answered 404: no binary published for this version yet
  AssetMissing { url: String },
  /// No usable response: connection failure, timeout, or non-2xx status
  TransportError {
    url: String,
    status: Option<u16>,
    reason: String,
  },
  /// Local filesystem failure; the only fatal outcome
  FilesystemError { path: PathBuf, reason: String },
}

impl ProvisionOutcome {
  /// Turn a filesystem failure into an error, pass everything else through
  pub fn into_result(self) -> RelverResult<Self> {
    match self {
      ProvisionOutcome::FilesystemError { path, reason } => {
        Err(RelverError::Provision(ProvisionError::Filesystem { path, reason }))
      }
      other => Ok(other),
    }
  }
}

impl fmt::Display for ProvisionOutcome {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ProvisionOutcome::Downloaded { path, bytes, sha256 } => {
        write!(f, "installed {} ({} bytes, sha256 {})", path.display(), bytes, sha256)
      }
      ProvisionOutcome::AssetMissing { url } => {
        write!(f, "no prebuilt binary published at {}; skipping download", url)
      }
      ProvisionOutcome::TransportError {
        url,
        status: Some(status),
        ..
      } => write!(f, "download of {} failed with HTTP {}; skipping download", url, status),
      ProvisionOutcome::TransportError { url, reason, .. } => {
        write!(f, "download of {} failed: {}; skipping download", url, reason)
      }
      ProvisionOutcome::FilesystemError { path, reason } => {
        write!(f, "cannot write {}: {}", path.display(), reason)
      }
    }
  }
}

/// Downloads the release binary matching a version record
pub struct BinaryProvisioner<F: Fetcher> {
  fetcher: F,
  host: String,
  org: String,
  tool: String,
  show_progress: bool,
}

impl<F: Fetcher> BinaryProvisioner<F> {
  pub fn new(fetcher: F, config: &ProvisionConfig) -> Self {
    Self {
      fetcher,
      host: config.host.clone(),
      org: config.org.clone(),
      tool: config.tool.clone(),
      show_progress: false,
    }
  }

  /// Draw a progress bar while downloading
  pub fn with_progress(mut self, show: bool) -> Self {
    self.show_progress = show;
    self
  }

  /// Release download URL for a version and artifact
  ///
  /// `host` may carry its own scheme (e.g. `http://127.0.0.1:8080` for a local
  /// mirror); otherwise https is used.
  pub fn download_url(&self, version: &str, artifact: &str) -> String {
    let base = if self.host.starts_with("http://") || self.host.starts_with("https://") {
      self.host.trim_end_matches('/').to_string()
    } else {
      format!("https://{}", self.host.trim_end_matches('/'))
    };
    format!(
      "{}/{}/{}/releases/download/v{}/{}",
      base, self.org, self.tool, version, artifact
    )
  }

  /// Download `artifact` for `record.version` into `dest_dir/artifact`
  ///
  /// The body is streamed into a temporary file next to the destination,
  /// made executable, then renamed into place, so the artifact name never
  /// points at a partial download.
  pub fn provision(&self, record: &VersionRecord, artifact: &str, dest_dir: &Path) -> ProvisionOutcome {
    if let Err(e) = fs::create_dir_all(dest_dir) {
      return filesystem_error(dest_dir, e);
    }

    let url = self.download_url(&record.version, artifact);
    log::info!("downloading {}", url);

    let response = match self.fetcher.fetch(&url) {
      Ok(response) => response,
      Err(e) => {
        let outcome = ProvisionOutcome::TransportError {
          url,
          status: None,
          reason: e.to_string(),
        };
        log::error!("{}", outcome);
        return outcome;
      }
    };

    if response.status == 404 {
      let outcome = ProvisionOutcome::AssetMissing { url };
      log::warn!("{}", outcome);
      return outcome;
    }

    if !(200..300).contains(&response.status) {
      let outcome = ProvisionOutcome::TransportError {
        url,
        status: Some(response.status),
        reason: format!("HTTP {}", response.status),
      };
      log::error!("{}", outcome);
      return outcome;
    }

    let target = dest_dir.join(artifact);
    let outcome = self.stream_to(&url, response.body, response.content_length, dest_dir, &target);
    match &outcome {
      ProvisionOutcome::Downloaded { .. } => log::info!("{}", outcome),
      ProvisionOutcome::FilesystemError { .. } | ProvisionOutcome::TransportError { .. } => log::error!("{}", outcome),
      ProvisionOutcome::AssetMissing { .. } => log::warn!("{}", outcome),
    }
    outcome
  }

  fn stream_to(
    &self,
    url: &str,
    mut body: Box<dyn Read + Send>,
    content_length: Option<u64>,
    dest_dir: &Path,
    target: &Path,
  ) -> ProvisionOutcome {
    let mut temp = match NamedTempFile::new_in(dest_dir) {
      Ok(temp) => temp,
      Err(e) => return filesystem_error(dest_dir, e),
    };

    let mut progress = match content_length {
      Some(total) if self.show_progress && total > 0 => Some(DownloadProgress::new(total, url_filename(url))),
      _ => None,
    };

    let mut hasher = Sha256::new();
    let mut bytes: u64 = 0;
    let mut buffer = [0u8; CHUNK_SIZE];

    loop {
      let read = match body.read(&mut buffer) {
        Ok(0) => break,
        Ok(n) => n,
        Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
        Err(e) => {
          return ProvisionOutcome::TransportError {
            url: url.to_string(),
            status: None,
            reason: format!("connection lost after {} bytes: {}", bytes, e),
          };
        }
      };

      if let Err(e) = temp.write_all(&buffer[..read]) {
        return filesystem_error(target, e);
      }
      hasher.update(&buffer[..read]);
      bytes += read as u64;

      if let Some(progress) = progress.as_mut() {
        progress.inc(read);
      }
    }

    if let Err(e) = temp.flush() {
      return filesystem_error(target, e);
    }
    if let Err(e) = make_executable(temp.path()) {
      return filesystem_error(target, e);
    }
    if let Err(e) = temp.persist(target) {
      return filesystem_error(target, e.error);
    }

    ProvisionOutcome::Downloaded {
      path: target.to_path_buf(),
      bytes,
      sha256: format!("{:x}", hasher.finalize()),
    }
  }
}

fn filesystem_error(path: &Path, err: std::io::Error) -> ProvisionOutcome {
  ProvisionOutcome::FilesystemError {
    path: path.to_path_buf(),
    reason: err.to_string(),
  }
}

fn url_filename(url: &str) -> String {
  url.rsplit('/').next().unwrap_or(url).to_string()
}

/// rwxr-xr-x
#[cfg(unix)]
fn make_executable(path: &Path) -> std::io::Result<()> {
  use std::os::unix::fs::PermissionsExt;
  fs::set_permissions(path, fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> std::io::Result<()> {
  Ok(())
}
