//! System git backend
//!
//! Runs the `git` executable with an isolated environment. Only the handful of
//! read-only queries the release workflow needs are exposed.

use crate::core::error::{GitError, RelverError, RelverResult};
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Git backend using system git
pub struct SystemGit {
  /// Directory git commands run in
  pub(crate) repo_path: PathBuf,
}

impl SystemGit {
  /// Open a git repository
  ///
  /// Fails with `RepoNotFound` outside a checkout and `Unavailable` when the
  /// git executable cannot be started.
  pub fn open(path: &Path) -> RelverResult<Self> {
    let output = Command::new("git")
      .arg("-C")
      .arg(path)
      .args(["rev-parse", "--show-toplevel"])
      .output()
      .map_err(unavailable)?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("not a git repository") {
        return Err(RelverError::Git(GitError::RepoNotFound {
          path: path.to_path_buf(),
        }));
      }
      return Err(RelverError::Git(GitError::CommandFailed {
        command: "git rev-parse --show-toplevel".to_string(),
        stderr: stderr.to_string(),
      }));
    }

    Ok(Self {
      repo_path: path.to_path_buf(),
    })
  }

  /// Get HEAD commit SHA
  ///
  /// Fails on a repository without commits (unborn HEAD).
  pub fn head_commit(&self) -> RelverResult<String> {
    let output = self.git_cmd().args(["rev-parse", "HEAD"]).output().map_err(unavailable)?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(RelverError::Git(GitError::CommandFailed {
        command: "git rev-parse HEAD".to_string(),
        stderr: stderr.to_string(),
      }));
    }

    let sha = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if !is_valid_sha(&sha) {
      return Err(RelverError::Git(GitError::CommandFailed {
        command: "git rev-parse HEAD".to_string(),
        stderr: format!("unexpected output '{}'", sha),
      }));
    }

    Ok(sha)
  }

  /// Create a safe git command with isolated environment
  ///
  /// - Sets working directory to repo path
  /// - Clears environment variables
  /// - Whitelists only PATH and HOME
  pub(crate) fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(&self.repo_path);

    // Isolated environment (don't trust global config)
    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
      cmd.env("PATH", path);
    }
    if let Ok(home) = std::env::var("HOME") {
      cmd.env("HOME", home);
    }

    cmd.arg("-c").arg("core.quotePath=false");

    cmd
  }
}

fn unavailable(err: io::Error) -> RelverError {
  RelverError::Git(GitError::Unavailable { reason: err.to_string() })
}

/// Validate SHA format (40 hex chars for SHA-1, 64 for SHA-256 repositories)
fn is_valid_sha(sha: &str) -> bool {
  (sha.len() == 40 || sha.len() == 64) && sha.chars().all(|c| c.is_ascii_hexdigit())
}
