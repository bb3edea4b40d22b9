//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const RECORD: &str = "project-version.json";

/// A project with a version record, two manifests and git history
pub struct TestProject {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestProject {
  /// Project at version `version` with build `build`, committed once
  pub fn new(version: &str, build: u64) -> Result<Self> {
    let project = Self::bare(version, build)?;

    git(&project.path, &["init", "--initial-branch=main"])?;
    git(&project.path, &["config", "user.name", "Test User"])?;
    git(&project.path, &["config", "user.email", "test@example.com"])?;
    git(&project.path, &["add", "."])?;
    git(&project.path, &["commit", "-m", "Initial project setup"])?;

    Ok(project)
  }

  /// Same layout without a git repository
  pub fn bare(version: &str, build: u64) -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();

    std::fs::write(
      path.join(RECORD),
      format!("{{\n  \"version\": \"{}\",\n  \"build\": {}\n}}\n", version, build),
    )?;
    std::fs::write(
      path.join("package.json"),
      format!(
        "{{\n  \"name\": \"demo\",\n  \"version\": \"{}\",\n  \"scripts\": {{\n    \"postinstall\": \"relver postinstall\"\n  }}\n}}\n",
        version
      ),
    )?;
    std::fs::write(
      path.join("Cargo.toml"),
      format!(
        r#"# demo crate
[package]
name = "demo"
version = "{}"   # kept in sync by relver
rust-version = "1.80.0"

[dependencies]
serde = {{ version = "1.0" }}
"#,
        version
      ),
    )?;

    Ok(Self { _root: root, path })
  }

  /// Current HEAD commit
  pub fn head(&self) -> Result<String> {
    let output = git(&self.path, &["rev-parse", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Parsed version record
  pub fn record(&self) -> Result<serde_json::Value> {
    let content = self.read_file(RECORD)?;
    serde_json::from_str(&content).context("version record is not valid JSON")
  }

  /// Check if a file exists
  pub fn file_exists(&self, path: &str) -> bool {
    self.path.join(path).exists()
  }

  /// Read a file
  pub fn read_file(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(path))?)
  }

  /// Write a file, creating parent directories
  pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
    let full = self.path.join(path);
    if let Some(parent) = full.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(full, content)?;
    Ok(())
  }
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run relver and return its output whatever the exit status
pub fn run_relver(cwd: &Path, args: &[&str]) -> Result<Output> {
  let relver_bin = env!("CARGO_BIN_EXE_relver");

  Command::new(relver_bin)
    .current_dir(cwd)
    .args(args)
    .env_remove("RELVER_VERSION")
    .env("RUST_LOG", "warn")
    .output()
    .context("Failed to run relver")
}

/// Run relver and fail unless it exits 0
pub fn run_relver_ok(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_relver(cwd, args)?;

  if !output.status.success() {
    anyhow::bail!(
      "relver command failed: relver {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      String::from_utf8_lossy(&output.stdout),
      String::from_utf8_lossy(&output.stderr)
    );
  }

  Ok(output)
}

/// Exit code of a finished process
pub fn exit_code(output: &Output) -> i32 {
  output.status.code().unwrap_or(-1)
}
