//! Integration tests for `relver postinstall`
//!
//! No test reaches the internet: downloads target a closed loopback port.

use crate::helpers::{TestProject, exit_code, run_relver, run_relver_ok};
use anyhow::Result;

const UNREACHABLE: &str = r#"
[provision]
host = "http://127.0.0.1:9"
org = "acme"
tool = "widget"
timeout_secs = 5
"#;

#[test]
fn test_unsupported_platform_installs_nothing() -> Result<()> {
  let project = TestProject::bare("1.3.0", 6)?;
  project.write_file("relver.toml", UNREACHABLE)?;

  let output = run_relver_ok(&project.path, &["postinstall", "--platform", "solaris"])?;

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert_eq!(stderr.matches("solaris").count(), 1, "reported once: {}", stderr);
  assert!(!project.file_exists("bin"));
  Ok(())
}

#[test]
fn test_network_failure_does_not_fail_install() -> Result<()> {
  let project = TestProject::bare("1.3.0", 6)?;
  project.write_file("relver.toml", UNREACHABLE)?;

  let output = run_relver(&project.path, &["postinstall", "--platform", "linux"])?;

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert_eq!(exit_code(&output), 0, "stderr: {}", stderr);
  assert_eq!(stderr.matches("skipping download").count(), 1, "reported once: {}", stderr);
  assert!(!project.file_exists("bin/widget-x86_64-unknown-linux-gnu"));
  Ok(())
}

#[test]
fn test_explicit_root() -> Result<()> {
  let project = TestProject::bare("1.3.0", 6)?;
  project.write_file("relver.toml", UNREACHABLE)?;
  let elsewhere = tempfile::TempDir::new()?;

  let output = run_relver(
    elsewhere.path(),
    &["postinstall", "--root", project.path.to_str().unwrap(), "--platform", "darwin"],
  )?;

  assert_eq!(exit_code(&output), 0);
  assert!(!project.file_exists("bin/widget-x86_64-apple-darwin"));
  Ok(())
}

#[test]
fn test_missing_record_fails() -> Result<()> {
  let empty = tempfile::TempDir::new()?;

  let output = run_relver(empty.path(), &["postinstall", "--platform", "linux"])?;

  assert_eq!(exit_code(&output), 1);
  Ok(())
}

#[test]
fn test_postinstall_is_hidden_from_help() -> Result<()> {
  let project = TestProject::bare("1.0.0", 0)?;

  let output = run_relver_ok(&project.path, &["--help"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("copy-version"));
  assert!(!stdout.contains("postinstall"));
  Ok(())
}
