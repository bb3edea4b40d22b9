//! Integration tests for `relver show`

use crate::helpers::{TestProject, run_relver_ok};
use anyhow::Result;
use std::process::Command;

#[test]
fn test_show_project_record() -> Result<()> {
  let project = TestProject::new("1.2.3", 5)?;

  let output = run_relver_ok(&project.path, &["show", "--json"])?;
  let shown: serde_json::Value = serde_json::from_slice(&output.stdout)?;

  assert_eq!(shown["version"], "1.2.3");
  assert_eq!(shown["build"], 5);
  assert_eq!(shown["source"]["kind"], "project-root");
  Ok(())
}

#[test]
fn test_show_env_override() -> Result<()> {
  let project = TestProject::bare("1.2.3", 5)?;

  let output = Command::new(env!("CARGO_BIN_EXE_relver"))
    .current_dir(&project.path)
    .args(["show"])
    .env("RELVER_VERSION", "7.7.7")
    .output()?;

  assert!(output.status.success());
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.starts_with("7.7.7"), "got: {}", stdout);
  assert!(stdout.contains("RELVER_VERSION"));
  Ok(())
}

#[test]
fn test_show_outside_project_falls_back_to_builtin() -> Result<()> {
  let empty = tempfile::TempDir::new()?;

  let output = run_relver_ok(empty.path(), &["show", "--json"])?;
  let shown: serde_json::Value = serde_json::from_slice(&output.stdout)?;

  assert_eq!(shown["version"], env!("CARGO_PKG_VERSION"));
  assert_eq!(shown["source"]["kind"], "compiled");
  Ok(())
}

#[test]
fn test_show_reports_broken_config() -> Result<()> {
  let project = TestProject::bare("1.2.3", 5)?;
  project.write_file("relver.toml", "record = [not toml")?;

  let output = run_relver_ok(&project.path, &["show", "--json"])?;
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("relver.toml"), "should warn about the config: {}", stderr);

  let shown: serde_json::Value = serde_json::from_slice(&output.stdout)?;
  assert_eq!(shown["source"]["kind"], "compiled");
  Ok(())
}
