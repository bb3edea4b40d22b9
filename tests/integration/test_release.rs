//! Integration tests for `relver release`

use crate::helpers::{RECORD, TestProject, exit_code, run_relver, run_relver_ok};
use anyhow::Result;

#[test]
fn test_release_minor_bumps_stamps_and_syncs() -> Result<()> {
  let project = TestProject::new("1.2.3", 5)?;
  let head = project.head()?;

  let output = run_relver_ok(&project.path, &["release", "minor"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("1.3.0"), "should report the new version: {}", stdout);

  let record = project.record()?;
  assert_eq!(record["version"], "1.3.0");
  assert_eq!(record["build"], 6);
  assert_eq!(record["lastCommit"], head.as_str());

  let package: serde_json::Value = serde_json::from_str(&project.read_file("package.json")?)?;
  assert_eq!(package["version"], "1.3.0");
  assert_eq!(package["scripts"]["postinstall"], "relver postinstall");

  let cargo = project.read_file("Cargo.toml")?;
  assert!(cargo.contains("version = \"1.3.0\"   # kept in sync by relver"));
  assert!(cargo.contains("rust-version = \"1.80.0\""));
  assert!(cargo.contains("serde = { version = \"1.0\" }"));

  Ok(())
}

#[test]
fn test_release_defaults_to_patch() -> Result<()> {
  let project = TestProject::new("0.9.9-beta.2", 0)?;

  run_relver_ok(&project.path, &["release"])?;

  let record = project.record()?;
  assert_eq!(record["version"], "0.9.10");
  assert_eq!(record["build"], 1);

  Ok(())
}

#[test]
fn test_release_from_subdirectory_finds_root() -> Result<()> {
  let project = TestProject::new("2.0.0", 1)?;
  project.write_file("src/nested/.keep", "")?;

  run_relver_ok(&project.path.join("src/nested"), &["release", "major"])?;

  assert_eq!(project.record()?["version"], "3.0.0");
  Ok(())
}

#[test]
fn test_release_without_git_warns_and_succeeds() -> Result<()> {
  let project = TestProject::bare("1.0.0", 3)?;

  let output = run_relver_ok(&project.path, &["release", "patch"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("⚠️"), "should warn about missing VCS: {}", stdout);

  let record = project.record()?;
  assert_eq!(record["version"], "1.0.1");
  assert_eq!(record["build"], 4);
  assert!(record.get("lastCommit").is_none());

  Ok(())
}

#[test]
fn test_release_unknown_kind_fails_without_writing() -> Result<()> {
  let project = TestProject::new("1.2.3", 5)?;
  let before = project.read_file(RECORD)?;

  let output = run_relver(&project.path, &["release", "huge"])?;
  assert_eq!(exit_code(&output), 1);
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("huge"), "should name the bad kind: {}", stderr);
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(!stdout.contains("Releasing"), "nothing should be announced: {}", stdout);

  assert_eq!(project.read_file(RECORD)?, before);
  Ok(())
}

#[test]
fn test_release_invalid_stored_version_fails() -> Result<()> {
  let project = TestProject::new("v1.2.3", 5)?;
  let before = project.read_file(RECORD)?;

  let output = run_relver(&project.path, &["release", "patch"])?;
  assert_eq!(exit_code(&output), 1);
  assert_eq!(project.read_file(RECORD)?, before);

  Ok(())
}

#[test]
fn test_release_missing_manifest_fails() -> Result<()> {
  let project = TestProject::new("1.2.3", 5)?;
  std::fs::remove_file(project.path.join("Cargo.toml"))?;

  let output = run_relver(&project.path, &["release", "patch"])?;
  assert_eq!(exit_code(&output), 1);
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Cargo.toml"), "should name the missing manifest: {}", stderr);

  // Earlier steps are not rolled back
  assert_eq!(project.record()?["version"], "1.2.4");
  Ok(())
}

#[test]
fn test_release_dry_run_writes_nothing() -> Result<()> {
  let project = TestProject::new("1.2.3", 5)?;
  let record_before = project.read_file(RECORD)?;
  let cargo_before = project.read_file("Cargo.toml")?;

  let output = run_relver_ok(&project.path, &["release", "major", "--dry-run"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("1.2.3 → 2.0.0"), "should preview the bump: {}", stdout);
  assert!(stdout.contains("package.json"));

  assert_eq!(project.read_file(RECORD)?, record_before);
  assert_eq!(project.read_file("Cargo.toml")?, cargo_before);
  Ok(())
}

#[test]
fn test_release_with_configured_manifests() -> Result<()> {
  let project = TestProject::new("0.4.0", 2)?;
  project.write_file(
    "crates/cli/Cargo.toml",
    "[package]\nname = \"cli\"\nversion = \"0.0.0\" # stale\n",
  )?;
  project.write_file(
    "relver.toml",
    r#"
[[manifests]]
path = "crates/cli/Cargo.toml"
strategy = "toml-document"
"#,
  )?;

  run_relver_ok(&project.path, &["release", "minor"])?;

  let cli = project.read_file("crates/cli/Cargo.toml")?;
  assert!(cli.contains("version = \"0.5.0\" # stale"), "got: {}", cli);
  // Not configured, so untouched
  assert!(project.read_file("Cargo.toml")?.contains("version = \"0.4.0\""));
  Ok(())
}

#[test]
fn test_unknown_flag_exits_one() -> Result<()> {
  let project = TestProject::bare("1.0.0", 0)?;

  let output = run_relver(&project.path, &["release", "--bogus"])?;
  assert_eq!(exit_code(&output), 1);
  Ok(())
}
