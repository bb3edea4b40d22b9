//! Integration tests for `relver copy-version`

use crate::helpers::{RECORD, TestProject, exit_code, run_relver, run_relver_ok};
use anyhow::Result;

#[test]
fn test_copy_next_to_existing_binary() -> Result<()> {
  let project = TestProject::bare("1.3.0", 6)?;
  project.write_file("opt/app/bin/tool", "binary")?;
  let binary = project.path.join("opt/app/bin/tool");

  run_relver_ok(
    &project.path,
    &["copy-version", "--binary", binary.to_str().unwrap()],
  )?;

  assert_eq!(project.read_file("opt/app/bin/project-version.json")?, project.read_file(RECORD)?);
  Ok(())
}

#[test]
fn test_copy_without_flags_uses_working_directory() -> Result<()> {
  let project = TestProject::bare("1.3.0", 6)?;
  project.write_file("dist/.keep", "")?;
  let source = project.path.join(RECORD);

  run_relver_ok(
    &project.path.join("dist"),
    &["copy-version", "--source", source.to_str().unwrap()],
  )?;

  assert!(project.file_exists("dist/project-version.json"));
  Ok(())
}

#[test]
fn test_copy_defaults_to_project_record() -> Result<()> {
  let project = TestProject::bare("4.5.6", 1)?;

  run_relver_ok(&project.path, &["copy-version", "--out-dir", "target/release"])?;

  let copied = project.read_file("target/release/project-version.json")?;
  assert!(copied.contains("4.5.6"));
  Ok(())
}

#[test]
fn test_copy_missing_source_exits_two() -> Result<()> {
  let project = TestProject::bare("1.0.0", 0)?;

  let output = run_relver(
    &project.path,
    &["copy-version", "--source", "does/not/exist.json", "--out-dir", "out"],
  )?;

  assert_eq!(exit_code(&output), 2);
  assert!(!project.file_exists("out"));
  Ok(())
}

#[test]
fn test_copy_blocked_destination_exits_four() -> Result<()> {
  let project = TestProject::bare("1.0.0", 0)?;
  project.write_file("blocked", "a file, not a directory")?;

  let output = run_relver(&project.path, &["copy-version", "--out-dir", "blocked/bin"])?;

  assert_eq!(exit_code(&output), 4);
  Ok(())
}

#[test]
fn test_copy_unknown_flag_exits_one() -> Result<()> {
  let project = TestProject::bare("1.0.0", 0)?;

  let output = run_relver(&project.path, &["copy-version", "--target", "x"])?;

  assert_eq!(exit_code(&output), 1);
  Ok(())
}

#[test]
fn test_copy_help_exits_zero() -> Result<()> {
  let project = TestProject::bare("1.0.0", 0)?;

  let output = run_relver(&project.path, &["copy-version", "-h"])?;

  assert_eq!(exit_code(&output), 0);
  assert!(String::from_utf8_lossy(&output.stdout).contains("--out-dir"));
  Ok(())
}
