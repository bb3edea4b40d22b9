//! Postinstall command implementation
//!
//! Runs from package install hooks. Only a local filesystem failure or an
//! unreadable record fails the command; a missing binary never aborts the
//! surrounding installation.

use crate::core::config::RelverConfig;
use crate::core::error::{RelverResult, ResultExt};
use crate::provision::{BinaryProvisioner, HttpFetcher, Platform, ProvisionOutcome, platform};
use crate::version::VersionStore;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

/// Run the postinstall command
pub fn run_postinstall(root: Option<PathBuf>, platform_id: Option<String>) -> RelverResult<()> {
  let root = match root {
    Some(root) => root,
    None => crate::core::project::current_dir()?,
  };
  let config = RelverConfig::load(&root)?;
  let record = VersionStore::new(config.record_path(&root)).load()?;

  let tool = &config.provision.tool;
  let resolved = match &platform_id {
    Some(id) => platform::resolve(id, tool),
    None => Platform::current().map(|p| p.artifact_name(tool)),
  };
  let artifact = match resolved {
    Ok(artifact) => artifact,
    Err(e) => {
      eprintln!("⚠️  {}; no prebuilt binary installed", e);
      return Ok(());
    }
  };

  let dest_dir = root.join(&config.provision.bin_dir);

  let fetcher =
    HttpFetcher::new(Duration::from_secs(config.provision.timeout_secs)).context("Failed to create HTTP client")?;
  let provisioner =
    BinaryProvisioner::new(fetcher, &config.provision).with_progress(std::io::stderr().is_terminal());

  println!("📦 Installing {} {} ({})...", tool, record.version, artifact);
  let outcome = provisioner.provision(&record, &artifact, &dest_dir).into_result()?;

  // Skipped downloads were already logged by the provisioner
  if let ProvisionOutcome::Downloaded { path, sha256, .. } = &outcome {
    println!("✅ Installed {}", path.display());
    println!("   sha256: {}", sha256);
  }

  Ok(())
}
