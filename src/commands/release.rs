//! Release command implementation

use crate::core::config::RelverConfig;
use crate::core::error::RelverResult;
use crate::core::project;
use crate::core::vcs::GitRevision;
use crate::manifest::ManifestSynchronizer;
use crate::release::ReleasePipeline;
use crate::version::{BumpKind, VersionStore};

/// Run the release command
pub fn run_release(kind: String, dry_run: bool) -> RelverResult<()> {
  let kind: BumpKind = kind.parse()?;
  let root = project::project_root()?;
  let config = RelverConfig::load(&root)?;

  let store = VersionStore::new(config.record_path(&root));
  let synchronizer = ManifestSynchronizer::from_config(&root, &config.manifests);
  let pipeline = ReleasePipeline::new(store, GitRevision::new(&root), synchronizer);

  if dry_run {
    let preview = pipeline.preview(kind.as_str())?;
    println!("🔍 Dry run: {} release", preview.bump.kind);
    println!("   {} → {}", preview.bump.previous, preview.bump.next);
    println!("   build number in {} would be incremented", display_relative(&preview.record, &root));
    for manifest in &preview.manifests {
      let current = manifest.version.as_deref().unwrap_or("missing");
      println!("   would update {} (currently {})", display_relative(&manifest.path, &root), current);
    }
    println!();
    println!("No files were changed.");
    return Ok(());
  }

  println!("📦 Releasing ({})...", kind);
  let report = pipeline.release(kind.as_str())?;

  for warning in &report.warnings {
    println!("⚠️  {}", warning);
  }

  println!(
    "✅ {} → {} (build {})",
    report.previous_version, report.version, report.build
  );
  if let Some(commit) = &report.last_commit {
    println!("   last commit: {}", commit);
  }
  for manifest in &report.updated_manifests {
    println!("   updated {}", display_relative(manifest, &root));
  }
  for manifest in &report.unchanged_manifests {
    println!("   already current {}", display_relative(manifest, &root));
  }

  Ok(())
}

fn display_relative(path: &std::path::Path, root: &std::path::Path) -> String {
  path.strip_prefix(root).unwrap_or(path).display().to_string()
}
