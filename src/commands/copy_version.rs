//! Copy-version command implementation

use crate::core::config::RelverConfig;
use crate::core::error::RelverResult;
use crate::core::project;
use crate::relocate::{BinaryRelocator, Destination};
use std::env;
use std::path::PathBuf;

/// Run the copy-version command
///
/// Without `--source` the record of the enclosing project is copied.
pub fn run_copy_version(source: Option<PathBuf>, binary: Option<PathBuf>, out_dir: Option<PathBuf>) -> RelverResult<()> {
  let cwd = env::current_dir().ok();

  let source = match source {
    Some(path) => path,
    None => {
      let root = project::project_root()?;
      RelverConfig::load(&root)?.record_path(&root)
    }
  };

  let relocator = BinaryRelocator::new(source);
  let destination = Destination::from_args(binary, out_dir);
  let written = relocator.relocate(&destination, cwd.as_deref())?;

  println!("✅ Copied {} to {}", relocator.source().display(), written.display());
  Ok(())
}
