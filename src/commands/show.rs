//! Show command implementation

use crate::core::config::{RECORD_FILENAME, RelverConfig};
use crate::core::error::RelverResult;
use crate::core::project;
use crate::version::resolve::{self, ResolveInputs, VersionSource};

/// Run the show command
pub fn run_show(json: bool) -> RelverResult<()> {
  let project_record = project::current_dir()
    .ok()
    .and_then(|cwd| project::find_project_root_from(&cwd))
    .and_then(|root| match RelverConfig::load(&root) {
      Ok(config) => Some(config.record_path(&root)),
      Err(e) => {
        log::warn!("ignoring project config: {}", e);
        None
      }
    });

  let resolved = resolve::resolve(&ResolveInputs::from_process(project_record), RECORD_FILENAME);

  if json {
    let mut value = serde_json::to_value(&resolved.record)?;
    if let Some(object) = value.as_object_mut() {
      object.insert("source".to_string(), serde_json::to_value(&resolved.source)?);
    }
    println!("{}", serde_json::to_string_pretty(&value)?);
    return Ok(());
  }

  println!("{}", resolved.record.version);
  println!("   build: {}", resolved.record.build);
  if let Some(commit) = &resolved.record.last_commit {
    println!("   last commit: {}", commit);
  }
  let source = match &resolved.source {
    VersionSource::Environment => format!("${}", resolve::VERSION_ENV),
    VersionSource::BesideExecutable(path) | VersionSource::ProjectRoot(path) => path.display().to_string(),
    VersionSource::Compiled => "built-in".to_string(),
  };
  println!("   source: {}", source);

  Ok(())
}
