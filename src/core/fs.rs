//! Filesystem helpers shared by the record store and manifest strategies

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Replace `path` with `contents` atomically
///
/// Writes to a sibling temporary file, flushes it, then renames it over the
/// target, so a crash never leaves a truncated file behind. Existing
/// permissions of the target are carried over to the replacement. A target
/// marked read-only is refused, since the rename would otherwise replace it.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
  let existing = fs::metadata(path).ok();
  if let Some(metadata) = &existing
    && metadata.permissions().readonly()
  {
    return Err(io::Error::new(
      io::ErrorKind::PermissionDenied,
      format!("{} is read-only", path.display()),
    ));
  }

  let dir = match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent,
    _ => Path::new("."),
  };

  let mut temp = NamedTempFile::new_in(dir)?;
  temp.write_all(contents)?;
  temp.as_file().sync_all()?;

  if let Some(metadata) = existing {
    fs::set_permissions(temp.path(), metadata.permissions())?;
  }

  temp.persist(path).map_err(|e| e.error)?;
  Ok(())
}
