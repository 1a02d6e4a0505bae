//! Directory traversal.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::algorithm::Algorithm;
use crate::consts::LOCK_FILENAME;
use crate::hashlist::normalize_path;

#[derive(Debug, Error)]
pub enum WalkError {
  #[error("not a directory: {}", .0.display())]
  NotADirectory(PathBuf),

  #[error("failed to list {}: {source}", .path.display())]
  ReadDir {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// Whether `name` is one of the files arkhash keeps at the root of a target directory.
pub fn is_reserved_name(name: &str) -> bool {
  name == LOCK_FILENAME || Algorithm::is_hashlist_name(name)
}

/// Whether a normalised hash list path points at a reserved root file.
pub fn is_reserved_path(path: &str) -> bool {
  let relative = path.strip_prefix("./").unwrap_or(path);
  !relative.contains('/') && is_reserved_name(relative)
}

/// List every regular file below `root` as a normalised relative path.
///
/// Entries are visited in file name order so the result is stable across runs.
/// Symlinks are not followed. Reserved root files, unreadable entries and names that
/// are not valid UTF-8 are skipped.
pub fn walk_files(root: &Path) -> Result<Vec<String>, WalkError> {
  if !root.is_dir() {
    return Err(WalkError::NotADirectory(root.to_path_buf()));
  }

  let walker = WalkDir::new(root)
    .sort_by_file_name()
    .follow_links(false)
    .into_iter()
    .filter_entry(|e| {
      e.depth() != 1
        || e
          .file_name()
          .to_str()
          .map(|name| !is_reserved_name(name))
          .unwrap_or(true)
    });

  let mut files = Vec::new();
  for entry in walker {
    let entry = match entry {
      Ok(entry) => entry,
      Err(e) => {
        warn!(error = %e, "skipping unreadable entry");
        continue;
      }
    };

    if !entry.file_type().is_file() {
      continue;
    }

    let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
    match relative.to_str() {
      Some(relative) => files.push(normalize_path(relative)),
      None => warn!(path = ?entry.path(), "skipping file with non UTF-8 name"),
    }
  }

  debug!(root = ?root, count = files.len(), "walked directory");
  Ok(files)
}

/// The directories that own a hash list: `root` itself, or each of its immediate
/// subdirectories (sorted by name) in subdirectory mode.
pub fn target_directories(root: &Path, subdirs: bool) -> Result<Vec<PathBuf>, WalkError> {
  if !root.is_dir() {
    return Err(WalkError::NotADirectory(root.to_path_buf()));
  }

  if !subdirs {
    return Ok(vec![root.to_path_buf()]);
  }

  let to_error = |source: io::Error| WalkError::ReadDir {
    path: root.to_path_buf(),
    source,
  };

  let mut dirs = Vec::new();
  for entry in fs::read_dir(root).map_err(to_error)? {
    let entry = entry.map_err(to_error)?;
    // Symlinked directories are skipped, like the file walk does.
    if entry.file_type().map_err(to_error)?.is_dir() {
      dirs.push(entry.path());
    }
  }
  dirs.sort();

  Ok(dirs)
}
