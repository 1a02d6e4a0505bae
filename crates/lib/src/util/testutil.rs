//! Test utilities for arkhash-lib.
//!
//! Helpers to lay out small directory trees inside a temporary directory.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Write `content` to `relative` below `root`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).unwrap();
  }
  fs::write(&path, content).unwrap();
}

/// Create a temporary directory populated with `(relative path, content)` pairs.
pub fn tree(files: &[(&str, &str)]) -> TempDir {
  let temp = TempDir::new().unwrap();
  for (relative, content) in files {
    write_file(temp.path(), relative, content);
  }
  temp
}
