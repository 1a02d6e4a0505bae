//! Single hash list lines and the path form they use.
//!
//! A line reads `<hex digest><two spaces><path>`, the format `sha1sum` and friends
//! print. Paths are always relative to the hash list's directory, separated by `/`
//! and prefixed with `./`, independent of the platform that wrote them.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::algorithm::Algorithm;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
  pub digest: String,
  pub path: String,
}

impl Entry {
  pub fn new(digest: impl Into<String>, path: &str) -> Self {
    Entry {
      digest: digest.into().to_ascii_lowercase(),
      path: normalize_path(path),
    }
  }

  /// Parse one line of a hash list.
  ///
  /// Accepts the text (`"  "`) and binary (`" *"`) separators and upper case digests.
  /// Returns `None` for lines that do not hold a digest of `algorithm`'s length.
  pub fn parse(line: &str, algorithm: Algorithm) -> Option<Self> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (digest, rest) = line.split_at_checked(algorithm.hex_len())?;
    if !digest.bytes().all(|b| b.is_ascii_hexdigit()) {
      return None;
    }

    let path = rest.strip_prefix("  ").or_else(|| rest.strip_prefix(" *"))?;
    if path.trim().is_empty() {
      return None;
    }

    Some(Entry::new(digest, path))
  }

  /// The line as written to a hash list, including the trailing newline.
  pub fn to_line(&self) -> String {
    format!("{}\n", self)
  }
}

impl fmt::Display for Entry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}  {}", self.digest, self.path)
  }
}

/// Bring a relative path into hash list form: `/` separators, a single leading `./`,
/// no empty or `.` components.
pub fn normalize_path(raw: &str) -> String {
  let unified = raw.replace('\\', "/");
  let parts: Vec<&str> = unified
    .split('/')
    .filter(|part| !part.is_empty() && *part != ".")
    .collect();
  format!("./{}", parts.join("/"))
}

/// Resolve a hash list path against the directory that owns the list.
pub fn to_fs_path(dir: &Path, path: &str) -> PathBuf {
  normalize_path(path)
    .split('/')
    .skip(1)
    .fold(dir.to_path_buf(), |acc, part| acc.join(part))
}
