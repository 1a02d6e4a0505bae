//! Hash list files.
//!
//! A hash list lives at the root of the directory it describes and is named after its
//! algorithm (see [`Algorithm::hashlist_name`]). Lists are append-only: existing lines
//! are never rewritten.

mod entry;

pub use entry::{Entry, normalize_path, to_fs_path};

use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::algorithm::Algorithm;

#[derive(Debug, Error)]
pub enum HashListError {
  #[error("failed to read hash list {}: {source}", .path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to write hash list {}: {source}", .path.display())]
  Write {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

#[derive(Debug, Default, Clone)]
pub struct HashList {
  entries: Vec<Entry>,
  paths: HashSet<String>,
}

impl HashList {
  /// Location of the hash list for `algorithm` inside `dir`.
  pub fn path_for(dir: &Path, algorithm: Algorithm) -> PathBuf {
    dir.join(algorithm.hashlist_name())
  }

  pub fn exists(dir: &Path, algorithm: Algorithm) -> bool {
    Self::path_for(dir, algorithm).is_file()
  }

  /// Load the hash list of `dir`. A missing file yields an empty list.
  pub fn load(dir: &Path, algorithm: Algorithm) -> Result<Self, HashListError> {
    let path = Self::path_for(dir, algorithm);

    let file = match fs::File::open(&path) {
      Ok(file) => file,
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        debug!(path = ?path, "no hash list yet");
        return Ok(Self::default());
      }
      Err(source) => return Err(HashListError::Read { path, source }),
    };

    let list = Self::parse(BufReader::new(file), algorithm).map_err(|source| HashListError::Read {
      path: path.clone(),
      source,
    })?;
    debug!(path = ?path, entries = list.len(), "loaded hash list");
    Ok(list)
  }

  /// Parse hash list content. Blank lines are ignored; malformed lines are logged and skipped.
  pub fn parse<R: BufRead>(reader: R, algorithm: Algorithm) -> io::Result<Self> {
    let mut list = Self::default();

    for (index, line) in reader.lines().enumerate() {
      let line = line?;
      if line.trim().is_empty() {
        continue;
      }
      match Entry::parse(&line, algorithm) {
        Some(entry) => list.push(entry),
        None => warn!(line = index + 1, algorithm = %algorithm, "skipping malformed hash list line"),
      }
    }

    Ok(list)
  }

  pub fn contains(&self, path: &str) -> bool {
    self.paths.contains(&normalize_path(path))
  }

  pub fn push(&mut self, entry: Entry) {
    self.paths.insert(entry.path.clone());
    self.entries.push(entry);
  }

  pub fn entries(&self) -> &[Entry] {
    &self.entries
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Append `entries` to the hash list of `dir`, creating the file if needed.
  ///
  /// A final line without a newline is terminated first so the new lines never merge
  /// into it.
  pub fn append(dir: &Path, algorithm: Algorithm, entries: &[Entry]) -> Result<(), HashListError> {
    if entries.is_empty() {
      return Ok(());
    }

    let path = Self::path_for(dir, algorithm);
    let to_error = |source: io::Error| HashListError::Write {
      path: path.clone(),
      source,
    };

    let mut file = OpenOptions::new()
      .read(true)
      .append(true)
      .create(true)
      .open(&path)
      .map_err(to_error)?;

    let mut content = String::new();
    if needs_newline(&mut file).map_err(to_error)? {
      content.push('\n');
    }
    for entry in entries {
      content.push_str(&entry.to_line());
    }

    file.write_all(content.as_bytes()).map_err(to_error)?;
    file.flush().map_err(to_error)?;

    debug!(path = ?path, added = entries.len(), "appended to hash list");
    Ok(())
  }
}

fn needs_newline(file: &mut fs::File) -> io::Result<bool> {
  if file.metadata()?.len() == 0 {
    return Ok(false);
  }
  file.seek(SeekFrom::End(-1))?;
  let mut last = [0u8; 1];
  file.read_exact(&mut last)?;
  Ok(last[0] != b'\n')
}
