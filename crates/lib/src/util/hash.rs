//! Hashing of files and byte slices.
//!
//! Files are streamed through the hasher in fixed-size chunks so memory use stays
//! flat regardless of file size.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::algorithm::Algorithm;
use crate::consts::READ_BUFFER_SIZE;

/// A file could not be hashed.
#[derive(Debug, Error)]
#[error("{}: {source}", .path.display())]
pub struct HashError {
  pub path: PathBuf,
  #[source]
  pub source: io::Error,
}

impl HashError {
  pub fn is_not_found(&self) -> bool {
    self.source.kind() == io::ErrorKind::NotFound
  }
}

/// Hash a file's contents.
///
/// Returns the lowercase hex digest.
pub fn hash_file(path: &Path, algorithm: Algorithm) -> Result<String, HashError> {
  let to_error = |source: io::Error| HashError {
    path: path.to_path_buf(),
    source,
  };

  let mut file = fs::File::open(path).map_err(to_error)?;
  let mut hasher = algorithm.hasher();
  let mut buffer = [0u8; READ_BUFFER_SIZE];

  loop {
    let bytes_read = match file.read(&mut buffer) {
      Ok(n) => n,
      Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
      Err(e) => return Err(to_error(e)),
    };
    if bytes_read == 0 {
      break;
    }
    hasher.update(&buffer[..bytes_read]);
  }

  Ok(hasher.finalize_hex())
}

/// Hash arbitrary bytes.
pub fn hash_bytes(data: &[u8], algorithm: Algorithm) -> String {
  let mut hasher = algorithm.hasher();
  hasher.update(data);
  hasher.finalize_hex()
}
