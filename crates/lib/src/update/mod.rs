//! Record new files in hash lists.
//!
//! Update walks a target directory, keeps the files its hash list does not mention yet,
//! hashes them on the worker pool and appends the results. Files that cannot be read
//! are reported and left out; they will be picked up again by the next update.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::algorithm::Algorithm;
use crate::filter::Filter;
use crate::hashlist::{Entry, HashList, HashListError};
use crate::lock::{DirLock, LockError, LockMode};
use crate::options::Options;
use crate::pool::{HashTask, PoolError, WorkerPool};
use crate::walk::{WalkError, target_directories, walk_files};

#[derive(Debug, Error)]
pub enum UpdateError {
  #[error(transparent)]
  Walk(#[from] WalkError),

  #[error(transparent)]
  HashList(#[from] HashListError),

  #[error(transparent)]
  Lock(#[from] LockError),

  #[error(transparent)]
  Pool(#[from] PoolError),

  #[error("failed to collect file list: {0}")]
  Io(#[from] io::Error),
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedFile {
  pub path: String,
  pub error: String,
}

#[derive(Debug, Serialize)]
pub struct UpdateReport {
  pub directory: PathBuf,
  pub hashlist: PathBuf,
  pub added: Vec<Entry>,
  pub failed: Vec<FailedFile>,
}

impl UpdateReport {
  pub fn is_success(&self) -> bool {
    self.failed.is_empty()
  }
}

/// Hash and record every file of `dir` its hash list does not contain yet.
pub fn update_directory(dir: &Path, algorithm: Algorithm, pool: &WorkerPool) -> Result<UpdateReport, UpdateError> {
  let _lock = DirLock::acquire(dir, LockMode::Exclusive, "update")?;

  let hashlist = HashList::load(dir, algorithm)?;
  let known = hashlist.len();
  let files = walk_files(dir)?;

  let new_paths = Filter::new(files.into_iter().map(Ok), hashlist).collect::<io::Result<Vec<_>>>()?;
  debug!(dir = ?dir, known, new = new_paths.len(), "collected unrecorded files");

  let (added, failed) = hash_new_files(dir, algorithm, pool, new_paths);
  HashList::append(dir, algorithm, &added)?;

  info!(dir = ?dir, added = added.len(), failed = failed.len(), "update complete");
  Ok(UpdateReport {
    directory: dir.to_path_buf(),
    hashlist: HashList::path_for(dir, algorithm),
    added,
    failed,
  })
}

/// Hash `paths` below `dir`, splitting them into entries to record and files that
/// could not be read. Both keep the order of `paths`.
fn hash_new_files(
  dir: &Path,
  algorithm: Algorithm,
  pool: &WorkerPool,
  paths: Vec<String>,
) -> (Vec<Entry>, Vec<FailedFile>) {
  let tasks = paths.into_iter().map(|path| HashTask { path, expected: None }).collect();

  let mut added = Vec::new();
  let mut failed = Vec::new();
  for outcome in pool.hash_all(dir, algorithm, tasks, |_, _| {}) {
    match outcome.result {
      Ok(digest) => added.push(Entry::new(digest, &outcome.path)),
      Err(e) => {
        debug!(path = %outcome.path, error = %e.source, "could not hash file");
        failed.push(FailedFile {
          path: outcome.path,
          error: e.source.to_string(),
        });
      }
    }
  }

  (added, failed)
}

/// Update `root`, or each of its immediate subdirectories in subdirectory mode.
pub fn update_directories(root: &Path, options: &Options) -> Result<Vec<UpdateReport>, UpdateError> {
  let pool = WorkerPool::new(options.threads)?;

  target_directories(root, options.subdirs)?
    .iter()
    .map(|dir| update_directory(dir, options.algorithm, &pool))
    .collect()
}
