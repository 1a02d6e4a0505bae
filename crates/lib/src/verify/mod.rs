//! Check files against their recorded digests.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::algorithm::Algorithm;
use crate::hashlist::{HashList, HashListError};
use crate::lock::{DirLock, LockError, LockMode};
use crate::options::Options;
use crate::pool::{HashOutcome, HashTask, PoolError, WorkerPool};
use crate::walk::{WalkError, target_directories};

#[derive(Debug, Error)]
pub enum VerifyError {
  #[error("no hash list found: {}", .0.display())]
  MissingHashList(PathBuf),

  #[error(transparent)]
  Walk(#[from] WalkError),

  #[error(transparent)]
  HashList(#[from] HashListError),

  #[error(transparent)]
  Lock(#[from] LockError),

  #[error(transparent)]
  Pool(#[from] PoolError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EntryStatus {
  Ok,
  Mismatch { actual: String },
  Missing,
  Unreadable { error: String },
}

impl EntryStatus {
  pub fn is_ok(&self) -> bool {
    matches!(self, EntryStatus::Ok)
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct EntryResult {
  pub path: String,
  pub expected: String,
  #[serde(flatten)]
  pub status: EntryStatus,
}

impl EntryResult {
  fn from_outcome(outcome: HashOutcome) -> Self {
    let expected = outcome.expected.unwrap_or_default();
    let status = match outcome.result {
      Ok(actual) if actual == expected => EntryStatus::Ok,
      Ok(actual) => EntryStatus::Mismatch { actual },
      Err(e) if e.is_not_found() => EntryStatus::Missing,
      Err(e) => EntryStatus::Unreadable {
        error: e.source.to_string(),
      },
    };

    EntryResult {
      path: outcome.path,
      expected,
      status,
    }
  }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyStats {
  pub total: usize,
  pub ok: usize,
  pub mismatched: usize,
  pub missing: usize,
  pub unreadable: usize,
}

impl VerifyStats {
  pub fn failed(&self) -> usize {
    self.mismatched + self.missing + self.unreadable
  }

  fn record(&mut self, status: &EntryStatus) {
    self.total += 1;
    match status {
      EntryStatus::Ok => self.ok += 1,
      EntryStatus::Mismatch { .. } => self.mismatched += 1,
      EntryStatus::Missing => self.missing += 1,
      EntryStatus::Unreadable { .. } => self.unreadable += 1,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct VerifyReport {
  pub directory: PathBuf,
  pub hashlist: PathBuf,
  /// Set when the directory has no hash list for the algorithm.
  pub missing_hashlist: bool,
  pub stats: VerifyStats,
  pub results: Vec<EntryResult>,
}

impl VerifyReport {
  pub fn is_success(&self) -> bool {
    !self.missing_hashlist && self.stats.failed() == 0
  }

  pub fn failures(&self) -> impl Iterator<Item = &EntryResult> {
    self.results.iter().filter(|r| !r.status.is_ok())
  }
}

/// Whether every report in a verify run succeeded.
pub fn all_succeeded(reports: &[VerifyReport]) -> bool {
  reports.iter().all(VerifyReport::is_success)
}

/// Re-hash every file recorded in the hash list of `dir`.
///
/// `on_progress(done, total)` is forwarded to the worker pool.
pub fn verify_directory<F>(
  dir: &Path,
  algorithm: Algorithm,
  pool: &WorkerPool,
  on_progress: F,
) -> Result<VerifyReport, VerifyError>
where
  F: Fn(usize, usize) + Sync,
{
  let hashlist_path = HashList::path_for(dir, algorithm);
  if !hashlist_path.is_file() {
    return Err(VerifyError::MissingHashList(hashlist_path));
  }

  let _lock = match DirLock::acquire(dir, LockMode::Shared, "verify") {
    Ok(lock) => Some(lock),
    Err(e) if e.is_unavailable() => {
      warn!(dir = ?dir, error = %e, "verifying without a lock");
      None
    }
    Err(e) => return Err(e.into()),
  };

  let hashlist = HashList::load(dir, algorithm)?;
  let tasks = hashlist
    .entries()
    .iter()
    .map(|entry| HashTask {
      path: entry.path.clone(),
      expected: Some(entry.digest.clone()),
    })
    .collect();

  let mut stats = VerifyStats::default();
  let mut results = Vec::with_capacity(hashlist.len());
  for outcome in pool.hash_all(dir, algorithm, tasks, on_progress) {
    let result = EntryResult::from_outcome(outcome);
    if !result.status.is_ok() {
      debug!(path = %result.path, status = ?result.status, "verification failed");
    }
    stats.record(&result.status);
    results.push(result);
  }

  info!(
    dir = ?dir,
    total = stats.total,
    failed = stats.failed(),
    "verification complete"
  );

  Ok(VerifyReport {
    directory: dir.to_path_buf(),
    hashlist: hashlist_path,
    missing_hashlist: false,
    stats,
    results,
  })
}

/// Verify `root`, or each of its immediate subdirectories in subdirectory mode.
///
/// In subdirectory mode a subdirectory without a hash list becomes a failed report so
/// the remaining ones are still checked; without subdirectory mode it is an error.
/// `on_progress(dir, done, total)` reports per-directory progress.
pub fn verify_directories<F>(root: &Path, options: &Options, on_progress: F) -> Result<Vec<VerifyReport>, VerifyError>
where
  F: Fn(&Path, usize, usize) + Sync,
{
  let pool = WorkerPool::new(options.threads)?;
  let mut reports = Vec::new();

  for dir in target_directories(root, options.subdirs)? {
    let progress = |done, total| on_progress(&dir, done, total);
    match verify_directory(&dir, options.algorithm, &pool, progress) {
      Ok(report) => reports.push(report),
      Err(VerifyError::MissingHashList(hashlist)) if options.subdirs => {
        debug!(dir = ?dir, "no hash list to verify");
        reports.push(VerifyReport {
          directory: dir.clone(),
          hashlist,
          missing_hashlist: true,
          stats: VerifyStats::default(),
          results: Vec::new(),
        });
      }
      Err(e) => return Err(e),
    }
  }

  Ok(reports)
}
