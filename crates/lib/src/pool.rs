//! Bounded parallel hashing.

use std::path::Path;
use std::sync::Mutex;

use rayon::ThreadPoolBuildError;
use rayon::prelude::*;
use thiserror::Error;
use tracing::debug;

use crate::algorithm::Algorithm;
use crate::consts::APP_NAME;
use crate::hashlist::to_fs_path;
use crate::util::hash::{HashError, hash_file};

#[derive(Debug, Error)]
#[error("failed to start worker pool: {0}")]
pub struct PoolError(#[from] ThreadPoolBuildError);

/// One file to hash, relative to the directory handed to [`WorkerPool::hash_all`].
#[derive(Debug, Clone)]
pub struct HashTask {
  pub path: String,
  /// Digest the file is expected to have, if it is being verified.
  pub expected: Option<String>,
}

#[derive(Debug)]
pub struct HashOutcome {
  pub path: String,
  pub expected: Option<String>,
  pub result: Result<String, HashError>,
}

pub struct WorkerPool {
  pool: rayon::ThreadPool,
}

impl WorkerPool {
  /// Start a pool with `threads` workers. `0` picks one worker per CPU.
  pub fn new(threads: usize) -> Result<Self, PoolError> {
    let pool = rayon::ThreadPoolBuilder::new()
      .num_threads(threads)
      .thread_name(|i| format!("{}-worker-{}", APP_NAME, i))
      .build()?;
    debug!(threads = pool.current_num_threads(), "worker pool started");
    Ok(WorkerPool { pool })
  }

  pub fn threads(&self) -> usize {
    self.pool.current_num_threads()
  }

  /// Hash every task's file below `dir`.
  ///
  /// Outcomes come back in task order. `on_progress(done, total)` runs on the worker
  /// that finished a task; calls are serialised and `done` strictly increases.
  pub fn hash_all<F>(&self, dir: &Path, algorithm: Algorithm, tasks: Vec<HashTask>, on_progress: F) -> Vec<HashOutcome>
  where
    F: Fn(usize, usize) + Sync,
  {
    let total = tasks.len();
    let done = Mutex::new(0usize);

    self.pool.install(|| {
      tasks
        .into_par_iter()
        .map(|task| {
          let result = hash_file(&to_fs_path(dir, &task.path), algorithm);
          {
            let mut finished = done.lock().unwrap_or_else(|e| e.into_inner());
            *finished += 1;
            on_progress(*finished, total);
          }
          HashOutcome {
            path: task.path,
            expected: task.expected,
            result,
          }
        })
        .collect()
    })
  }
}
