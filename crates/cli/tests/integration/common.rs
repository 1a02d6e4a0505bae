//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Isolated test environment.
///
/// Each test gets its own temporary directory acting as the archive root.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  /// Create an empty test environment.
  pub fn empty() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  /// Create an environment populated with `(relative path, content)` pairs.
  pub fn with_files(files: &[(&str, &str)]) -> Self {
    let env = Self::empty();
    for (relative, content) in files {
      env.write_file(relative, content);
    }
    env
  }

  /// Archive root (canonicalized, matching what the binary reports).
  pub fn root(&self) -> PathBuf {
    dunce::canonicalize(self.temp.path()).unwrap_or_else(|_| self.temp.path().to_path_buf())
  }

  /// Write a file relative to the archive root.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  pub fn read_file(&self, relative_path: &str) -> String {
    std::fs::read_to_string(self.temp.path().join(relative_path)).unwrap()
  }

  pub fn path(&self, relative_path: &str) -> PathBuf {
    self.temp.path().join(relative_path)
  }

  /// Get a pre-configured Command for the arkhash binary.
  ///
  /// Clears the `ARKHASH_*` and `RUST_LOG` environment variables so the host
  /// environment cannot change defaults.
  pub fn arkhash_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("arkhash");
    cmd.env_remove("ARKHASH_ALGORITHM");
    cmd.env_remove("ARKHASH_LOG_LEVEL");
    cmd.env_remove("ARKHASH_THREADS");
    cmd.env_remove("RUST_LOG");
    cmd
  }

  /// Run update on `dir` (relative to the root) and assert success.
  pub fn update(&self, dir: &Path, extra: &[&str]) {
    self
      .arkhash_cmd()
      .arg("--update")
      .args(extra)
      .arg(self.temp.path().join(dir))
      .assert()
      .success();
  }
}
