use crate::algorithm::Algorithm;

/// Settings shared by the update and verify operations.
#[derive(Debug, Clone, Default)]
pub struct Options {
  pub algorithm: Algorithm,
  /// Operate on every immediate subdirectory instead of the directory itself.
  pub subdirs: bool,
  /// Worker threads used for hashing. `0` means one per CPU.
  pub threads: usize,
}
