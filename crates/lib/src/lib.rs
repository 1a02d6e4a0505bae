//! arkhash-lib: checksum lists for archived directory trees
//!
//! This crate provides everything the `arkhash` binary does besides talking to the terminal:
//! - `Algorithm`: the supported digests and their hash list file names
//! - `HashList`: parsing, lookup and append-only writing of `<ALGO>SUMS` files
//! - `Filter`: reduce a stream of paths to the ones not yet recorded
//! - `WorkerPool`: bounded parallel hashing with ordered results
//! - `update` / `verify`: the two directory-level operations

pub mod algorithm;
pub mod consts;
pub mod filter;
pub mod hashlist;
pub mod lock;
pub mod options;
pub mod pool;
pub mod update;
pub mod util;
pub mod verify;
pub mod walk;

pub use algorithm::Algorithm;
pub use options::Options;
