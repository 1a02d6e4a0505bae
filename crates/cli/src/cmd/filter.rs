//! Filter mode: print the paths read from stdin that the hash list does not record.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

use arkhash_lib::Algorithm;
use arkhash_lib::filter::Filter;

pub fn cmd_filter(directory: &Path, algorithm: Algorithm) -> Result<()> {
  let stdin = io::stdin().lock();
  let filter = Filter::from_reader(stdin, directory, algorithm).context("Failed to load hash list")?;

  let mut stdout = io::stdout().lock();
  for path in filter {
    let path = path.context("Failed to read paths from stdin")?;
    writeln!(stdout, "{}", path)?;
  }
  stdout.flush()?;

  Ok(())
}
