//! Reduce a stream of paths to the ones a hash list does not record yet.
//!
//! Used directly by the `arkhash` filter mode on stdin and by update on the output of
//! the directory walk.

use std::collections::HashSet;
use std::io::{self, BufRead};
use std::path::Path;

use crate::algorithm::Algorithm;
use crate::hashlist::{HashList, HashListError, normalize_path};
use crate::walk::is_reserved_path;

pub struct Filter<I> {
  paths: I,
  hashlist: HashList,
  seen: HashSet<String>,
}

impl<R: BufRead> Filter<io::Lines<R>> {
  /// Filter newline separated paths read from `reader` against the hash list of `dir`.
  pub fn from_reader(reader: R, dir: &Path, algorithm: Algorithm) -> Result<Self, HashListError> {
    let hashlist = HashList::load(dir, algorithm)?;
    Ok(Filter::new(reader.lines(), hashlist))
  }
}

impl<I> Filter<I>
where
  I: Iterator<Item = io::Result<String>>,
{
  pub fn new(paths: I, hashlist: HashList) -> Self {
    Filter {
      paths,
      hashlist,
      seen: HashSet::new(),
    }
  }
}

impl<I> Iterator for Filter<I>
where
  I: Iterator<Item = io::Result<String>>,
{
  type Item = io::Result<String>;

  fn next(&mut self) -> Option<Self::Item> {
    loop {
      let raw = match self.paths.next()? {
        Ok(raw) => raw,
        Err(e) => return Some(Err(e)),
      };

      let raw = raw.trim_end_matches(['\r', '\n']);
      if raw.trim().is_empty() {
        continue;
      }

      let path = normalize_path(raw);
      if is_reserved_path(&path) || self.hashlist.contains(&path) {
        continue;
      }
      if self.seen.insert(path.clone()) {
        return Some(Ok(path));
      }
    }
  }
}
