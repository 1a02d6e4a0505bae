use std::path::Path;

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn filter_prints_unrecorded_paths() {
  let env = TestEnv::with_files(&[("a.txt", "a")]);
  env.update(Path::new(""), &[]);

  env
    .arkhash_cmd()
    .arg(env.temp.path())
    .write_stdin("./a.txt\n./b.txt\nc/d.txt\n")
    .assert()
    .success()
    .stdout("./b.txt\n./c/d.txt\n");
}

#[test]
fn filter_skips_hash_lists_and_blank_lines() {
  let env = TestEnv::empty();

  env
    .arkhash_cmd()
    .arg(env.temp.path())
    .write_stdin("\n./SHA1SUMS\n./.arkhash.lock\n./x.txt\n")
    .assert()
    .success()
    .stdout("./x.txt\n");
}

#[test]
fn filter_uses_selected_algorithm() {
  let env = TestEnv::with_files(&[("a.txt", "a")]);
  env.update(Path::new(""), &[]);

  env
    .arkhash_cmd()
    .args(["-a", "sha512"])
    .arg(env.temp.path())
    .write_stdin("./a.txt\n")
    .assert()
    .success()
    .stdout(predicate::str::contains("./a.txt"));
}
