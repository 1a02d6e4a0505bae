use std::path::Path;

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn verify_clean_archive() {
  let env = TestEnv::with_files(&[("a.txt", "a"), ("docs/b.txt", "b")]);
  env.update(Path::new(""), &[]);

  env
    .arkhash_cmd()
    .arg("-v")
    .arg(env.temp.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("Verified"))
    .stdout(predicate::str::contains("OK: 2"));
}

#[test]
fn verify_reports_modified_file() {
  let env = TestEnv::with_files(&[("a.txt", "a"), ("b.txt", "b")]);
  env.update(Path::new(""), &[]);
  env.write_file("b.txt", "bit rot");

  env
    .arkhash_cmd()
    .arg("--verify")
    .arg(env.temp.path())
    .assert()
    .code(1)
    .stdout(predicate::str::contains("FAILED ./b.txt"))
    .stdout(predicate::str::contains("./a.txt").not());
}

#[test]
fn verify_reports_missing_file() {
  let env = TestEnv::with_files(&[("a.txt", "a"), ("b.txt", "b")]);
  env.update(Path::new(""), &[]);
  std::fs::remove_file(env.path("a.txt")).unwrap();

  env
    .arkhash_cmd()
    .arg("--verify")
    .arg(env.temp.path())
    .assert()
    .code(1)
    .stdout(predicate::str::contains("MISSING ./a.txt"));
}

#[test]
fn verify_debug_lists_ok_files() {
  let env = TestEnv::with_files(&[("a.txt", "a")]);
  env.update(Path::new(""), &[]);

  env
    .arkhash_cmd()
    .args(["-v", "--loglevel=debug"])
    .arg(env.temp.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("OK ./a.txt"));
}

#[test]
fn verify_quiet_uses_exit_code_only() {
  let env = TestEnv::with_files(&[("a.txt", "a")]);
  env.update(Path::new(""), &[]);
  env.write_file("a.txt", "changed");

  env
    .arkhash_cmd()
    .args(["-v", "--quiet"])
    .arg(env.temp.path())
    .assert()
    .code(1)
    .stdout(predicate::str::is_empty());
}

#[test]
fn verify_progress_goes_to_stderr() {
  let env = TestEnv::with_files(&[("a.txt", "a"), ("b.txt", "b")]);
  env.update(Path::new(""), &[]);

  env
    .arkhash_cmd()
    .args(["-v", "--log-level", "progress"])
    .arg(env.temp.path())
    .assert()
    .success()
    .stdout(predicate::str::is_empty())
    .stderr(predicate::str::contains("2/2"));
}

#[test]
fn verify_subdirectories() {
  let env = TestEnv::with_files(&[("one/a.txt", "a"), ("two/b.txt", "b")]);
  env.update(Path::new(""), &["-s"]);

  env
    .arkhash_cmd()
    .args(["-s", "-v"])
    .arg(env.temp.path())
    .assert()
    .success();

  env.write_file("two/b.txt", "changed");

  env
    .arkhash_cmd()
    .args(["-s", "-v"])
    .arg(env.temp.path())
    .assert()
    .code(1)
    .stdout(predicate::str::contains("FAILED ./b.txt"));
}

#[test]
fn verify_subdirectory_without_list_fails() {
  let env = TestEnv::with_files(&[("one/a.txt", "a")]);
  env.update(Path::new("one"), &[]);
  env.write_file("two/b.txt", "b");

  env
    .arkhash_cmd()
    .args(["-s", "-v"])
    .arg(env.temp.path())
    .assert()
    .code(1)
    .stderr(predicate::str::contains("No hash list found"));
}

#[test]
fn verify_json_output() {
  let env = TestEnv::with_files(&[("a.txt", "a"), ("b.txt", "b")]);
  env.update(Path::new(""), &[]);
  env.write_file("a.txt", "changed");

  let output = env
    .arkhash_cmd()
    .args(["-v", "-o", "json"])
    .arg(env.temp.path())
    .output()
    .unwrap();
  assert_eq!(output.status.code(), Some(1));

  let reports: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(reports[0]["stats"]["total"], 2);
  assert_eq!(reports[0]["stats"]["mismatched"], 1);
  assert_eq!(reports[0]["results"][0]["status"], "mismatch");
  assert_eq!(reports[0]["results"][1]["status"], "ok");
}

#[test]
fn verify_same_result_with_one_thread() {
  let env = TestEnv::with_files(&[("a.txt", "a"), ("b.txt", "b"), ("c/d.txt", "d")]);
  env.update(Path::new(""), &["-T", "1"]);

  env
    .arkhash_cmd()
    .args(["-v", "--threads", "1"])
    .arg(env.temp.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("OK: 3"));
}

#[test]
fn verify_reports_unreadable_entry() {
  let env = TestEnv::with_files(&[("a.txt", "a"), ("docs/b.txt", "b")]);
  env.write_file(
    "SHA1SUMS",
    "0000000000000000000000000000000000000000  ./docs\n86f7e437faa5a7fce15d1ddcb9eaeaea377667b8  ./a.txt\n",
  );

  env
    .arkhash_cmd()
    .arg("--verify")
    .arg(env.temp.path())
    .assert()
    .code(1)
    .stdout(predicate::str::contains("UNREADABLE ./docs"))
    .stdout(predicate::str::contains("Unreadable: 1"))
    .stdout(predicate::str::contains("OK ./a.txt").not());
}
