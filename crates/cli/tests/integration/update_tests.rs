use std::path::Path;

use predicates::prelude::*;

use super::common::TestEnv;

// sha1 of "hello world"
const HELLO_SHA1: &str = "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed";

#[test]
fn update_writes_coreutils_format() {
  let env = TestEnv::with_files(&[("hello.txt", "hello world")]);

  env
    .arkhash_cmd()
    .arg("-u")
    .arg(env.temp.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("Added: 1"));

  assert_eq!(env.read_file("SHA1SUMS"), format!("{}  ./hello.txt\n", HELLO_SHA1));
}

#[test]
fn update_twice_adds_nothing() {
  let env = TestEnv::with_files(&[("a.txt", "a"), ("nested/b.txt", "b")]);
  env.update(Path::new(""), &[]);
  let before = env.read_file("SHA1SUMS");

  env
    .arkhash_cmd()
    .arg("-u")
    .arg(env.temp.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("Added: 0"));

  assert_eq!(env.read_file("SHA1SUMS"), before);
}

#[test]
fn update_with_algorithm_from_env() {
  let env = TestEnv::with_files(&[("a.txt", "a")]);

  env
    .arkhash_cmd()
    .arg("-u")
    .arg(env.temp.path())
    .env("ARKHASH_ALGORITHM", "sha256")
    .assert()
    .success();

  assert!(env.path("SHA256SUMS").exists());
  assert!(!env.path("SHA1SUMS").exists());
}

#[test]
fn update_subdirectories_each_get_a_list() {
  let env = TestEnv::with_files(&[("loose.txt", "x"), ("2019/a.jpg", "a"), ("2020/trip/b.jpg", "b")]);

  env
    .arkhash_cmd()
    .args(["-su", "--algorithm=md5"])
    .arg(env.temp.path())
    .assert()
    .success();

  assert!(!env.path("MD5SUMS").exists());
  assert!(env.read_file("2019/MD5SUMS").ends_with("  ./a.jpg\n"));
  assert!(env.read_file("2020/MD5SUMS").ends_with("  ./trip/b.jpg\n"));
}

#[test]
fn update_debug_lists_added_lines() {
  let env = TestEnv::with_files(&[("hello.txt", "hello world")]);

  env
    .arkhash_cmd()
    .args(["-u", "--log-level", "debug"])
    .arg(env.temp.path())
    .assert()
    .success()
    .stdout(predicate::str::contains(format!("{}  ./hello.txt", HELLO_SHA1)));
}

#[test]
fn update_quiet_prints_nothing() {
  let env = TestEnv::with_files(&[("a.txt", "a")]);

  env
    .arkhash_cmd()
    .args(["-u", "--quiet"])
    .arg(env.temp.path())
    .assert()
    .success()
    .stdout(predicate::str::is_empty());
}

#[test]
fn update_json_output() {
  let env = TestEnv::with_files(&[("hello.txt", "hello world")]);

  let output = env
    .arkhash_cmd()
    .args(["-u", "-o", "json"])
    .arg(env.temp.path())
    .output()
    .unwrap();
  assert!(output.status.success());

  let reports: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(reports[0]["added"][0]["path"], "./hello.txt");
  assert_eq!(reports[0]["added"][0]["digest"], HELLO_SHA1);
  assert_eq!(reports[0]["failed"].as_array().unwrap().len(), 0);
}
