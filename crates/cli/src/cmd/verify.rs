//! Implementation of verify mode.
//!
//! Re-hashes every recorded file and reports mismatches, missing and unreadable files.

use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};

use arkhash_lib::Options;
use arkhash_lib::verify::{EntryResult, EntryStatus, VerifyReport, all_succeeded, verify_directories};

use crate::logging::LogLevel;
use crate::output::{
  OutputFormat, finish_progress, format_duration, print_error, print_file_status, print_json, print_progress,
  print_stat, print_success,
};

/// Execute verify mode.
///
/// Exits with a failure code unless every recorded file of every target directory
/// matched its digest.
pub fn cmd_verify(root: &Path, options: &Options, level: LogLevel, output: OutputFormat) -> Result<ExitCode> {
  let start = Instant::now();
  let show_progress = level.shows_progress() && !output.is_json();

  let reports = verify_directories(root, options, |dir, done, total| {
    if show_progress {
      let label = dir.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
      print_progress(&format!("verified {}", label), done, total);
      if done == total {
        finish_progress();
      }
    }
  })
  .context("Verify failed")?;

  if output.is_json() {
    print_json(&reports)?;
  } else {
    for report in &reports {
      print_report(report, level);
    }
    if level.shows_info() {
      println!();
      print_stat("Duration", &format_duration(start.elapsed()));
    }
  }

  if all_succeeded(&reports) {
    Ok(ExitCode::SUCCESS)
  } else {
    Ok(ExitCode::FAILURE)
  }
}

fn status_word(status: &EntryStatus) -> &'static str {
  match status {
    EntryStatus::Ok => "OK",
    EntryStatus::Mismatch { .. } => "FAILED",
    EntryStatus::Missing => "MISSING",
    EntryStatus::Unreadable { .. } => "UNREADABLE",
  }
}

fn print_result(result: &EntryResult) {
  let word = status_word(&result.status);
  match &result.status {
    EntryStatus::Unreadable { error } => print_file_status(false, word, &format!("{} ({})", result.path, error)),
    status => print_file_status(status.is_ok(), word, &result.path),
  }
}

fn print_report(report: &VerifyReport, level: LogLevel) {
  if report.missing_hashlist {
    if level.shows_warnings() {
      print_error(&format!("No hash list found: {}", report.hashlist.display()));
    }
    return;
  }

  if level.shows_debug() {
    report.results.iter().for_each(print_result);
  } else if level.shows_info() {
    report.failures().for_each(print_result);
  }

  if !level.shows_info() {
    return;
  }

  let stats = &report.stats;
  if report.is_success() {
    print_success(&format!("Verified {}", report.hashlist.display()));
  } else {
    print_error(&format!("Verification failed for {}", report.hashlist.display()));
  }
  print_stat("Files", &stats.total.to_string());
  print_stat("OK", &stats.ok.to_string());
  if stats.failed() > 0 {
    print_stat("Mismatched", &stats.mismatched.to_string());
    print_stat("Missing", &stats.missing.to_string());
    print_stat("Unreadable", &stats.unreadable.to_string());
  }
}
