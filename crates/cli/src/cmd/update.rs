//! Implementation of update mode.
//!
//! Hashes every file that is not recorded yet and appends it to the hash list of each
//! target directory.

use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};

use arkhash_lib::Options;
use arkhash_lib::update::{UpdateReport, update_directories};

use crate::logging::LogLevel;
use crate::output::{OutputFormat, format_duration, print_added, print_json, print_stat, print_success, print_warning};

/// Execute update mode.
///
/// Exits with a failure code when any file could not be read; the files that could
/// be hashed are recorded regardless.
pub fn cmd_update(root: &Path, options: &Options, level: LogLevel, output: OutputFormat) -> Result<ExitCode> {
  let start = Instant::now();

  let reports = update_directories(root, options).context("Update failed")?;

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

  if reports.iter().all(UpdateReport::is_success) {
    Ok(ExitCode::SUCCESS)
  } else {
    Ok(ExitCode::FAILURE)
  }
}

fn print_report(report: &UpdateReport, level: LogLevel) {
  if level.shows_debug() {
    for entry in &report.added {
      print_added(&entry.to_string());
    }
  }

  if level.shows_warnings() {
    for failed in &report.failed {
      print_warning(&format!("{}: {}", failed.path, failed.error));
    }
  }

  if level.shows_info() {
    print_success(&format!("Updated {}", report.hashlist.display()));
    print_stat("Added", &report.added.len().to_string());
    if !report.failed.is_empty() {
      print_stat("Failed", &report.failed.len().to_string());
    }
  }
}
