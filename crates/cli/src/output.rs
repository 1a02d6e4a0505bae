//! CLI output formatting utilities.
//!
//! Provides consistent formatting for terminal output including colored status
//! messages, duration formatting and the single-line verify progress display.

use std::io::Write;
use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const WARNING: &str = "⚠";
  pub const INFO: &str = "•";
  pub const ADD: &str = "+";
}

pub fn format_duration(duration: Duration) -> String {
  let secs = duration.as_secs();
  let millis = duration.subsec_millis();

  if secs >= 60 {
    let mins = secs / 60;
    let remaining_secs = secs % 60;
    format!("{}m {}s", mins, remaining_secs)
  } else if secs > 0 {
    format!("{}.{:02}s", secs, millis / 10)
  } else {
    format!("{}ms", millis)
  }
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

pub fn print_warning(message: &str) {
  eprintln!(
    "{} {}",
    symbols::WARNING.if_supports_color(Stream::Stderr, |s| s.yellow()),
    message.if_supports_color(Stream::Stderr, |s| s.yellow())
  );
}

pub fn print_stat(label: &str, value: &str) {
  println!(
    "  {}: {}",
    label.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    value
  );
}

/// One verify result line: a status word followed by the path.
pub fn print_file_status(ok: bool, status: &str, path: &str) {
  if ok {
    println!(
      "  {} {} {}",
      symbols::INFO.if_supports_color(Stream::Stdout, |s| s.dimmed()),
      status.if_supports_color(Stream::Stdout, |s| s.green()),
      path
    );
  } else {
    println!(
      "  {} {} {}",
      symbols::ERROR.if_supports_color(Stream::Stdout, |s| s.red()),
      status.if_supports_color(Stream::Stdout, |s| s.red()),
      path
    );
  }
}

pub fn print_added(line: &str) {
  println!("  {} {}", symbols::ADD.if_supports_color(Stream::Stdout, |s| s.green()), line);
}

/// Overwrite the current stderr line with a progress counter.
pub fn print_progress(label: &str, done: usize, total: usize) {
  let mut stderr = std::io::stderr().lock();
  let _ = write!(stderr, "\r{} {}/{}", label, done, total);
  let _ = stderr.flush();
}

/// Terminate a progress line started with [`print_progress`].
pub fn finish_progress() {
  eprintln!();
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}
