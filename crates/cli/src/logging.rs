//! Log level handling and tracing setup.
//!
//! The log level decides both what the commands print and the default tracing
//! filter. `RUST_LOG` still takes precedence for the tracing output.

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
  /// Print nothing but errors; the exit code carries the result
  #[value(aliases = ["none", "0"])]
  Quiet,
  /// Print failures and summaries
  #[default]
  #[value(alias = "1")]
  Info,
  /// Print a progress line instead of per-file output (verify mode)
  Progress,
  /// Print every file and internal diagnostics
  #[value(alias = "2")]
  Debug,
}

impl LogLevel {
  pub fn shows_info(self) -> bool {
    matches!(self, LogLevel::Info | LogLevel::Debug)
  }

  pub fn shows_debug(self) -> bool {
    self == LogLevel::Debug
  }

  pub fn shows_progress(self) -> bool {
    self == LogLevel::Progress
  }

  pub fn shows_warnings(self) -> bool {
    self != LogLevel::Quiet
  }

  fn default_directive(self) -> &'static str {
    match self {
      LogLevel::Quiet => "error",
      LogLevel::Info | LogLevel::Progress => "warn",
      LogLevel::Debug => "debug",
    }
  }
}

pub fn init(level: LogLevel) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.default_directive()));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}
