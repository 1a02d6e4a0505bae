mod cmd;
mod logging;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use arkhash_lib::{Algorithm, Options};

use crate::logging::LogLevel;
use crate::output::{OutputFormat, print_error};

/// Maintain and verify checksum lists for archived directory trees.
///
/// Without a mode flag, reads paths from stdin and prints the ones DIRECTORY's hash
/// list does not record yet.
#[derive(Parser, Debug)]
#[command(name = "arkhash")]
#[command(author, version, about, long_about)]
struct Cli {
  /// Hash algorithm (md5, sha1, sha224, sha256, sha384, sha512, blake3)
  #[arg(short, long, visible_alias = "algo", env = "ARKHASH_ALGORITHM", default_value_t = Algorithm::Sha1)]
  algorithm: Algorithm,

  /// Operate on every subdirectory of DIRECTORY (update and verify only)
  #[arg(short = 's', long = "subdirs", visible_aliases = ["subdir", "subdirectories"])]
  subdirs: bool,

  /// Hash files that are not recorded yet and append them to the hash list
  #[arg(short, long, conflicts_with = "verify")]
  update: bool,

  /// Check every recorded file against its hash list
  #[arg(short, long)]
  verify: bool,

  /// Output detail (progress is shown in verify mode)
  #[arg(
    long,
    value_enum,
    visible_aliases = ["loglevel", "log_level"],
    env = "ARKHASH_LOG_LEVEL",
    default_value_t = LogLevel::Info
  )]
  log_level: LogLevel,

  /// Same as --log-level quiet
  #[arg(long)]
  quiet: bool,

  /// Maximum number of worker threads (0: one per CPU)
  #[arg(short = 'T', long, env = "ARKHASH_THREADS", default_value_t = 0)]
  threads: usize,

  /// Output format for update and verify reports
  #[arg(short, long, value_enum, default_value_t)]
  output: OutputFormat,

  /// Directory to operate on
  #[arg(default_value = ".")]
  directory: PathBuf,
}

impl Cli {
  fn log_level(&self) -> LogLevel {
    if self.quiet { LogLevel::Quiet } else { self.log_level }
  }

  fn options(&self) -> Options {
    Options {
      algorithm: self.algorithm,
      subdirs: self.subdirs,
      threads: self.threads,
    }
  }
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  let level = cli.log_level();
  logging::init(level);

  tracing::debug!(?cli, "parsed arguments");

  match run(&cli, level) {
    Ok(code) => code,
    Err(e) => {
      print_error(&format!("{:#}", e));
      ExitCode::FAILURE
    }
  }
}

fn run(cli: &Cli, level: LogLevel) -> Result<ExitCode> {
  let directory = dunce::canonicalize(&cli.directory)
    .with_context(|| format!("Cannot access directory {}", cli.directory.display()))?;

  if cli.update {
    cmd::cmd_update(&directory, &cli.options(), level, cli.output)
  } else if cli.verify {
    cmd::cmd_verify(&directory, &cli.options(), level, cli.output)
  } else {
    cmd::cmd_filter(&directory, cli.algorithm)?;
    Ok(ExitCode::SUCCESS)
  }
}
