//! # Update Command
//!
//! Argument definitions and the driver for a header update run.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::Args;
use tracing::debug;

use crate::config::load_config;
use crate::diff::DiffManager;
use crate::header_detection::DetectionPolicy;
use crate::info_log;
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::output::{print_blank_line, print_hint, print_no_files, print_start_message, print_summary};
use crate::processor::{Processor, ProcessorConfig};
use crate::report::ProcessingSummary;

/// Error returned for a malformed `--date` value.
#[derive(Debug, thiserror::Error)]
#[error("invalid date '{0}', expected YYYY-MM-DD")]
pub struct InvalidDateError(pub String);

/// Parses a `--date` value.
pub fn parse_date(value: &str) -> Result<NaiveDate, InvalidDateError> {
  NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| InvalidDateError(value.to_string()))
}

/// Arguments for an update run
#[derive(Args, Debug, Default)]
pub struct UpdateArgs {
  /// Root directory to scan
  #[arg(default_value = ".", value_name = "ROOT")]
  pub root: PathBuf,

  /// Report what would change without writing any file
  #[arg(long, short = 'n')]
  pub dry_run: bool,

  /// Like --dry-run, but exit with a non-zero status if any file would change
  #[arg(long, conflicts_with = "dry_run")]
  pub check: bool,

  /// Print a diff of every pending change to stderr (dry run only)
  #[arg(long)]
  pub show_diff: bool,

  /// Write a diff of every pending change to a file (dry run only)
  #[arg(long, short = 'o', value_name = "FILE")]
  pub save_diff: Option<PathBuf>,

  /// Keep processing after a file fails and report all failures at the end
  #[arg(long)]
  pub keep_going: bool,

  /// Date to stamp into the "Created on" line [default: today]
  #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date)]
  pub date: Option<NaiveDate>,

  /// How existing headers are recognized
  #[arg(long, value_enum, default_value_t = DetectionPolicy::Structural)]
  pub detection: DetectionPolicy,

  /// Path to config file (default: .relay-headers.toml in ROOT)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long, conflicts_with = "config")]
  pub no_config: bool,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

impl UpdateArgs {
  const fn is_dry_run(&self) -> bool {
    self.dry_run || self.check
  }

  /// Validate the arguments and return an error if invalid
  fn validate(&self) -> Result<(), String> {
    if (self.show_diff || self.save_diff.is_some()) && !self.is_dry_run() {
      return Err("--show-diff and --save-diff require --dry-run or --check".to_string());
    }
    if !self.root.is_dir() {
      return Err(format!("Root is not a directory: {}", self.root.display()));
    }
    Ok(())
  }
}

/// Run a header update with the given arguments
pub fn run_update(args: UpdateArgs) -> Result<ExitCode> {
  init_tracing(args.quiet, args.verbose);

  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  if let Err(e) = args.validate() {
    bail!(e);
  }

  let dry_run = args.is_dry_run();
  let config = load_config(args.config.as_deref(), &args.root, args.no_config)?;

  // One date for the whole run.
  let created_date = args.date.unwrap_or_else(|| chrono::Local::now().date_naive());
  debug!("Using created date {created_date}");

  let diff_manager = DiffManager::new(args.show_diff, args.save_diff.clone());
  diff_manager.init()?;

  let processor = Processor::new(ProcessorConfig {
    dry_run,
    keep_going: args.keep_going,
    detection: args.detection,
    diff_manager: Some(diff_manager),
    ..ProcessorConfig::from_config(args.root.clone(), created_date, &config)
  })
  .context("Failed to set up header processor")?;

  if dry_run {
    info_log!("Dry run: no files will be modified");
  }

  let files = processor.discover_eligible_files()?;
  print_start_message(files.len(), dry_run);

  if files.is_empty() {
    print_blank_line();
    print_no_files();
    return Ok(ExitCode::SUCCESS);
  }

  let start_time = Instant::now();
  let reports = processor.process_files(&files)?;
  let summary = ProcessingSummary::from_reports(&reports, start_time.elapsed());

  print_blank_line();
  print_summary(&summary, dry_run);

  if summary.failed > 0 {
    return Ok(ExitCode::FAILURE);
  }

  if args.check && summary.changed() > 0 {
    print_blank_line();
    print_hint("Run without --check to update the headers.");
    return Ok(ExitCode::FAILURE);
  }

  Ok(ExitCode::SUCCESS)
}
