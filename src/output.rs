//! # Output Module
//!
//! All operator-facing output of a run: the start line, one confirmation
//! line per rewritten file, failures and the closing summary.
//!
//! Confirmation lines go to stdout; failures go to stderr. Quiet mode keeps
//! only failures, verbose mode adds a line for every unchanged file.

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::report::{FileAction, FileReport, ProcessingSummary};

/// Symbols used in output
pub mod symbols {
  /// Header written or in place
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Failure
  pub const FAILURE: &str = "\u{2717}"; // ✗
  /// Would change (dry run)
  pub const PENDING: &str = "\u{21bb}"; // ↻
  /// Unchanged
  pub const UNCHANGED: &str = "-";
}

/// Print the initial "Updating N files..." or "Checking N files..." line.
pub fn print_start_message(file_count: usize, dry_run: bool) {
  if is_quiet() {
    return;
  }

  let verb = if dry_run { "Checking" } else { "Updating" };
  let files_word = if file_count == 1 { "file" } else { "files" };

  println!("{} {} {}...", verb, file_count, files_word);
}

/// Print a blank line for visual separation (respects quiet mode).
pub fn print_blank_line() {
  if !is_quiet() {
    println!();
  }
}

/// Print the line for one processed file.
///
/// Changed files always get a line; unchanged files only in verbose mode.
/// Failures are printed by [`print_failure`] instead.
pub fn print_file_report(report: &FileReport, root: &Path) {
  if is_quiet() {
    return;
  }

  let display_path = make_relative_path(&report.path, root);
  match (report.action, report.written) {
    (FileAction::Added | FileAction::Replaced, true) => {
      println!(
        "{} Updated: {}",
        symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
        display_path
      );
    }
    (FileAction::Added, false) => {
      println!(
        "{} Would add header: {}",
        symbols::PENDING.if_supports_color(Stream::Stdout, |s| s.yellow()),
        display_path
      );
    }
    (FileAction::Replaced, false) => {
      println!(
        "{} Would replace header: {}",
        symbols::PENDING.if_supports_color(Stream::Stdout, |s| s.yellow()),
        display_path
      );
    }
    (FileAction::Unchanged, _) if is_verbose() => {
      println!(
        "{} Unchanged: {}",
        symbols::UNCHANGED.if_supports_color(Stream::Stdout, |s| s.dimmed()),
        display_path
      );
    }
    _ => {}
  }
}

/// Print a per-file failure to stderr. Never suppressed.
pub fn print_failure(path: &Path, root: &Path, error: &str) {
  eprintln!(
    "{} Failed: {}: {}",
    symbols::FAILURE.if_supports_color(Stream::Stderr, |s| s.red()),
    make_relative_path(path, root),
    error
  );
}

/// Print the message for a run with nothing to process.
pub fn print_no_files() {
  if is_quiet() {
    return;
  }

  println!(
    "{} No eligible files found.",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green())
  );
}

/// Print the run summary.
///
/// Format: "Summary: X updated, Y unchanged, Z failed" ("would update" in
/// dry-run mode). Verbose mode adds the elapsed time.
pub fn print_summary(summary: &ProcessingSummary, dry_run: bool) {
  if is_quiet() {
    return;
  }

  let changed_label = if dry_run { "would update" } else { "updated" };
  let changed = summary.changed();
  let changed_str = if changed > 0 {
    changed.if_supports_color(Stream::Stdout, |s| s.yellow()).to_string()
  } else {
    changed.if_supports_color(Stream::Stdout, |s| s.cyan()).to_string()
  };
  let unchanged_str = summary.unchanged.if_supports_color(Stream::Stdout, |s| s.cyan());
  let failed_str = if summary.failed > 0 {
    summary.failed.if_supports_color(Stream::Stdout, |s| s.red()).to_string()
  } else {
    summary.failed.if_supports_color(Stream::Stdout, |s| s.cyan()).to_string()
  };

  let mut summary_line = format!(
    "Summary: {} {}, {} unchanged, {} failed",
    changed_str, changed_label, unchanged_str, failed_str
  );

  if is_verbose() {
    summary_line.push_str(&format!(" ({:.2}s)", summary.processing_time.as_secs_f64()));
  }

  println!("{}", summary_line);
}

/// Print a hint line (dimmed).
pub fn print_hint(message: &str) {
  if is_quiet() {
    return;
  }

  println!("{}", message.if_supports_color(Stream::Stdout, |s| s.dimmed()));
}

/// Makes a path relative to the scan root for display.
///
/// Falls back to the path as given when it is not below the root.
pub fn make_relative_path(path: &Path, root: &Path) -> String {
  match pathdiff::diff_paths(path, root) {
    Some(relative) if !relative.starts_with("..") && !relative.as_os_str().is_empty() => {
      relative.to_string_lossy().into_owned()
    }
    _ => path.to_string_lossy().into_owned(),
  }
}
