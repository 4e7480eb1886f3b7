//! # Report Module
//!
//! Per-file outcomes of a run and the summary built from them.

use std::path::PathBuf;
use std::time::Duration;

/// What happened (or, in dry-run mode, would happen) to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
  /// The file had no recognized header; one was prepended
  Added,
  /// The existing header was replaced
  Replaced,
  /// The file already had exactly the header that would be written
  Unchanged,
  /// Reading or writing the file failed
  Failed,
}

impl FileAction {
  /// Whether the file content changes (or would change).
  pub const fn is_change(self) -> bool {
    matches!(self, FileAction::Added | FileAction::Replaced)
  }
}

/// Outcome for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
  pub path: PathBuf,
  pub action: FileAction,
  /// Module name stamped into the header
  pub module: Option<String>,
  /// Whether the new content was written to disk
  pub written: bool,
  /// Error message for [`FileAction::Failed`]
  pub error: Option<String>,
}

impl FileReport {
  pub const fn new(path: PathBuf, action: FileAction, module: String, written: bool) -> Self {
    Self {
      path,
      action,
      module: Some(module),
      written,
      error: None,
    }
  }

  pub fn failed(path: PathBuf, error: &anyhow::Error) -> Self {
    Self {
      path,
      action: FileAction::Failed,
      module: None,
      written: false,
      error: Some(format!("{error:#}")),
    }
  }
}

/// Counts per action for a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingSummary {
  pub total_files: usize,
  pub added: usize,
  pub replaced: usize,
  pub unchanged: usize,
  pub failed: usize,
  pub processing_time: Duration,
}

impl ProcessingSummary {
  pub fn from_reports(reports: &[FileReport], processing_time: Duration) -> Self {
    let mut summary = Self {
      total_files: reports.len(),
      processing_time,
      ..Self::default()
    };

    for report in reports {
      match report.action {
        FileAction::Added => summary.added += 1,
        FileAction::Replaced => summary.replaced += 1,
        FileAction::Unchanged => summary.unchanged += 1,
        FileAction::Failed => summary.failed += 1,
      }
    }

    summary
  }

  /// Files whose content changes (or would change).
  pub const fn changed(&self) -> usize {
    self.added + self.replaced
  }
}
