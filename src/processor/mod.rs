//! # Processor Module
//!
//! The header rewriter: finds eligible files below a root, replaces each
//! file's recognized header with a freshly rendered one, and writes the file
//! back in place.
//!
//! The module is organized into several submodules:
//! - [`file_collector`] - Directory walk, eligibility rules and module names
//! - [`content_transformer`] - Line splitting, leading-comment stripping and
//!   content composition
//! - [`file_io`] - Whole-file reads and writes
//!
//! Files are processed one at a time, in discovery order. The created date is
//! fixed when the [`Processor`] is built, so every file touched by one run
//! gets the same stamp.

pub mod content_transformer;
pub mod file_collector;
mod file_io;

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::NaiveDate;
pub use content_transformer::{compose, detect_line_ending, split_byte_order_mark, split_lines};
pub use file_collector::{FileCollector, UNKNOWN_MODULE, resolve_module_name};
pub use file_io::FileIO;
use tracing::{debug, trace, warn};

use crate::config::{Config, ScanConfig};
use crate::diff::DiffManager;
use crate::header_detection::{DetectionPolicy, HeaderDetector};
use crate::output::{make_relative_path, print_failure, print_file_report};
use crate::report::{FileAction, FileReport};
use crate::templates::{HeaderTemplate, render_header};

/// Configuration for creating a Processor instance.
pub struct ProcessorConfig {
  /// Directory to scan
  pub root: PathBuf,
  /// Date stamped into every header of the run
  pub created_date: NaiveDate,
  pub template: HeaderTemplate,
  pub scan: ScanConfig,

  // Behavior flags
  /// Preview changes without writing
  pub dry_run: bool,
  /// Record per-file errors and continue instead of aborting
  pub keep_going: bool,
  pub detection: DetectionPolicy,

  // Optional components
  /// Overrides the detector built from `detection`
  pub header_detector: Option<Box<dyn HeaderDetector>>,
  pub diff_manager: Option<DiffManager>,
}

impl ProcessorConfig {
  /// Creates a config with the default template and scan rules.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```ignore
  /// ProcessorConfig {
  ///     dry_run: true,
  ///     ..ProcessorConfig::new(root, created_date)
  /// }
  /// ```
  pub fn new(root: PathBuf, created_date: NaiveDate) -> Self {
    Self::from_config(root, created_date, &Config::default())
  }

  /// Creates a config whose template and scan rules come from `config`.
  pub fn from_config(root: PathBuf, created_date: NaiveDate, config: &Config) -> Self {
    Self {
      root,
      created_date,
      template: HeaderTemplate::new(&config.header),
      scan: config.scan.clone(),
      dry_run: false,
      keep_going: false,
      detection: DetectionPolicy::default(),
      header_detector: None,
      diff_manager: None,
    }
  }
}

/// Result of rewriting one file's content in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
  pub action: FileAction,
  pub module: String,
  pub content: String,
}

/// Rewrites headers across a source tree.
pub struct Processor {
  root: PathBuf,
  created_date: NaiveDate,
  template: HeaderTemplate,
  file_collector: FileCollector,
  header_detector: Box<dyn HeaderDetector>,
  diff_manager: DiffManager,
  dry_run: bool,
  keep_going: bool,
}

impl Processor {
  /// Creates a new processor.
  ///
  /// # Errors
  ///
  /// Returns an error if the header detection pattern cannot be built from
  /// the template.
  pub fn new(config: ProcessorConfig) -> Result<Self> {
    let header_detector = match config.header_detector {
      Some(detector) => detector,
      None => config.detection.detector(&config.template)?,
    };

    Ok(Self {
      root: config.root,
      created_date: config.created_date,
      template: config.template,
      file_collector: FileCollector::new(&config.scan),
      header_detector,
      diff_manager: config.diff_manager.unwrap_or_default(),
      dry_run: config.dry_run,
      keep_going: config.keep_going,
    })
  }

  /// Eligible files below the root, in deterministic walk order.
  pub fn discover_eligible_files(&self) -> Result<Vec<PathBuf>> {
    self.file_collector.discover_eligible_files(&self.root)
  }

  /// Discovers every eligible file and rewrites each one.
  ///
  /// Stops at the first error unless `keep_going` is set, in which case the
  /// failure is recorded as a [`FileAction::Failed`] report. Files rewritten
  /// before a failure stay rewritten.
  pub fn update_headers(&self) -> Result<Vec<FileReport>> {
    let files = self.discover_eligible_files()?;
    self.process_files(&files)
  }

  /// Rewrites the given files in order.
  pub fn process_files(&self, files: &[PathBuf]) -> Result<Vec<FileReport>> {
    let mut reports = Vec::with_capacity(files.len());

    for path in files {
      match self.rewrite_file(path) {
        Ok(report) => reports.push(report),
        Err(e) if self.keep_going => {
          warn!("Continuing after failure on {}: {:#}", path.display(), e);
          let report = FileReport::failed(path.clone(), &e);
          print_failure(path, &self.root, report.error.as_deref().unwrap_or_default());
          reports.push(report);
        }
        Err(e) => return Err(e),
      }
    }

    Ok(reports)
  }

  /// Replaces the header of a single file.
  ///
  /// The file is read in full, rewritten in memory and, if the content
  /// changed and this is not a dry run, written back. Unchanged files are not
  /// touched at all.
  pub fn rewrite_file(&self, path: &Path) -> Result<FileReport> {
    trace!("Processing file: {}", path.display());

    let original = FileIO::read_full_content(path)?;
    let rewrite = self.rewrite_content(path, &original);

    let mut written = false;
    if rewrite.action.is_change() {
      if self.dry_run {
        let display_path = PathBuf::from(make_relative_path(path, &self.root));
        self.diff_manager.display_diff(&display_path, &original, &rewrite.content)?;
      } else {
        FileIO::write_file(path, &rewrite.content)?;
        written = true;
      }
    }

    debug!("{:?} {} (module {})", rewrite.action, path.display(), rewrite.module);

    let report = FileReport::new(path.to_path_buf(), rewrite.action, rewrite.module, written);
    print_file_report(&report, &self.root);
    Ok(report)
  }

  /// Computes the new content for a file without touching the disk.
  ///
  /// If the detector recognizes a header, everything up to its end is
  /// dropped; otherwise the whole content is kept as the body. The body is
  /// then placed under a new header and one blank separator line, both
  /// written with the body's line terminator. A byte-order mark stays first.
  pub fn rewrite_content(&self, path: &Path, content: &str) -> Rewrite {
    let (byte_order_mark, text) = split_byte_order_mark(content);
    let lines = split_lines(text);
    let (had_header, body) = match self.header_detector.header_end(&lines) {
      Some(end) => (true, &lines[end.min(lines.len())..]),
      None => (false, &lines[..]),
    };

    let filename = path
      .file_name()
      .map(|name| name.to_string_lossy().into_owned())
      .unwrap_or_default();
    let module = self.module_name(path);
    let header = render_header(&self.template, &filename, &module, self.created_date);
    let line_ending = detect_line_ending(body)
      .or_else(|| detect_line_ending(&lines))
      .unwrap_or("\n");
    let new_content = format!("{byte_order_mark}{}", compose(&header, body, line_ending));

    let action = if new_content == content {
      FileAction::Unchanged
    } else if had_header {
      FileAction::Replaced
    } else {
      FileAction::Added
    };

    Rewrite {
      action,
      module,
      content: new_content,
    }
  }

  /// Checks whether content starts with a header the detector recognizes.
  pub fn has_header(&self, content: &str) -> bool {
    let (_, text) = split_byte_order_mark(content);
    self.header_detector.has_header(&split_lines(text))
  }

  /// Module for a path, resolved on the part below the root when possible.
  pub fn module_name(&self, path: &Path) -> String {
    let relative = path.strip_prefix(&self.root).unwrap_or(path);
    self.file_collector.module_name(relative)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::header_detection::MarkerHeaderDetector;

  fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 30).expect("valid date")
  }

  fn processor() -> Processor {
    Processor::new(ProcessorConfig::new(PathBuf::from("/repo"), date())).expect("processor builds")
  }

  #[test]
  fn test_rewrite_content_adds_header() {
    let p = processor();
    let path = Path::new("/repo/Sources/Core/A.swift");
    let rewrite = p.rewrite_content(path, "print(1)\n");

    let expected = format!(
      "{}\nprint(1)\n",
      render_header(&HeaderTemplate::default(), "A.swift", "Core", date())
    );
    assert_eq!(rewrite.action, FileAction::Added);
    assert_eq!(rewrite.module, "Core");
    assert_eq!(rewrite.content, expected);
  }

  #[test]
  fn test_rewrite_content_is_idempotent() {
    let p = processor();
    let path = Path::new("/repo/Sources/Core/A.swift");
    let once = p.rewrite_content(path, "\n\nimport Foundation\n").content;
    let twice = p.rewrite_content(path, &once);

    assert_eq!(twice.action, FileAction::Unchanged);
    assert_eq!(twice.content, once);
  }

  #[test]
  fn test_rewrite_content_replaces_stale_header() {
    let p = processor();
    let path = Path::new("/repo/Tests/CoreTests/ATests.swift");
    let old_date = NaiveDate::from_ymd_opt(2024, 1, 2).expect("valid date");
    let old = format!(
      "{}\n// MARK: - Tests\nimport XCTest\n",
      render_header(&HeaderTemplate::default(), "Old.swift", "OldModule", old_date)
    );

    let rewrite = p.rewrite_content(path, &old);
    assert_eq!(rewrite.action, FileAction::Replaced);
    assert!(rewrite.content.contains("//  ATests.swift\n//  CoreTests\n"));
    assert!(rewrite.content.contains("Created on March 30, 2025"));
    // The comment after the header is not part of it and survives.
    assert!(rewrite.content.ends_with("//\n\n// MARK: - Tests\nimport XCTest\n"));
  }

  #[test]
  fn test_unrecognized_comments_are_kept_by_structural_policy() {
    let p = processor();
    let path = Path::new("/repo/Sources/Core/A.swift");
    let content = "// Copyright © 2019 Someone Else\n\nimport Foundation\n";

    let rewrite = p.rewrite_content(path, content);
    assert_eq!(rewrite.action, FileAction::Added);
    assert!(rewrite.content.ends_with(&format!("//\n\n{content}")));
  }

  #[test]
  fn test_marker_policy_strips_leading_comments() {
    let config = ProcessorConfig {
      header_detector: Some(Box::new(MarkerHeaderDetector::new())),
      ..ProcessorConfig::new(PathBuf::from("/repo"), date())
    };
    let p = Processor::new(config).expect("processor builds");
    let path = Path::new("/repo/Sources/Core/A.swift");

    let rewrite = p.rewrite_content(path, "// A.swift\n// Copyright © 2019 Someone\n\nimport Foundation\n");
    assert_eq!(rewrite.action, FileAction::Replaced);
    assert!(rewrite.content.ends_with("//\n\nimport Foundation\n"));
    assert!(!rewrite.content.contains("Someone"));
  }

  #[test]
  fn test_byte_order_mark_header_is_replaced_not_stacked() {
    let p = processor();
    let path = Path::new("/repo/Sources/Core/A.swift");
    let old_date = NaiveDate::from_ymd_opt(2024, 1, 2).expect("valid date");
    let content = format!(
      "\u{feff}{}x\n",
      render_header(&HeaderTemplate::default(), "A.swift", "Core", old_date)
    );

    assert!(p.has_header(&content));
    let rewrite = p.rewrite_content(path, &content);
    assert_eq!(rewrite.action, FileAction::Replaced);
    assert_eq!(rewrite.content.matches("Copyright ©").count(), 1);
    assert_eq!(rewrite.content.find('\u{feff}'), Some(0));
    assert_eq!(rewrite.content.matches('\u{feff}').count(), 1);

    let again = p.rewrite_content(path, &rewrite.content);
    assert_eq!(again.action, FileAction::Unchanged);
  }

  #[test]
  fn test_crlf_file_keeps_crlf_endings() {
    let p = processor();
    let path = Path::new("/repo/Sources/Core/A.swift");

    let rewrite = p.rewrite_content(path, "a\r\nb\r\n");
    assert_eq!(rewrite.action, FileAction::Added);
    assert_eq!(rewrite.content.matches('\n').count(), rewrite.content.matches("\r\n").count());
    assert!(rewrite.content.starts_with("//\r\n//  A.swift\r\n//  Core\r\n"));
    assert!(rewrite.content.ends_with("//\r\n\r\na\r\nb\r\n"));

    let again = p.rewrite_content(path, &rewrite.content);
    assert_eq!(again.action, FileAction::Unchanged);
  }

  #[test]
  fn test_mixed_endings_follow_the_body() {
    let p = processor();
    let path = Path::new("/repo/Sources/Core/A.swift");
    let lf_header = render_header(&HeaderTemplate::default(), "A.swift", "Core", date());

    let rewrite = p.rewrite_content(path, &format!("{lf_header}\na\r\n"));
    assert_eq!(rewrite.action, FileAction::Replaced);
    assert_eq!(rewrite.content, format!("{}\r\na\r\n", lf_header.replace('\n', "\r\n")));
  }

  #[test]
  fn test_module_name_outside_root_uses_full_path() {
    let p = processor();
    assert_eq!(p.module_name(Path::new("/other/Sources/Net/B.swift")), "Net");
    assert_eq!(p.module_name(Path::new("/repo/Sources/Net/B.swift")), "Net");
    assert_eq!(p.module_name(Path::new("/repo/misc/B.swift")), UNKNOWN_MODULE);
  }

  #[test]
  fn test_has_header() {
    let p = processor();
    let with_header = p.rewrite_content(Path::new("/repo/Sources/Core/A.swift"), "x\n").content;
    assert!(p.has_header(&with_header));
    assert!(!p.has_header("x\n"));
  }
}
