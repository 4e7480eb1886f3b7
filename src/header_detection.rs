//! # Header Detection Module
//!
//! Decides whether a file already starts with a standard header and, if so,
//! where that header ends. The processor only talks to the
//! [`HeaderDetector`] trait, so the detection policy can be swapped without
//! touching the rewrite logic.
//!
//! Two policies ship with the crate:
//! - [`StructuralHeaderDetector`] (default) recognizes only a block laid out
//!   exactly like a rendered header and strips nothing else.
//! - [`MarkerHeaderDetector`] looks for the copyright marker near the top and
//!   strips the whole leading comment block.

use anyhow::{Context, Result};
use clap::ValueEnum;
use regex::Regex;

use crate::processor::content_transformer::{is_blank, line_text, strip_leading_header};
use crate::templates::{COMMENT_PREFIX, HEADER_LINE_COUNT, HeaderTemplate};

/// How many lines from the top of a file are inspected.
pub const HEADER_SCAN_LINES: usize = HEADER_LINE_COUNT;

/// Substring the loose policy looks for.
pub const COPYRIGHT_MARKER: &str = "Copyright ©";

/// Trait for header detectors.
pub trait HeaderDetector: Send + Sync {
  /// Returns the index of the first line after the recognized header block,
  /// or `None` if the file has no header this detector recognizes.
  ///
  /// `lines` are whole lines, terminators included.
  fn header_end(&self, lines: &[&str]) -> Option<usize>;

  /// Checks if the lines start with a header.
  fn has_header(&self, lines: &[&str]) -> bool {
    self.header_end(lines).is_some()
  }
}

/// Available detection policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DetectionPolicy {
  /// Match the exact header layout; strip only that block
  #[default]
  Structural,
  /// Match the copyright marker; strip every leading comment line
  Marker,
}

impl DetectionPolicy {
  /// Builds the detector for this policy.
  pub fn detector(self, template: &HeaderTemplate) -> Result<Box<dyn HeaderDetector>> {
    let detector: Box<dyn HeaderDetector> = match self {
      DetectionPolicy::Structural => Box::new(StructuralHeaderDetector::new(template)?),
      DetectionPolicy::Marker => Box::new(MarkerHeaderDetector::new()),
    };
    Ok(detector)
  }
}

/// Recognizes headers line by line against the template layout.
///
/// The file name, module, created date and copyright year may hold any value,
/// so headers written on earlier days or for renamed files are still found.
/// Project, domain and license must match the template. The blank line that
/// separates the header from the body is part of the block when present.
pub struct StructuralHeaderDetector {
  pattern: Regex,
}

impl StructuralHeaderDetector {
  pub fn new(template: &HeaderTemplate) -> Result<Self> {
    let project = regex::escape(&template.project);
    let domain = regex::escape(&template.domain);
    let license = regex::escape(&template.license);
    let c = regex::escape(COMMENT_PREFIX);

    let lines = [
      c.clone(),
      format!(r"{c}[ \t]+\S.*"),
      format!(r"{c}[ \t]+\S.*"),
      c.clone(),
      format!(r"{c}[ \t]+Created on .+ as part of the {project} open-source {domain} SDK\."),
      format!(r"{c}[ \t]+Copyright © \d{{4}} {project} Contributors\. All rights reserved\."),
      c.clone(),
      format!(r"{c}[ \t]+Licensed under the {license} License\."),
      format!(r"{c}[ \t]+See LICENSE\.md in the project root for license information\."),
      c.clone(),
    ];
    debug_assert_eq!(lines.len(), HEADER_LINE_COUNT);

    let source = format!("^{}$", lines.join("\n"));
    let pattern = Regex::new(&source).with_context(|| format!("Failed to compile header pattern: {source}"))?;

    Ok(Self { pattern })
  }
}

impl HeaderDetector for StructuralHeaderDetector {
  fn header_end(&self, lines: &[&str]) -> Option<usize> {
    if lines.len() < HEADER_LINE_COUNT {
      return None;
    }

    let top = lines[..HEADER_LINE_COUNT]
      .iter()
      .map(|line| line_text(line).trim_end())
      .collect::<Vec<_>>()
      .join("\n");

    if !self.pattern.is_match(&top) {
      return None;
    }

    match lines.get(HEADER_LINE_COUNT) {
      Some(separator) if is_blank(separator) => Some(HEADER_LINE_COUNT + 1),
      _ => Some(HEADER_LINE_COUNT),
    }
  }
}

/// Loose detection: the copyright marker in the leading comment block.
///
/// Only the first [`HEADER_SCAN_LINES`] lines of the block are searched.
/// Malformed or partial headers are treated like well-formed ones, and
/// unrelated comments at the top of the file are stripped with them.
pub struct MarkerHeaderDetector {
  marker: &'static str,
}

impl MarkerHeaderDetector {
  pub const fn new() -> Self {
    Self {
      marker: COPYRIGHT_MARKER,
    }
  }
}

impl Default for MarkerHeaderDetector {
  fn default() -> Self {
    Self::new()
  }
}

impl HeaderDetector for MarkerHeaderDetector {
  fn header_end(&self, lines: &[&str]) -> Option<usize> {
    let block = &lines[..lines.len() - strip_leading_header(lines).len()];
    let found = block
      .iter()
      .take(HEADER_SCAN_LINES)
      .any(|line| line.contains(self.marker));

    found.then_some(block.len())
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;
  use crate::processor::content_transformer::split_lines;
  use crate::templates::render_header;

  fn rendered(filename: &str, module: &str) -> String {
    let date = NaiveDate::from_ymd_opt(2025, 3, 30).expect("valid date");
    render_header(&HeaderTemplate::default(), filename, module, date)
  }

  fn structural() -> StructuralHeaderDetector {
    StructuralHeaderDetector::new(&HeaderTemplate::default()).expect("pattern compiles")
  }

  #[test]
  fn test_structural_detects_rendered_header() {
    let content = format!("{}\nimport Foundation\n", rendered("Clock.swift", "RelayCore"));
    let lines = split_lines(&content);

    assert!(structural().has_header(&lines));
    assert_eq!(structural().header_end(&lines), Some(HEADER_LINE_COUNT + 1));
  }

  #[test]
  fn test_structural_header_without_separator() {
    let content = format!("{}import Foundation\n", rendered("Clock.swift", "RelayCore"));
    let lines = split_lines(&content);
    assert_eq!(structural().header_end(&lines), Some(HEADER_LINE_COUNT));
  }

  #[test]
  fn test_structural_accepts_other_year_and_crlf() {
    let content = rendered("A.swift", "Core")
      .replace("Copyright © 2025", "Copyright © 2023")
      .replace('\n', "\r\n");
    let lines = split_lines(&content);
    assert!(structural().has_header(&lines));
  }

  #[test]
  fn test_structural_rejects_incidental_copyright() {
    let content = "// Copyright © 2025 Relay Contributors. All rights reserved.\nimport Foundation\n";
    let lines = split_lines(content);
    assert!(!structural().has_header(&lines));
  }

  #[test]
  fn test_structural_rejects_other_project() {
    let content = rendered("A.swift", "Core").replace("Relay", "Other");
    let lines = split_lines(&content);
    assert!(!structural().has_header(&lines));
  }

  #[test]
  fn test_structural_rejects_missing_line() {
    let content = rendered("A.swift", "Core").replace("//  Licensed under the MIT License.\n", "");
    let lines = split_lines(&content);
    assert!(!structural().has_header(&lines));
  }

  #[test]
  fn test_structural_escapes_template_fields() {
    let template = HeaderTemplate {
      project: "Relay+".to_string(),
      ..HeaderTemplate::default()
    };
    let detector = StructuralHeaderDetector::new(&template).expect("pattern compiles");
    let date = NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date");
    let content = render_header(&template, "A.swift", "Core", date);

    assert!(detector.has_header(&split_lines(&content)));
    assert!(!detector.has_header(&split_lines(&content.replace("Relay+", "Relayyy"))));
  }

  #[test]
  fn test_marker_detects_within_scan_window() {
    let detector = MarkerHeaderDetector::new();
    let content = "// Some.swift\n// Copyright © 2019 Someone\n\nlet x = 1\n";
    let lines = split_lines(content);
    assert_eq!(detector.header_end(&lines), Some(3));
  }

  #[test]
  fn test_marker_ignores_lines_past_window() {
    let detector = MarkerHeaderDetector::new();
    let mut content = "let x = 1\n".repeat(HEADER_SCAN_LINES);
    content.push_str("// Copyright © 2019 Someone\n");
    assert!(!detector.has_header(&split_lines(&content)));
  }

  #[test]
  fn test_marker_below_code_is_not_a_header() {
    let detector = MarkerHeaderDetector::new();
    let lines = split_lines("import Foundation\n// Copyright © 2019 Someone\n");
    assert_eq!(detector.header_end(&lines), None);
  }

  #[test]
  fn test_marker_after_leading_block_is_not_a_header() {
    let detector = MarkerHeaderDetector::new();
    let lines = split_lines("// notes\n\nlet x = 1\n// Copyright © 2019 Someone\n");
    assert!(!detector.has_header(&lines));
  }

  #[test]
  fn test_marker_strips_comments_then_blank_then_code() {
    let detector = MarkerHeaderDetector::new();
    let lines = split_lines("// a\n// Copyright © 2019 Someone\n// c\n// d\n// e\n\nimport Foundation\n");
    assert_eq!(detector.header_end(&lines), Some(6));
  }

  #[test]
  fn test_policy_builds_detectors() {
    let template = HeaderTemplate::default();
    let content = rendered("A.swift", "Core");
    let lines = split_lines(&content);

    for policy in [DetectionPolicy::Structural, DetectionPolicy::Marker] {
      let detector = policy.detector(&template).expect("detector builds");
      assert!(detector.has_header(&lines), "{policy:?}");
    }
  }
}
