//! # Templates Module
//!
//! Rendering of the standard header block.
//!
//! - [`HeaderTemplate`] holds the fixed fields (project, domain, license,
//!   copyright year)
//! - [`HeaderData`] holds the per-file slots (file name, module, created date)
//!
//! A rendered header always has [`HEADER_LINE_COUNT`] lines, each starting
//! with [`COMMENT_PREFIX`], whatever the slot values are. Detection of
//! headers written by earlier runs depends on that.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use relay_headers::templates::{HeaderData, HeaderTemplate};
//!
//! let template = HeaderTemplate::default();
//! let data = HeaderData {
//!   filename: "Clock.swift".to_string(),
//!   module: "RelayCore".to_string(),
//!   created_date: NaiveDate::from_ymd_opt(2025, 3, 30).expect("valid date"),
//! };
//!
//! let header = template.render(&data);
//! assert!(header.starts_with("//\n//  Clock.swift\n//  RelayCore\n"));
//! ```

use chrono::NaiveDate;

use crate::config::HeaderConfig;

/// Number of lines in a rendered header, not counting the blank separator.
pub const HEADER_LINE_COUNT: usize = 10;

/// Line comment prefix used by the header and by the leading-comment scan.
pub const COMMENT_PREFIX: &str = "//";

/// chrono format for the "Created on" date, e.g. `March 30, 2025`.
pub const CREATED_DATE_FORMAT: &str = "%B %d, %Y";

/// Per-file values substituted into the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderData {
  /// File name without directories, e.g. `Clock.swift`
  pub filename: String,
  /// Owning module, derived from the path
  pub module: String,
  /// Date stamped into the "Created on" line
  pub created_date: NaiveDate,
}

/// The fixed part of the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderTemplate {
  pub project: String,
  pub domain: String,
  pub license: String,
  pub copyright_year: String,
}

impl Default for HeaderTemplate {
  fn default() -> Self {
    Self::new(&HeaderConfig::default())
  }
}

impl HeaderTemplate {
  pub fn new(config: &HeaderConfig) -> Self {
    Self {
      project: config.project.clone(),
      domain: config.domain.clone(),
      license: config.license.clone(),
      copyright_year: config.copyright_year.clone(),
    }
  }

  /// Copyright holder, always `<project> Contributors`.
  pub fn holder(&self) -> String {
    format!("{} Contributors", self.project)
  }

  /// Renders the header block for one file.
  ///
  /// Every line, including the last, ends with `\n`. Line breaks inside the
  /// slot values are flattened to spaces so the line count never changes.
  pub fn render(&self, data: &HeaderData) -> String {
    let filename = single_line(&data.filename);
    let module = single_line(&data.module);
    let created = format_created_date(data.created_date);

    let lines = [
      COMMENT_PREFIX.to_string(),
      format!("{COMMENT_PREFIX}  {filename}"),
      format!("{COMMENT_PREFIX}  {module}"),
      COMMENT_PREFIX.to_string(),
      format!(
        "{COMMENT_PREFIX}  Created on {created} as part of the {} open-source {} SDK.",
        self.project, self.domain
      ),
      format!(
        "{COMMENT_PREFIX}  Copyright © {} {}. All rights reserved.",
        self.copyright_year,
        self.holder()
      ),
      COMMENT_PREFIX.to_string(),
      format!("{COMMENT_PREFIX}  Licensed under the {} License.", self.license),
      format!("{COMMENT_PREFIX}  See LICENSE.md in the project root for license information."),
      COMMENT_PREFIX.to_string(),
    ];

    let mut rendered = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in &lines {
      rendered.push_str(line);
      rendered.push('\n');
    }
    rendered
  }
}

/// Renders a header with the given template for a single file.
pub fn render_header(template: &HeaderTemplate, filename: &str, module: &str, created_date: NaiveDate) -> String {
  template.render(&HeaderData {
    filename: filename.to_string(),
    module: module.to_string(),
    created_date,
  })
}

/// Formats a date the way the "Created on" line shows it.
pub fn format_created_date(date: NaiveDate) -> String {
  date.format(CREATED_DATE_FORMAT).to_string()
}

fn single_line(value: &str) -> String {
  value.replace(['\r', '\n'], " ")
}
