//! # Diff Module
//!
//! Unified diffs of header changes, shown in dry-run mode so a run can be
//! previewed before anything is written.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};
use similar::TextDiff;

/// Lines of unchanged context around each change.
const CONTEXT_RADIUS: usize = 3;

/// Renders and emits diffs for dry-run previews.
///
/// - `show_diff` prints each diff to stderr, colorized when supported
/// - `save_diff_path` appends every diff to one file, producing a single
///   patch for the whole run
#[derive(Debug, Default)]
pub struct DiffManager {
  pub show_diff: bool,
  pub save_diff_path: Option<PathBuf>,
}

impl DiffManager {
  pub const fn new(show_diff: bool, save_diff_path: Option<PathBuf>) -> Self {
    Self {
      show_diff,
      save_diff_path,
    }
  }

  /// Whether diffs are produced at all.
  pub const fn is_enabled(&self) -> bool {
    self.show_diff || self.save_diff_path.is_some()
  }

  /// Truncates the save file so a run starts with an empty patch.
  pub fn init(&self) -> Result<()> {
    if let Some(ref path) = self.save_diff_path {
      std::fs::write(path, "").with_context(|| format!("Failed to create diff file: {}", path.display()))?;
    }
    Ok(())
  }

  /// Emits the diff between `original` and `new` for `path`.
  pub fn display_diff(&self, path: &Path, original: &str, new: &str) -> Result<()> {
    if !self.is_enabled() {
      return Ok(());
    }

    let rendered = render_unified_diff(path, original, new);

    if self.show_diff {
      for line in rendered.lines() {
        if line.starts_with("+++") || line.starts_with("---") {
          eprintln!("{}", line.if_supports_color(Stream::Stderr, |l| l.bold()));
        } else if line.starts_with('+') {
          eprintln!("{}", line.if_supports_color(Stream::Stderr, |l| l.green()));
        } else if line.starts_with('-') {
          eprintln!("{}", line.if_supports_color(Stream::Stderr, |l| l.red()));
        } else if line.starts_with("@@") {
          eprintln!("{}", line.if_supports_color(Stream::Stderr, |l| l.cyan()));
        } else {
          eprintln!("{line}");
        }
      }
    }

    if let Some(ref diff_path) = self.save_diff_path {
      let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(diff_path)
        .with_context(|| format!("Failed to open diff file: {}", diff_path.display()))?;
      file
        .write_all(rendered.as_bytes())
        .with_context(|| format!("Failed to write diff file: {}", diff_path.display()))?;
    }

    Ok(())
  }
}

/// Renders a unified diff with `a/` and `b/` file headers.
pub fn render_unified_diff(path: &Path, original: &str, new: &str) -> String {
  let display = path.to_string_lossy().replace('\\', "/");
  let old_header = format!("a/{display}");
  let new_header = format!("b/{display}");

  TextDiff::from_lines(original, new)
    .unified_diff()
    .context_radius(CONTEXT_RADIUS)
    .header(&old_header, &new_header)
    .to_string()
}
