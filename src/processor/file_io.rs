//! # File I/O Module
//!
//! Whole-file reads and writes. Each call opens, uses and closes its own
//! handle; nothing is held open between the read and the write of a rewrite.

use std::path::Path;

use anyhow::{Context, Result};

/// File I/O operations for the processor.
pub struct FileIO;

impl FileIO {
  /// Reads a file as UTF-8 text.
  ///
  /// Fails if the file cannot be opened or is not valid UTF-8; the error
  /// names the file.
  pub fn read_full_content(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    String::from_utf8(bytes).with_context(|| format!("File is not valid UTF-8: {}", path.display()))
  }

  /// Replaces the file content.
  pub fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
  }
}
