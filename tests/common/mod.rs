#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::NaiveDate;

/// Date used by every test run so headers are deterministic.
pub fn test_date() -> NaiveDate {
  NaiveDate::from_ymd_opt(2025, 3, 30).expect("valid date")
}

/// `--date` value matching [`test_date`].
pub const TEST_DATE_ARG: &str = "2025-03-30";

/// Writes `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: impl AsRef<[u8]>) -> Result<PathBuf> {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }
  fs::write(&path, content)?;
  Ok(path)
}

/// Lays out a small Swift package with eligible and ineligible files.
///
/// Returns the paths of the files that should be rewritten.
pub fn create_package(root: &Path) -> Result<Vec<PathBuf>> {
  write_file(root, "Package.swift", "// swift-tools-version:5.7\nimport PackageDescription\n")?;
  write_file(root, "README.md", "# Relay\n")?;
  write_file(root, "scripts/gen.swift", "print(\"tool\")\n")?;
  write_file(root, ".build/checkouts/Sources/Dep/Dep.swift", "struct Dep {}\n")?;
  write_file(root, "Sources/Core/notes.txt", "not swift\n")?;

  Ok(vec![
    write_file(root, "Sources/Core/Clock.swift", "import Foundation\n\nstruct Clock {}\n")?,
    write_file(root, "Sources/Core/Internal/Buffer.swift", "// MARK: - Buffer\nfinal class Buffer {}\n")?,
    write_file(root, "Tests/CoreTests/ClockTests.swift", "import XCTest\n")?,
  ])
}

/// Files in the package layout that must never change.
pub const INELIGIBLE_FILES: &[&str] = &[
  "Package.swift",
  "README.md",
  "scripts/gen.swift",
  ".build/checkouts/Sources/Dep/Dep.swift",
  "Sources/Core/notes.txt",
];

/// Reads every ineligible file of the package layout.
pub fn snapshot_ineligible(root: &Path) -> Result<Vec<Vec<u8>>> {
  INELIGIBLE_FILES.iter().map(|f| Ok(fs::read(root.join(f))?)).collect()
}
