//! # File Collector Module
//!
//! Finds the source files eligible for a header and works out which module
//! each one belongs to. Both are driven purely by path components.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::config::ScanConfig;

/// Module name used when no marker directory is found in a path.
pub const UNKNOWN_MODULE: &str = "UnknownModule";

/// Resolves the module a file belongs to using the default markers.
///
/// The directory following the first `Sources` directory is the module; if
/// there is none, the directory following `Tests` is used. The file name is
/// never a module. Paths without either yield [`UNKNOWN_MODULE`].
pub fn resolve_module_name(path: &Path) -> String {
  let scan = ScanConfig::default();
  module_from_markers(path, &[scan.source_marker.as_str(), scan.test_marker.as_str()])
}

/// Resolves the module using the given markers, tried in order.
pub fn module_from_markers(path: &Path, markers: &[&str]) -> String {
  let parts = normal_components(path);
  let dirs = parts.split_last().map_or(&[][..], |(_, dirs)| dirs);

  for marker in markers {
    if let Some(index) = dirs.iter().position(|dir| dir.as_str() == *marker)
      && let Some(module) = dirs.get(index + 1)
    {
      return module.clone();
    }
  }

  UNKNOWN_MODULE.to_string()
}

/// Path components that are real names (no `.`, `..` or roots).
fn normal_components(path: &Path) -> Vec<String> {
  path
    .components()
    .filter_map(|component| match component {
      Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
      _ => None,
    })
    .collect()
}

/// Collects eligible source files below a root directory.
///
/// A file is eligible when:
/// - its extension matches the configured source extension
/// - it is not the package manifest
/// - no path component is the build output directory
/// - one of its directories is a marker (`Sources`/`Tests`) that has at
///   least one more directory below it, i.e. the file lives inside a module
pub struct FileCollector {
  extension: String,
  markers: Vec<String>,
  manifest: String,
  build_dir: String,
}

impl FileCollector {
  pub fn new(scan: &ScanConfig) -> Self {
    Self {
      extension: scan.extension.clone(),
      markers: vec![scan.source_marker.clone(), scan.test_marker.clone()],
      manifest: scan.manifest.clone(),
      build_dir: scan.build_dir.clone(),
    }
  }

  /// Resolves the module with this collector's markers.
  pub fn module_name(&self, path: &Path) -> String {
    let markers: Vec<&str> = self.markers.iter().map(String::as_str).collect();
    module_from_markers(path, &markers)
  }

  /// Walks `root` and returns every eligible file.
  ///
  /// Entries are visited in file name order at each level, so the result is
  /// deterministic. Build output directories are never descended into.
  /// Eligibility is judged on the path relative to `root`.
  pub fn discover_eligible_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
    debug!("Scanning directory: {}", root.display());
    let start_time = Instant::now();

    let walker = WalkDir::new(root)
      .sort_by_file_name()
      .into_iter()
      .filter_entry(|entry| {
        entry.depth() == 0 || !(entry.file_type().is_dir() && self.is_build_dir(entry.file_name()))
      });

    let mut files = Vec::new();
    for entry in walker {
      let entry = entry.with_context(|| format!("Failed to walk directory: {}", root.display()))?;
      if !entry.file_type().is_file() {
        continue;
      }

      let path = entry.path();
      let relative = path.strip_prefix(root).unwrap_or(path);
      if self.is_eligible(relative) {
        files.push(path.to_path_buf());
      } else {
        trace!("Skipping ineligible file: {}", path.display());
      }
    }

    debug!("Found {} eligible files in {}ms", files.len(), start_time.elapsed().as_millis());

    Ok(files)
  }

  /// Checks a file path against the eligibility rules. No I/O.
  pub fn is_eligible(&self, path: &Path) -> bool {
    let Some(file_name) = path.file_name() else {
      return false;
    };

    if file_name == OsStr::new(&self.manifest) {
      return false;
    }

    if path.extension() != Some(OsStr::new(&self.extension)) {
      return false;
    }

    let parts = normal_components(path);
    let Some((_, dirs)) = parts.split_last() else {
      return false;
    };

    if dirs.iter().any(|dir| *dir == self.build_dir) {
      return false;
    }

    dirs
      .iter()
      .enumerate()
      .any(|(index, dir)| self.markers.contains(dir) && index + 1 < dirs.len())
  }

  fn is_build_dir(&self, name: &OsStr) -> bool {
    name == OsStr::new(&self.build_dir)
  }
}
