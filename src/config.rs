//! # Configuration Module
//!
//! Optional configuration for relay-headers. Every setting has a default that
//! reproduces the standard Relay header, so a config file is only needed for
//! trees that use a different project name, license or layout.
//!
//! Configuration is read from `.relay-headers.toml` in the scan root, from the
//! path in the `RELAY_HEADERS_CONFIG` environment variable, or from the path
//! given with `--config`.
//!
//! ```toml
//! [header]
//! project = "Relay"
//! domain = "observability"
//! license = "MIT"
//! copyright-year = "2025"
//!
//! [scan]
//! extension = "swift"
//! source-marker = "Sources"
//! test-marker = "Tests"
//! manifest = "Package.swift"
//! build-dir = ".build"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".relay-headers.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "RELAY_HEADERS_CONFIG";

/// Fixed fields of the rendered header.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct HeaderConfig {
  /// Project name, also used for the copyright holder ("<project> Contributors")
  pub project: String,
  /// Domain word in the "open-source <domain> SDK" phrase
  pub domain: String,
  /// License name in the "Licensed under the <license> License." line
  pub license: String,
  /// Copyright year, four digits
  pub copyright_year: String,
}

impl Default for HeaderConfig {
  fn default() -> Self {
    Self {
      project: "Relay".to_string(),
      domain: "observability".to_string(),
      license: "MIT".to_string(),
      copyright_year: "2025".to_string(),
    }
  }
}

/// Which files the scan picks up.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ScanConfig {
  /// Source file extension without the leading dot
  pub extension: String,
  /// Directory name marking library sources; the next component is the module
  pub source_marker: String,
  /// Directory name marking test sources; the next component is the module
  pub test_marker: String,
  /// Package manifest file name, never rewritten
  pub manifest: String,
  /// Build output directory name, never descended into
  pub build_dir: String,
}

impl Default for ScanConfig {
  fn default() -> Self {
    Self {
      extension: "swift".to_string(),
      source_marker: "Sources".to_string(),
      test_marker: "Tests".to_string(),
      manifest: "Package.swift".to_string(),
      build_dir: ".build".to_string(),
    }
  }
}

/// Main configuration struct for relay-headers.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
  pub header: HeaderConfig,
  pub scan: ScanConfig,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// An explicitly requested config file does not exist.
  #[error("Config file '{0}' does not exist")]
  NotFound(PathBuf),

  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A value is present but unusable.
  #[error("Invalid value for '{key}': {message}")]
  InvalidValue { key: &'static str, message: String },
}

impl Config {
  /// Load configuration from a file.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    Self::parse(&content).map_err(|e| match e {
      ConfigError::ParseError { source, .. } => ConfigError::ParseError {
        path: path.to_path_buf(),
        source,
      },
      other => other,
    })
  }

  /// Parse and validate configuration from TOML text.
  pub fn parse(content: &str) -> Result<Self, ConfigError> {
    let config: Config = toml::from_str(content).map_err(|e| ConfigError::ParseError {
      path: PathBuf::new(),
      source: e,
    })?;
    config.validate()?;
    Ok(config)
  }

  /// Validate the configuration.
  ///
  /// Header fields end up inside single comment lines, so none of them may be
  /// empty or span more than one line.
  fn validate(&self) -> Result<(), ConfigError> {
    let single_line_fields = [
      ("header.project", &self.header.project),
      ("header.domain", &self.header.domain),
      ("header.license", &self.header.license),
      ("scan.extension", &self.scan.extension),
      ("scan.source-marker", &self.scan.source_marker),
      ("scan.test-marker", &self.scan.test_marker),
      ("scan.manifest", &self.scan.manifest),
      ("scan.build-dir", &self.scan.build_dir),
    ];

    for (key, value) in single_line_fields {
      if value.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
          key,
          message: "value cannot be empty".to_string(),
        });
      }
      if value.contains(['\n', '\r']) {
        return Err(ConfigError::InvalidValue {
          key,
          message: "value must fit on a single line".to_string(),
        });
      }
    }

    let year = &self.header.copyright_year;
    if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
      return Err(ConfigError::InvalidValue {
        key: "header.copyright-year",
        message: format!("expected a four digit year, got '{year}'"),
      });
    }

    if self.scan.extension.starts_with('.') {
      return Err(ConfigError::InvalidValue {
        key: "scan.extension",
        message: "extension should not include leading dot".to_string(),
      });
    }

    for (key, value) in [
      ("scan.source-marker", &self.scan.source_marker),
      ("scan.test-marker", &self.scan.test_marker),
      ("scan.build-dir", &self.scan.build_dir),
    ] {
      if value.contains(['/', '\\']) {
        return Err(ConfigError::InvalidValue {
          key,
          message: "must be a single path component".to_string(),
        });
      }
    }

    Ok(())
  }
}

/// Discover the configuration file path.
///
/// Lookup order:
/// 1. `--config` (passed as `explicit_path`)
/// 2. `RELAY_HEADERS_CONFIG`
/// 3. `.relay-headers.toml` in the scan root
pub fn discover_config_path(explicit_path: Option<&Path>, root: &Path) -> Result<Option<PathBuf>, ConfigError> {
  if let Some(path) = explicit_path {
    if path.exists() {
      verbose_log!("Using explicit config path: {}", path.display());
      return Ok(Some(path.to_path_buf()));
    }
    return Err(ConfigError::NotFound(path.to_path_buf()));
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Ok(Some(path));
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  let root_config = root.join(DEFAULT_CONFIG_FILENAME);
  if root_config.exists() {
    verbose_log!("Using root config: {}", root_config.display());
    return Ok(Some(root_config));
  }

  verbose_log!("No config file found");
  Ok(None)
}

/// Load configuration from the discovered path, falling back to defaults.
pub fn load_config(explicit_path: Option<&Path>, root: &Path, no_config: bool) -> Result<Config> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(Config::default());
  }

  match discover_config_path(explicit_path, root)? {
    Some(path) => Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display())),
    None => Ok(Config::default()),
  }
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_parse_empty_config_uses_defaults() {
    let config = Config::parse("").expect("empty config should parse");
    assert_eq!(config, Config::default());
    assert_eq!(config.header.project, "Relay");
    assert_eq!(config.scan.extension, "swift");
  }

  #[test]
  fn test_parse_partial_config() {
    let config = Config::parse(concat!(
      "[header]\n",
      "project = \"Beacon\"\n",
      "copyright-year = \"2026\"\n",
      "\n",
      "[scan]\n",
      "extension = \"kt\"\n",
    ))
    .expect("partial config should parse");

    assert_eq!(config.header.project, "Beacon");
    assert_eq!(config.header.copyright_year, "2026");
    assert_eq!(config.header.license, "MIT");
    assert_eq!(config.scan.extension, "kt");
    assert_eq!(config.scan.manifest, "Package.swift");
  }

  #[test]
  fn test_unknown_key_is_rejected() {
    let err = Config::parse("[header]\nauthor = \"me\"\n").expect_err("unknown key should fail");
    assert!(matches!(err, ConfigError::ParseError { .. }));
  }

  #[test]
  fn test_validate_bad_year() {
    let err = Config::parse("[header]\ncopyright-year = \"25\"\n").expect_err("short year should fail");
    assert!(matches!(
      err,
      ConfigError::InvalidValue {
        key: "header.copyright-year",
        ..
      }
    ));
  }

  #[test]
  fn test_validate_multiline_project() {
    let err = Config::parse("[header]\nproject = \"Relay\\nEvil\"\n").expect_err("multi-line should fail");
    assert!(matches!(err, ConfigError::InvalidValue { key: "header.project", .. }));
  }

  #[test]
  fn test_validate_leading_dot_extension() {
    let err = Config::parse("[scan]\nextension = \".swift\"\n").expect_err("leading dot should fail");
    assert!(matches!(err, ConfigError::InvalidValue { key: "scan.extension", .. }));
  }

  #[test]
  fn test_validate_marker_with_separator() {
    let err = Config::parse("[scan]\nsource-marker = \"src/main\"\n").expect_err("nested marker should fail");
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
  }

  #[test]
  fn test_load_config_from_root() {
    let temp_dir = TempDir::new().expect("create temp dir");
    std::fs::write(
      temp_dir.path().join(DEFAULT_CONFIG_FILENAME),
      "[header]\nlicense = \"Apache 2.0\"\n",
    )
    .expect("write config");

    let config = load_config(None, temp_dir.path(), false).expect("load should succeed");
    assert_eq!(config.header.license, "Apache 2.0");
  }

  #[test]
  fn test_no_config_ignores_root_file() {
    let temp_dir = TempDir::new().expect("create temp dir");
    std::fs::write(temp_dir.path().join(DEFAULT_CONFIG_FILENAME), "[header]\nproject = \"X\"\n").expect("write config");

    let config = load_config(None, temp_dir.path(), true).expect("load should succeed");
    assert_eq!(config, Config::default());
  }

  #[test]
  fn test_missing_explicit_config_is_an_error() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let missing = temp_dir.path().join("nope.toml");

    let err = load_config(Some(&missing), temp_dir.path(), false).expect_err("missing file should fail");
    assert!(err.to_string().contains("does not exist"));
  }

  #[test]
  fn test_load_reports_parse_error_with_path() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("bad.toml");
    std::fs::write(&path, "[header\n").expect("write config");

    let err = Config::load(&path).expect_err("invalid toml should fail");
    match err {
      ConfigError::ParseError { path: reported, .. } => assert_eq!(reported, path),
      other => panic!("unexpected error: {other}"),
    }
  }
}
