//! # Configuration Module
//!
//! Two kinds of configuration live here:
//!
//! - [`RunConfig`], the immutable settings for one run, built once at startup
//!   and shared by every worker.
//! - [`Config`], optional comment-style overrides loaded from a
//!   `.addheader.toml` file or the `ADDHEADER_CONFIG` environment variable.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::templates::{CopyrightData, SpdxMode};

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".addheader.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "ADDHEADER_CONFIG";

/// Settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
  /// Copyright holder
  pub holder: String,
  /// License name: a built-in license, or any SPDX identifier in SPDX-only mode
  pub license: String,
  /// Template file used instead of a built-in license
  pub template_file: Option<PathBuf>,
  /// Copyright year(s), free-form
  pub year: String,
  /// SPDX identifier handling
  pub spdx: SpdxMode,
  /// Report missing headers instead of inserting them
  pub check_only: bool,
  /// Refresh outdated years in existing headers
  pub update_years: bool,
  /// Report every modified file
  pub verbose: bool,
  /// Glob patterns of paths to skip
  pub ignore_patterns: Vec<String>,
  /// Files and directories to scan
  pub patterns: Vec<String>,
}

impl RunConfig {
  /// Creates a configuration with the command-line defaults for everything
  /// except the year.
  pub fn new(year: impl Into<String>) -> Self {
    Self {
      holder: "Google LLC".to_string(),
      license: "apache".to_string(),
      template_file: None,
      year: year.into(),
      spdx: SpdxMode::Off,
      check_only: false,
      update_years: false,
      verbose: false,
      ignore_patterns: Vec::new(),
      patterns: Vec::new(),
    }
  }

  /// The values substituted into the license template.
  pub fn copyright_data(&self) -> CopyrightData {
    CopyrightData {
      year: self.year.clone(),
      holder: self.holder.clone(),
      spdx_id: self.license.clone(),
    }
  }
}

/// User-defined comment style configuration.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CommentStyleConfig {
  /// The string to use at the top of a comment block (e.g., "/*").
  /// Optional for line-style comments.
  #[serde(default)]
  pub top: String,

  /// The string to use at the beginning of each line in the comment block
  /// (e.g., " * " or "// ").
  pub middle: String,

  /// The string to use at the bottom of a comment block (e.g., " */").
  /// Optional for line-style comments.
  #[serde(default)]
  pub bottom: String,
}

impl CommentStyleConfig {
  /// Create a new line-comment style (no top/bottom markers).
  pub fn line(prefix: &str) -> Self {
    Self {
      top: String::new(),
      middle: prefix.to_string(),
      bottom: String::new(),
    }
  }
}

/// Comment-style overrides loaded from a config file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
  /// Custom comment styles for file extensions.
  /// Keys are file extensions without the leading dot (e.g., "java", "xyz").
  #[serde(default, rename = "comment-styles")]
  pub comment_styles: HashMap<String, CommentStyleConfig>,

  /// Filename-specific comment style overrides.
  /// Keys are exact filenames or glob patterns (e.g., "Justfile",
  /// "*.cmake.in"). Glob keys are tried in sorted order.
  #[serde(default)]
  pub filenames: BTreeMap<String, CommentStyleConfig>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A comment style configuration is invalid.
  #[error("Invalid comment style for '{extension}': {message}")]
  InvalidCommentStyle { extension: String, message: String },
}

impl Config {
  /// Load configuration from a file.
  ///
  /// Keys are lowercased so lookups are case-insensitive.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    debug!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;
    let config = config.normalize();

    debug!(
      "Loaded {} extension and {} filename overrides",
      config.comment_styles.len(),
      config.filenames.len()
    );

    Ok(config)
  }

  fn validate(&self) -> Result<(), ConfigError> {
    for (ext, style) in &self.comment_styles {
      if style.middle.is_empty() {
        return Err(ConfigError::InvalidCommentStyle {
          extension: ext.clone(),
          message: "middle field cannot be empty".to_string(),
        });
      }

      if ext.starts_with('.') {
        return Err(ConfigError::InvalidCommentStyle {
          extension: ext.clone(),
          message: "extension should not include leading dot".to_string(),
        });
      }
    }

    for (filename, style) in &self.filenames {
      if style.middle.is_empty() {
        return Err(ConfigError::InvalidCommentStyle {
          extension: filename.clone(),
          message: "middle field cannot be empty".to_string(),
        });
      }
    }

    Ok(())
  }

  /// Check if the configuration has any comment style overrides.
  pub fn has_overrides(&self) -> bool {
    !self.comment_styles.is_empty() || !self.filenames.is_empty()
  }

  fn normalize(self) -> Self {
    let comment_styles = self
      .comment_styles
      .into_iter()
      .map(|(k, v)| (k.to_lowercase(), v))
      .collect();

    let filenames = self.filenames.into_iter().map(|(k, v)| (k.to_lowercase(), v)).collect();

    Self {
      comment_styles,
      filenames,
    }
  }
}

/// Discover the configuration file path.
///
/// In order of precedence: the explicit `--config` path, the
/// `ADDHEADER_CONFIG` environment variable, then `.addheader.toml` in
/// `search_dir`.
pub fn discover_config_path(explicit_path: Option<&Path>, search_dir: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    // An explicit path is returned even when missing so loading reports it.
    return Some(path.to_path_buf());
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      debug!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    debug!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  let local_config = search_dir.join(DEFAULT_CONFIG_FILENAME);
  if local_config.exists() {
    debug!("Using config: {}", local_config.display());
    return Some(local_config);
  }

  debug!("No config file found");
  None
}

/// Load the optional configuration file.
pub fn load_config(explicit_path: Option<&Path>, search_dir: &Path, no_config: bool) -> Result<Option<Config>> {
  if no_config {
    debug!("Config file discovery disabled (--no-config)");
    return Ok(None);
  }

  match discover_config_path(explicit_path, search_dir) {
    Some(path) => {
      let config = Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))?;
      Ok(Some(config))
    }
    None => Ok(None),
  }
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_parse_valid_config() {
    let config_content = concat!(
      "[comment-styles]\n",
      "java = { middle = \"// \" }\n",
      "xyz = { top = \"/*\", middle = \" * \", bottom = \" */\" }\n",
      "\n",
      "[filenames]\n",
      "\"Justfile\" = { middle = \"# \" }\n",
    );

    let config: Config = toml::from_str(config_content).expect("valid config should parse");

    assert_eq!(config.comment_styles.len(), 2);
    assert_eq!(config.filenames.len(), 1);

    let xyz_style = config.comment_styles.get("xyz").expect("xyz should exist");
    assert_eq!(xyz_style.top, "/*");
    assert_eq!(xyz_style.middle, " * ");
    assert_eq!(xyz_style.bottom, " */");
  }

  #[test]
  fn test_validate_rejects_empty_middle_and_leading_dot() {
    let mut config = Config::default();
    config.comment_styles.insert(
      "bad".to_string(),
      CommentStyleConfig {
        top: String::new(),
        middle: String::new(),
        bottom: String::new(),
      },
    );
    assert!(matches!(
      config.validate(),
      Err(ConfigError::InvalidCommentStyle { .. })
    ));

    let mut config = Config::default();
    config
      .comment_styles
      .insert(".bad".to_string(), CommentStyleConfig::line("// "));
    assert!(matches!(
      config.validate(),
      Err(ConfigError::InvalidCommentStyle { .. })
    ));
  }

  #[test]
  fn test_load_normalizes_keys_to_lowercase() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);
    std::fs::write(
      &config_path,
      concat!(
        "[comment-styles]\n",
        "RS = { middle = \"// \" }\n",
        "\n",
        "[filenames]\n",
        "\"CMakeLists.txt\" = { middle = \"# \" }\n",
      ),
    )
    .expect("write config");

    let config = Config::load(&config_path).expect("load should succeed");
    assert!(config.comment_styles.contains_key("rs"));
    assert!(config.filenames.contains_key("cmakelists.txt"));
    assert!(config.has_overrides());
  }

  #[test]
  fn test_load_config_file_not_found() {
    let result = Config::load(Path::new("/nonexistent/path/.addheader.toml"));
    assert!(matches!(result, Err(ConfigError::ReadError { .. })));
  }

  #[test]
  fn test_load_config_invalid_toml() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);
    std::fs::write(&config_path, "[comment-styles\n").expect("write config");

    assert!(matches!(
      Config::load(&config_path),
      Err(ConfigError::ParseError { .. })
    ));
  }

  #[test]
  fn test_discover_config_in_search_dir() {
    let temp_dir = TempDir::new().expect("create temp dir");
    assert!(load_config(None, temp_dir.path(), false).expect("no config").is_none());

    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);
    std::fs::write(&config_path, "").expect("write config");

    let explicit = temp_dir.path().join("other.toml");
    assert_eq!(discover_config_path(Some(&explicit), temp_dir.path()), Some(explicit));
    assert!(load_config(None, temp_dir.path(), true).expect("disabled").is_none());
  }

  #[test]
  fn test_copyright_data_uses_license_as_spdx_id() {
    let mut config = RunConfig::new("2021");
    config.holder = "Acme & Co".to_string();
    config.license = "MPL-2.0".to_string();

    let data = config.copyright_data();
    assert_eq!(data.year, "2021");
    assert_eq!(data.holder, "Acme & Co");
    assert_eq!(data.spdx_id, "MPL-2.0");
  }
}
