//! # Error Module
//!
//! Error kinds produced while resolving templates and processing files.
//!
//! Template resolution errors are fatal to the whole run and are raised before
//! any file is touched. Every other kind is tied to a single file: it is
//! reported with the file path and counted toward the overall verdict, but never
//! stops the remaining files from being processed.

use std::path::PathBuf;

/// Errors raised by template resolution and per-file processing.
#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
  /// The external template file could not be read.
  #[error("license file: {path}: {source}")]
  TemplateFileNotFound { path: PathBuf, source: std::io::Error },

  /// The requested license is not one of the built-in templates.
  #[error("unknown license: \"{0}\". Include the '-s' flag to request SPDX style headers using this license")]
  UnknownLicenseName(String),

  /// The template text is not a valid template.
  #[error("invalid license template: {message}")]
  TemplateParse { message: String },

  /// The file could not be read.
  #[error("failed to read file: {source}")]
  Read { path: PathBuf, source: std::io::Error },

  /// The file could not be written.
  #[error("failed to write file: {source}")]
  Write { path: PathBuf, source: std::io::Error },

  /// The existing header has no year that could be updated.
  #[error("no copyright year found in existing license header")]
  UnparsableLicenseYear { path: PathBuf },

  /// Check mode: a recognized file has no license header.
  #[error("missing license header")]
  MissingLicenseHeader { path: PathBuf },

  /// Check mode with year updates: the header's last year is not the current one.
  #[error("outdated license year")]
  OutdatedLicenseHeader { path: PathBuf },
}

impl HeaderError {
  pub(crate) fn template_parse(message: impl Into<String>) -> Self {
    Self::TemplateParse {
      message: message.into(),
    }
  }

  /// Whether this error is a check-mode finding rather than an I/O failure.
  pub const fn is_finding(&self) -> bool {
    matches!(self, Self::MissingLicenseHeader { .. } | Self::OutdatedLicenseHeader { .. })
  }
}
