//! # Templates Module
//!
//! This module resolves the license template for a run and renders it into the
//! exact header bytes for a given comment style.
//!
//! The module includes:
//! - [`TemplateStore`] for resolving a license name or template file to a
//!   parsed [`LicenseTemplate`]
//! - [`CopyrightData`] for the values substituted into every template
//! - [`render_header`] and [`format_with_comment_style`] for wrapping rendered
//!   text in comment delimiters
//!
//! ## Example
//!
//! ```rust
//! use addheader::comment_style::CommentStyle;
//! use addheader::templates::{CopyrightData, SpdxMode, TemplateStore, render_header};
//!
//! # fn main() -> anyhow::Result<()> {
//! let template = TemplateStore::resolve("mit", None, SpdxMode::Only)?;
//! let data = CopyrightData {
//!   year: "2025".to_string(),
//!   holder: "Acme".to_string(),
//!   spdx_id: "MIT".to_string(),
//! };
//!
//! let header = render_header(&template, &data, &CommentStyle::line("// "));
//! assert_eq!(header, b"// Copyright 2025 Acme\n// SPDX-License-Identifier: MIT\n\n");
//! # Ok(())
//! # }
//! ```

mod builtin;
mod engine;

use std::path::Path;

use clap::ValueEnum;
pub use engine::LicenseTemplate;
use tracing::debug;

use crate::comment_style::CommentStyle;
use crate::error::HeaderError;

/// Data used to fill out a license template.
///
/// `year` is free-form text: a single year, a range, or a list such as
/// `2015-2017,2019`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyrightData {
  /// Copyright year(s)
  pub year: String,
  /// Name of the copyright holder
  pub holder: String,
  /// SPDX license identifier
  pub spdx_id: String,
}

/// Whether SPDX identifiers are added to the header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SpdxMode {
  /// Use the license body as is
  #[default]
  Off,
  /// Append an SPDX-License-Identifier line to the license body
  On,
  /// Replace the license body with a short SPDX header
  Only,
}

/// Resolves license names and template files to parsed templates.
pub struct TemplateStore;

impl TemplateStore {
  /// Returns the raw template text for a license name or template file.
  ///
  /// In [`SpdxMode::Only`] the SPDX-only template is returned without looking
  /// at `license` or `template_file`. Otherwise a non-empty `template_file`
  /// wins over `license`, which is looked up among the built-in licenses,
  /// ignoring case.
  ///
  /// # Errors
  ///
  /// - [`HeaderError::TemplateFileNotFound`] if the template file cannot be read
  /// - [`HeaderError::UnknownLicenseName`] if the license is not built in
  pub fn fetch(license: &str, template_file: Option<&Path>, spdx: SpdxMode) -> Result<String, HeaderError> {
    if spdx == SpdxMode::Only {
      return Ok(builtin::SPDX_ONLY.to_string());
    }

    let body = match template_file.filter(|path| !path.as_os_str().is_empty()) {
      Some(path) => {
        debug!("Loading template from: {}", path.display());
        std::fs::read_to_string(path).map_err(|source| HeaderError::TemplateFileNotFound {
          path: path.to_path_buf(),
          source,
        })?
      }
      None => builtin::lookup(license)
        .ok_or_else(|| HeaderError::UnknownLicenseName(license.to_string()))?
        .to_string(),
    };

    Ok(match spdx {
      SpdxMode::On => body + builtin::SPDX_SUFFIX,
      SpdxMode::Off | SpdxMode::Only => body,
    })
  }

  /// Fetches and parses the template for this run.
  ///
  /// # Errors
  ///
  /// Any error from [`TemplateStore::fetch`], or
  /// [`HeaderError::TemplateParse`] if the text is not a valid template.
  pub fn resolve(license: &str, template_file: Option<&Path>, spdx: SpdxMode) -> Result<LicenseTemplate, HeaderError> {
    let text = Self::fetch(license, template_file, spdx)?;
    LicenseTemplate::parse(&text)
  }
}

/// Renders `template` with `data` and wraps the result in `style`.
///
/// This is a pure function of its inputs.
pub fn render_header(template: &LicenseTemplate, data: &CopyrightData, style: &CommentStyle) -> Vec<u8> {
  format_with_comment_style(&template.execute(data), style).into_bytes()
}

/// Formats license text with the given comment style.
///
/// The top and bottom markers get their own line when non-empty, every line of
/// the text is prefixed with the middle marker and stripped of trailing
/// whitespace, and the result always ends with one blank line.
pub fn format_with_comment_style(license_text: &str, style: &CommentStyle) -> String {
  let mut result = String::with_capacity(license_text.len() + 64);

  if !style.top.is_empty() {
    result.push_str(&style.top);
    result.push('\n');
  }

  for line in license_text.lines() {
    let start = result.len();
    result.push_str(&style.middle);
    result.push_str(line);
    let trimmed = result[start..].trim_end().len();
    result.truncate(start + trimmed);
    result.push('\n');
  }

  if !style.bottom.is_empty() {
    result.push_str(&style.bottom);
    result.push('\n');
  }

  result.push('\n');
  result
}
