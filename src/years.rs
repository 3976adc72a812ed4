//! # Years Module
//!
//! Parsing and refreshing the copyright year of an existing license header.
//!
//! Only the first year token inside the header window is considered. A token
//! is either a single year (`2019`) or a range (`2015-2017`). Updating
//! rewrites that one token to `<creation>-<current>` and leaves every other
//! byte untouched.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::bytes::Regex;

use crate::license_detection::header_window;

static YEAR_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?:([0-9]{4})-)?([0-9]{4})").expect("year regex must compile"));

/// The year token found in an existing header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseYearInfo {
  /// First year of the range, or the single year
  pub creation_year: String,
  /// Last year of the range, or the single year
  pub last_modification_year: String,
  /// The matched text, exactly as it appears in the file
  pub raw_matched_text: String,
  /// Byte offset of the match in the file
  offset: usize,
}

impl LicenseYearInfo {
  /// Byte range of the matched token within the file.
  pub const fn span(&self) -> std::ops::Range<usize> {
    self.offset..self.offset + self.raw_matched_text.len()
  }
}

/// Finds the first year or year range in the header window.
pub fn parse_year_info(content: &[u8]) -> Option<LicenseYearInfo> {
  let caps = YEAR_REGEX.captures(header_window(content))?;
  let whole = caps.get(0)?;
  let last = caps.get(2)?;
  let creation = caps.get(1).unwrap_or(last);

  // The pattern only matches ASCII digits and '-'
  let text = |bytes: &[u8]| String::from_utf8_lossy(bytes).into_owned();

  Some(LicenseYearInfo {
    creation_year: text(creation.as_bytes()),
    last_modification_year: text(last.as_bytes()),
    raw_matched_text: text(whole.as_bytes()),
    offset: whole.start(),
  })
}

/// Whether the header's last year differs from `current_year`.
///
/// A header without a year is never outdated.
pub fn is_outdated(content: &[u8], current_year: &str) -> bool {
  parse_year_info(content).is_some_and(|info| info.last_modification_year != current_year)
}

/// Error returned when a header has no year to update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no copyright year found in license header")]
pub struct MissingYear;

/// Rewrites the first year token to `<creation>-<current_year>`.
///
/// Returns the content unchanged (borrowed) when either end of the token
/// already equals `current_year`.
///
/// # Errors
///
/// Returns [`MissingYear`] if the header window contains no year.
pub fn update_year_text<'a>(content: &'a [u8], current_year: &str) -> Result<Cow<'a, [u8]>, MissingYear> {
  let info = parse_year_info(content).ok_or(MissingYear)?;

  if info.creation_year == current_year || info.last_modification_year == current_year {
    return Ok(Cow::Borrowed(content));
  }

  let replacement = format!("{}-{}", info.creation_year, current_year);
  let span = info.span();

  let mut updated = Vec::with_capacity(content.len() + replacement.len());
  updated.extend_from_slice(&content[..span.start]);
  updated.extend_from_slice(replacement.as_bytes());
  updated.extend_from_slice(&content[span.end..]);

  Ok(Cow::Owned(updated))
}
