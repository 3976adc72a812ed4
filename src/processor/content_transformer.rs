//! # Content Transformer Module
//!
//! This module provides utilities for transforming file content,
//! including keeping special first lines (shebangs, XML declarations, etc.)
//! above an inserted header and refreshing copyright years in existing headers.

use std::borrow::Cow;

use crate::years::{self, MissingYear};

/// First-line markers that must stay above the license header, lowercase.
const PRESERVED_PREFIXES: &[&[u8]] = &[
  b"#!",                       // shebang
  b"<?xml",                    // XML declaration
  b"<!doctype",                // HTML doctype
  b"# encoding:",              // Ruby encoding
  b"# frozen_string_literal:", // Ruby interpreter instruction
  b"<?php",                    // PHP opening tag
  b"# escape",                 // Dockerfile directive
  b"# syntax",                 // Dockerfile directive
];

/// Content transformation utilities for license processing.
pub struct ContentTransformer {
  /// The year headers are brought up to
  current_year: String,
}

impl ContentTransformer {
  pub const fn new(current_year: String) -> Self {
    Self { current_year }
  }

  /// Splits off a first line that has to stay at the top of the file.
  ///
  /// Returns the line (including its newline, if any) and the remaining
  /// content. The line is empty when the file does not start with one of the
  /// preserved markers.
  pub fn extract_prefix<'a>(&self, content: &'a [u8]) -> (&'a [u8], &'a [u8]) {
    let line_end = content
      .iter()
      .position(|&b| b == b'\n')
      .map_or(content.len(), |newline| newline + 1);
    let first_line = content[..line_end].to_ascii_lowercase();

    if PRESERVED_PREFIXES.iter().any(|prefix| first_line.starts_with(prefix)) {
      content.split_at(line_end)
    } else {
      (&[], content)
    }
  }

  /// Inserts `header` at the top of `content`, below any preserved first line.
  pub fn insert_header(&self, content: &[u8], header: &[u8]) -> Vec<u8> {
    let (prefix, rest) = self.extract_prefix(content);

    let mut result = Vec::with_capacity(prefix.len() + 1 + header.len() + rest.len());
    if !prefix.is_empty() {
      result.extend_from_slice(prefix);
      if !prefix.ends_with(b"\n") {
        result.push(b'\n');
      }
    }
    result.extend_from_slice(header);
    result.extend_from_slice(rest);
    result
  }

  /// Refreshes the first copyright year of an existing header.
  pub fn update_year<'a>(&self, content: &'a [u8]) -> Result<Cow<'a, [u8]>, MissingYear> {
    years::update_year_text(content, &self.current_year)
  }

  /// Whether the existing header's year trails the current year.
  pub fn is_outdated(&self, content: &[u8]) -> bool {
    years::is_outdated(content, &self.current_year)
  }
}
