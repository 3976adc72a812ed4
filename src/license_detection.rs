//! # License Detection Module
//!
//! This module contains the interfaces and implementations for license detection algorithms.
//! It allows for easily replacing the license detection algorithm without modifying the processor.

use std::sync::LazyLock;

use regex::bytes::Regex;

/// Number of leading bytes inspected when looking for a license header.
pub const HEADER_SCAN_LIMIT: usize = 1000;

/// Lowercase markers whose presence in the file head means it is licensed.
const LICENSE_MARKERS: &[&[u8]] = &[b"copyright", b"mozilla public", b"spdx-license-identifier"];

static GO_GENERATED: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?m)^.{1,2} Code generated .* DO NOT EDIT\.$").expect("generated regex must compile"));

static CARGO_RAZE_GENERATED: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?m)^DO NOT EDIT! Replaced on runs of cargo-raze$").expect("cargo-raze regex must compile")
});

/// Returns the part of `content` that header detection looks at.
pub fn header_window(content: &[u8]) -> &[u8] {
  &content[..content.len().min(HEADER_SCAN_LIMIT)]
}

/// Trait for license detectors.
///
/// Implementations decide whether a file already carries a license header and
/// whether it was produced by a code generator.
pub trait LicenseDetector: Send + Sync {
  /// Checks if the content already has a license header.
  fn has_license(&self, content: &[u8]) -> bool;

  /// Checks if the content was produced by a code generator.
  fn is_generated(&self, content: &[u8]) -> bool;
}

/// Default implementation of license detection.
///
/// A file is licensed when its first 1000 bytes contain, ignoring ASCII case,
/// "copyright", "mozilla public" or "spdx-license-identifier". A file is
/// generated when any line reads `<1-2 chars> Code generated ... DO NOT EDIT.`
/// or `DO NOT EDIT! Replaced on runs of cargo-raze`.
#[derive(Debug, Default)]
pub struct SimpleLicenseDetector;

impl SimpleLicenseDetector {
  pub const fn new() -> Self {
    SimpleLicenseDetector
  }
}

impl LicenseDetector for SimpleLicenseDetector {
  fn has_license(&self, content: &[u8]) -> bool {
    let head = header_window(content).to_ascii_lowercase();
    LICENSE_MARKERS
      .iter()
      .any(|marker| head.windows(marker.len()).any(|window| window == *marker))
  }

  fn is_generated(&self, content: &[u8]) -> bool {
    GO_GENERATED.is_match(content) || CARGO_RAZE_GENERATED.is_match(content)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_has_license_markers() {
    let detector = SimpleLicenseDetector::new();

    assert!(detector.has_license(b"Copyright 2000"));
    assert!(detector.has_license(b"// COPYRIGHT (c) 2024 Test Company\n\nfn main() {}"));
    assert!(detector.has_license(b"SPDX-License-Identifier: MIT"));
    assert!(detector.has_license(b"# This Source Code Form is subject to the terms of the Mozilla Public\n"));
    assert!(!detector.has_license(b"SPDX: MIT"));
    assert!(!detector.has_license(b"fn main() {\n    println!(\"No license in this code\");\n}"));
    assert!(!detector.has_license(b""));
  }

  #[test]
  fn test_has_license_only_scans_file_head() {
    let detector = SimpleLicenseDetector::new();

    let mut late = vec![b'x'; HEADER_SCAN_LIMIT];
    late.extend_from_slice(b"Copyright 2020");
    assert!(!detector.has_license(&late));

    // A marker ending exactly at the limit is still seen
    let mut edge = vec![b'x'; HEADER_SCAN_LIMIT - "copyright".len()];
    edge.extend_from_slice(b"copyright");
    assert!(detector.has_license(&edge));

    // Straddling the limit is not
    let mut straddle = vec![b'x'; HEADER_SCAN_LIMIT - 4];
    straddle.extend_from_slice(b"copyright");
    assert!(!detector.has_license(&straddle));
  }

  #[test]
  fn test_has_license_tolerates_invalid_utf8() {
    let detector = SimpleLicenseDetector::new();
    assert!(detector.has_license(b"\xff\xfe// Copyright (c) 2024 Test\n"));
    assert!(!detector.has_license(b"\xff\xfe\x00\x01binary"));
  }

  #[test]
  fn test_is_generated() {
    let detector = SimpleLicenseDetector::new();

    assert!(detector.is_generated(b"package x\n// Code generated by protoc-gen-go. DO NOT EDIT.\n"));
    assert!(detector.is_generated(b"# Code generated by tool DO NOT EDIT.\nx = 1\n"));
    assert!(detector.is_generated(
      b"\"\"\"\n@generated\nDO NOT EDIT! Replaced on runs of cargo-raze\n\"\"\"\n"
    ));

    // Needs the exact trailing period and at most two leading characters
    assert!(!detector.is_generated(b"// Code generated by tool. DO NOT EDIT\n"));
    assert!(!detector.is_generated(b"/// Code generated by tool DO NOT EDIT.\n"));
    assert!(!detector.is_generated(b"fn main() {}\n"));
  }

  #[test]
  fn test_is_generated_scans_whole_file() {
    let detector = SimpleLicenseDetector::new();
    let mut content = vec![b'\n'; 5000];
    content.extend_from_slice(b"// Code generated by mockgen. DO NOT EDIT.\n");
    assert!(detector.is_generated(&content));
  }
}
