//! # Output Module
//!
//! This module centralizes all user-facing output for the addheader tool.
//!
//! ## Design Goals
//!
//! - **Scriptable**: stdout carries only check-mode findings, one per line
//! - **Progressive**: modified files and a summary with `-v`
//! - **Isolated**: per-file errors go to stderr prefixed with their path

use std::fmt::Display;
use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::error::HeaderError;
use crate::pipeline::RunSummary;
use crate::processor::FileOutcome;

/// Format a check-mode finding: the bare path for a missing header, the path
/// and a note for an outdated year.
pub fn format_finding(path: &Path, finding: &HeaderError) -> String {
  match finding {
    HeaderError::OutdatedLicenseHeader { .. } => format!("{}: outdated license year", path.display()),
    _ => path.display().to_string(),
  }
}

/// Print a check-mode finding (stdout).
pub fn print_finding(path: &Path, finding: &HeaderError) {
  println!("{}", format_finding(path, finding));
}

/// Print a per-file error (stderr).
pub fn print_file_error(path: &Path, error: &HeaderError) {
  eprintln!(
    "{}: {}",
    path.display(),
    error.if_supports_color(Stream::Stderr, |e| e.red())
  );
}

/// Print how a file was modified (stderr). Unmodified files print nothing.
pub fn print_modified(path: &Path, outcome: FileOutcome) {
  let action = match outcome {
    FileOutcome::Inserted => "added license",
    FileOutcome::Updated => "updated license year",
    FileOutcome::Unchanged | FileOutcome::Unrecognized => return,
  };

  eprintln!(
    "{} {}",
    path.display(),
    action.if_supports_color(Stream::Stderr, |a| a.green())
  );
}

/// Print an error that aborts the run (stderr).
pub fn print_fatal(error: impl Display) {
  eprintln!("{} {}", "ERROR:".if_supports_color(Stream::Stderr, |s| s.red()), error);
}

/// Format the one-line run summary.
pub fn format_summary(summary: &RunSummary, check_only: bool) -> String {
  let mut parts = Vec::with_capacity(5);

  if !check_only {
    parts.push(format!("{} inserted", summary.inserted));
    parts.push(format!("{} updated", summary.updated));
  }
  parts.push(format!("{} unchanged", summary.unchanged));
  parts.push(format!("{} skipped", summary.skipped));
  parts.push(format!("{} failed", summary.failed));

  let files = summary.total();
  format!(
    "{} {} {}: {}",
    if check_only { "Checked" } else { "Processed" },
    files,
    if files == 1 { "file" } else { "files" },
    parts.join(", ")
  )
}

/// Print the run summary (stderr).
pub fn print_summary(summary: &RunSummary, check_only: bool) {
  let line = format_summary(summary, check_only);
  if summary.is_success() {
    eprintln!("{}", line.if_supports_color(Stream::Stderr, |l| l.dimmed()));
  } else {
    eprintln!("{}", line.if_supports_color(Stream::Stderr, |l| l.yellow()));
  }
}
