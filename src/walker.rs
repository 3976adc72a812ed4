//! # Walker Module
//!
//! Expands the command-line patterns into the stream of [`FileTask`]s consumed
//! by the pipeline.
//!
//! Each pattern is walked recursively without following symlinks. A pattern
//! that does not exist but contains glob metacharacters is expanded first.
//! Paths matching an ignore pattern are skipped, and ignored directories are
//! not descended into.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::{MatchOptions, Pattern};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

use crate::processor::FileTask;

/// `*` stops at `/`, `**` crosses it.
const IGNORE_MATCH_OPTIONS: MatchOptions = MatchOptions {
  case_sensitive: true,
  require_literal_separator: true,
  require_literal_leading_dot: false,
};

/// Recursive file enumerator honoring ignore patterns.
#[derive(Debug, Clone)]
pub struct FileWalker {
  patterns: Vec<String>,
  ignore: Vec<Pattern>,
}

impl FileWalker {
  /// Creates a walker for `patterns`, skipping paths matching `ignore_patterns`.
  ///
  /// # Errors
  ///
  /// Returns an error if an ignore pattern is not a valid glob.
  pub fn new(patterns: Vec<String>, ignore_patterns: &[String]) -> Result<Self> {
    let ignore = ignore_patterns
      .iter()
      .map(|pattern| Pattern::new(pattern).with_context(|| format!("Invalid ignore pattern: {}", pattern)))
      .collect::<Result<Vec<_>>>()?;

    Ok(Self { patterns, ignore })
  }

  /// Whether `path` matches one of the ignore patterns.
  pub fn is_ignored(&self, path: &Path) -> bool {
    if self.ignore.is_empty() {
      return false;
    }

    let text = path.to_string_lossy().replace('\\', "/");
    let text = text.strip_prefix("./").unwrap_or(&text);
    self
      .ignore
      .iter()
      .any(|pattern| pattern.matches_with(text, IGNORE_MATCH_OPTIONS))
  }

  /// The roots to walk, with glob patterns expanded.
  fn roots(&self) -> Vec<PathBuf> {
    let mut roots = Vec::with_capacity(self.patterns.len());

    for pattern in &self.patterns {
      let path = Path::new(pattern);
      if path.exists() || !pattern.contains(['*', '?', '[']) {
        roots.push(path.to_path_buf());
        continue;
      }

      match glob::glob(pattern) {
        Ok(paths) => {
          let before = roots.len();
          for entry in paths {
            match entry {
              Ok(path) => roots.push(path),
              Err(e) => warn!("{}: {}", e.path().display(), e.error()),
            }
          }
          if roots.len() == before {
            warn!("{}: no files matched", pattern);
          }
        }
        Err(e) => warn!("{}: invalid pattern: {}", pattern, e),
      }
    }

    roots
  }

  /// Walks every root, handing each regular file to `emit`.
  ///
  /// Stops early when `emit` returns `false`. Returns the number of files
  /// emitted.
  pub fn walk(&self, mut emit: impl FnMut(FileTask) -> bool) -> usize {
    let mut emitted = 0;

    for root in self.roots() {
      debug!("Scanning: {}", root.display());

      let entries = WalkDir::new(&root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| {
          let ignored = self.is_ignored(entry.path());
          if ignored {
            trace!("Ignoring: {}", entry.path().display());
          }
          !ignored
        });

      for entry in entries {
        let entry = match entry {
          Ok(entry) => entry,
          Err(e) => {
            let path = e.path().unwrap_or(root.as_path()).display().to_string();
            warn!("{}: {}", path, e);
            continue;
          }
        };

        if !entry.file_type().is_file() {
          continue;
        }

        let permissions = match entry.metadata() {
          Ok(metadata) => metadata.permissions(),
          Err(e) => {
            warn!("{}: {}", entry.path().display(), e);
            continue;
          }
        };

        if !emit(FileTask::new(entry.into_path(), permissions)) {
          return emitted;
        }
        emitted += 1;
      }
    }

    emitted
  }

  /// Collects every task up front.
  pub fn collect(&self) -> Vec<FileTask> {
    let mut tasks = Vec::new();
    self.walk(|task| {
      tasks.push(task);
      true
    });
    tasks
  }

  /// Walks on a blocking thread, feeding `sender` until the walk ends or the
  /// receiver goes away.
  pub fn spawn(self, sender: mpsc::Sender<FileTask>) -> JoinHandle<usize> {
    tokio::task::spawn_blocking(move || {
      let emitted = self.walk(|task| sender.blocking_send(task).is_ok());
      debug!("Enumerated {} files", emitted);
      emitted
    })
  }
}
