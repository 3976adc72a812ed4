//! # Pipeline Module
//!
//! Drives a run: the walker feeds discovered files through a bounded channel,
//! every received task is processed on its own tokio task, and the results are
//! folded into one [`RunSummary`].
//!
//! Per-file failures are reported and counted but never stop other files from
//! being processed. The summary is only computed after every dispatched task
//! has finished.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error};

use crate::comment_style::CommentStyleResolver;
use crate::config::RunConfig;
use crate::error::HeaderError;
use crate::output;
use crate::processor::{FileOutcome, FileTask, Processor, ProcessorConfig};
use crate::walker::FileWalker;

/// Number of discovered files that may wait for a worker.
pub const CHANNEL_CAPACITY: usize = 1000;

/// Counts of file outcomes for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
  pub inserted: usize,
  pub updated: usize,
  pub unchanged: usize,
  /// Files of an unrecognized type
  pub skipped: usize,
  /// Files with an I/O error or a check-mode finding
  pub failed: usize,
}

impl RunSummary {
  /// Counts one successful outcome.
  pub const fn record(&mut self, outcome: FileOutcome) {
    match outcome {
      FileOutcome::Inserted => self.inserted += 1,
      FileOutcome::Updated => self.updated += 1,
      FileOutcome::Unchanged => self.unchanged += 1,
      FileOutcome::Unrecognized => self.skipped += 1,
    }
  }

  /// Counts one failed file.
  pub const fn record_failure(&mut self) {
    self.failed += 1;
  }

  /// Number of files seen.
  pub const fn total(&self) -> usize {
    self.inserted + self.updated + self.unchanged + self.skipped + self.failed
  }

  /// Whether no file failed.
  pub const fn is_success(&self) -> bool {
    self.failed == 0
  }
}

/// Consumes file tasks and aggregates their outcomes.
pub struct Pipeline {
  processor: Arc<Processor>,
  verbose: bool,
}

impl Pipeline {
  pub const fn new(processor: Arc<Processor>, verbose: bool) -> Self {
    Self { processor, verbose }
  }

  /// Processes every task received until the sender side closes.
  ///
  /// Each task is spawned as soon as it arrives; finished workers are reaped
  /// while receiving so results are reported as they come in.
  pub async fn run(&self, mut receiver: mpsc::Receiver<FileTask>) -> RunSummary {
    let mut workers = JoinSet::new();
    let mut summary = RunSummary::default();

    loop {
      tokio::select! {
        Some(joined) = workers.join_next(), if !workers.is_empty() => {
          self.record(&mut summary, joined);
        }
        task = receiver.recv() => {
          let Some(task) = task else { break };
          let processor = Arc::clone(&self.processor);
          workers.spawn(async move {
            let result = processor.run(&task).await;
            (task.path, result)
          });
        }
      }
    }

    while let Some(joined) = workers.join_next().await {
      self.record(&mut summary, joined);
    }

    debug!("Run finished: {:?}", summary);
    summary
  }

  /// Processes a fixed list of tasks.
  pub async fn run_tasks(&self, tasks: Vec<FileTask>) -> RunSummary {
    let (sender, receiver) = mpsc::channel(CHANNEL_CAPACITY);
    let feeder = tokio::spawn(async move {
      for task in tasks {
        if sender.send(task).await.is_err() {
          break;
        }
      }
    });

    let summary = self.run(receiver).await;
    if let Err(e) = feeder.await {
      error!("Task feeder failed: {}", e);
    }
    summary
  }

  fn record(
    &self,
    summary: &mut RunSummary,
    joined: Result<(PathBuf, Result<FileOutcome, HeaderError>), JoinError>,
  ) {
    match joined {
      Ok((path, Ok(outcome))) => {
        if self.verbose {
          output::print_modified(&path, outcome);
        }
        summary.record(outcome);
      }
      Ok((path, Err(err))) => {
        if err.is_finding() {
          output::print_finding(&path, &err);
        } else {
          output::print_file_error(&path, &err);
        }
        summary.record_failure();
      }
      Err(e) => {
        error!("Worker failed: {}", e);
        summary.record_failure();
      }
    }
  }
}

/// Runs the whole configuration: resolves the template, walks the patterns,
/// and processes every file found.
///
/// # Errors
///
/// Returns an error only for problems that stop the run before any file is
/// processed: template resolution and invalid ignore patterns.
pub async fn run(config: Arc<RunConfig>, resolver: Box<dyn CommentStyleResolver>) -> Result<RunSummary> {
  let processor = Processor::new(ProcessorConfig {
    resolver: Some(resolver),
    ..ProcessorConfig::from_run_config(&config)?
  });
  let walker = FileWalker::new(config.patterns.clone(), &config.ignore_patterns)?;

  let (sender, receiver) = mpsc::channel(CHANNEL_CAPACITY);
  let enumerator = walker.spawn(sender);

  let pipeline = Pipeline::new(Arc::new(processor), config.verbose);
  let summary = pipeline.run(receiver).await;

  if let Err(e) = enumerator.await {
    error!("File enumeration failed: {}", e);
  }

  Ok(summary)
}
