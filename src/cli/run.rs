//! # Run Command
//!
//! Turns the parsed arguments into a [`RunConfig`] and drives the pipeline.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::Args;
use tracing::debug;

use crate::comment_style::create_resolver;
use crate::config::{RunConfig, load_config};
use crate::logging::{ColorMode, init_tracing};
use crate::output::print_summary;
use crate::pipeline::{self, RunSummary};
use crate::templates::SpdxMode;

/// Arguments for a run
#[derive(Args, Debug)]
pub struct RunArgs {
  /// File or directory patterns to process. Directories are processed
  /// recursively.
  #[arg(required = true, value_name = "PATTERNS")]
  pub patterns: Vec<String>,

  /// Copyright holder
  #[arg(long, short = 'c', value_name = "NAME", default_value = "Google LLC")]
  pub holder: String,

  /// License type: apache, bsd, mit, mpl, or any SPDX identifier with
  /// --spdx=only
  #[arg(long, short = 'l', value_name = "NAME", default_value = "apache")]
  pub license: String,

  /// License template file, used instead of --license
  #[arg(long, short = 'f', value_name = "FILE")]
  pub template_file: Option<PathBuf>,

  /// Copyright year(s) [default: current year]
  #[arg(long, short = 'y', value_name = "YEAR")]
  pub year: Option<String>,

  /// Add SPDX-License-Identifier: "on" appends it to the license text, "only"
  /// uses a short SPDX header instead of the full text
  #[arg(
    long,
    short = 's',
    value_name = "MODE",
    num_args = 0..=1,
    require_equals = true,
    default_value_t = SpdxMode::Off,
    default_missing_value = "on",
    value_enum
  )]
  pub spdx: SpdxMode,

  /// Check only mode: verify presence of license headers and exit with
  /// non-zero code if missing
  #[arg(long)]
  pub check: bool,

  /// Update the year of existing license headers when it is not current
  #[arg(long, short = 'u')]
  pub update: bool,

  /// File patterns to ignore (supports glob patterns)
  #[arg(long, short = 'i', value_name = "GLOB")]
  pub ignore: Vec<String>,

  /// Path to config file (default: .addheader.toml in the current directory)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Increase verbosity (-v lists modified files, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except findings and errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

impl RunArgs {
  /// Builds the immutable run configuration.
  pub fn to_run_config(&self) -> RunConfig {
    let year = self
      .year
      .clone()
      .unwrap_or_else(|| chrono::Local::now().year().to_string());

    RunConfig {
      holder: self.holder.clone(),
      license: self.license.clone(),
      template_file: self.template_file.clone(),
      spdx: self.spdx,
      check_only: self.check,
      update_years: self.update,
      verbose: self.verbose > 0 && !self.quiet,
      ignore_patterns: self.ignore.clone(),
      patterns: self.patterns.clone(),
      ..RunConfig::new(year)
    }
  }
}

/// Run with the given arguments
///
/// # Errors
///
/// Returns an error for problems that stop the run before any file is
/// processed. Per-file failures are part of the returned summary.
pub async fn run_headers(args: RunArgs) -> Result<RunSummary> {
  init_tracing(args.quiet, args.verbose);
  args.colors.apply();

  let current_dir = std::env::current_dir().context("Failed to get current directory")?;
  let file_config = load_config(args.config.as_deref(), &current_dir, args.no_config)?;
  let resolver = create_resolver(file_config);

  let config = Arc::new(args.to_run_config());
  debug!("Run configuration: {:?}", config);

  let summary = pipeline::run(Arc::clone(&config), resolver).await?;

  if config.verbose {
    print_summary(&summary, config.check_only);
  }

  Ok(summary)
}
