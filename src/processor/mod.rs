//! # Processor Module
//!
//! This module decides, for one file at a time, whether a license header has
//! to be inserted, refreshed or reported, and performs the change.
//!
//! The module is organized into two submodules:
//! - [`file_io`] - File reading and writing operations
//! - [`content_transformer`] - Content transformation utilities (prefix extraction, year updates)
//!
//! The [`Processor`] struct is the main entry point. It is built once per run
//! and shared read-only by every worker; each [`FileTask`] is handled by
//! exactly one call to [`Processor::run`].

mod content_transformer;
mod file_io;

use std::fs::Permissions;
use std::path::{Path, PathBuf};

pub use content_transformer::ContentTransformer;
pub use file_io::FileIO;
use tracing::{debug, trace};

use crate::comment_style::{BuiltinResolver, CommentStyleResolver};
use crate::config::RunConfig;
use crate::error::HeaderError;
use crate::license_detection::{LicenseDetector, SimpleLicenseDetector};
use crate::templates::{CopyrightData, LicenseTemplate, TemplateStore, render_header};
use crate::years::MissingYear;

/// A file discovered by the enumerator.
#[derive(Debug, Clone)]
pub struct FileTask {
  pub path: PathBuf,
  /// Permission bits at discovery time, re-applied after a write
  pub permissions: Permissions,
}

impl FileTask {
  pub const fn new(path: PathBuf, permissions: Permissions) -> Self {
    Self { path, permissions }
  }

  /// Builds a task from the file's current metadata.
  pub fn from_path(path: impl Into<PathBuf>) -> std::io::Result<Self> {
    let path = path.into();
    let permissions = std::fs::metadata(&path)?.permissions();
    Ok(Self { path, permissions })
  }
}

/// How a file ended up after processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
  /// No comment style is known for the file type
  Unrecognized,
  /// The file already satisfied the run (licensed, generated, or up to date)
  Unchanged,
  /// A header was inserted
  Inserted,
  /// The year of the existing header was refreshed
  Updated,
}

/// The content change decided for a file.
#[derive(Debug, PartialEq, Eq)]
pub enum Change {
  /// Leave the file as it is
  None(FileOutcome),
  /// Replace the file's content with the header inserted
  Insert(Vec<u8>),
  /// Replace the file's content with the year refreshed
  UpdateYear(Vec<u8>),
}

/// Configuration for creating a Processor instance.
pub struct ProcessorConfig {
  pub template: LicenseTemplate,
  pub copyright: CopyrightData,

  // Behavior flags
  pub check_only: bool,
  pub update_years: bool,

  // Optional components
  pub resolver: Option<Box<dyn CommentStyleResolver>>,
  pub license_detector: Option<Box<dyn LicenseDetector>>,
}

impl ProcessorConfig {
  /// Creates a new ProcessorConfig with required fields and sensible defaults.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```ignore
  /// ProcessorConfig {
  ///     check_only: true,
  ///     ..ProcessorConfig::new(template, copyright)
  /// }
  /// ```
  pub const fn new(template: LicenseTemplate, copyright: CopyrightData) -> Self {
    Self {
      template,
      copyright,
      check_only: false,
      update_years: false,
      resolver: None,
      license_detector: None,
    }
  }

  /// Resolves the run's template and carries over its flags.
  ///
  /// # Errors
  ///
  /// Returns the fatal template resolution error, if any.
  pub fn from_run_config(run: &RunConfig) -> Result<Self, HeaderError> {
    let template = TemplateStore::resolve(&run.license, run.template_file.as_deref(), run.spdx)?;

    Ok(Self {
      check_only: run.check_only,
      update_years: run.update_years,
      ..Self::new(template, run.copyright_data())
    })
  }
}

/// Processor for handling license operations on files.
///
/// Holds only read-only state, so one instance can be shared by any number of
/// concurrent workers.
pub struct Processor {
  /// Template rendered for every file
  template: LicenseTemplate,

  /// Values substituted into the template
  copyright: CopyrightData,

  /// Maps paths to comment styles
  resolver: Box<dyn CommentStyleResolver>,

  /// License detector for checking if files have license headers
  license_detector: Box<dyn LicenseDetector>,

  /// Content transformer for prefix extraction and year updates
  content_transformer: ContentTransformer,

  /// Whether to only check for licenses without modifying files
  check_only: bool,

  /// Whether to refresh outdated years in existing headers
  update_years: bool,
}

impl Processor {
  pub fn new(config: ProcessorConfig) -> Self {
    let content_transformer = ContentTransformer::new(config.copyright.year.clone());

    Self {
      template: config.template,
      copyright: config.copyright,
      resolver: config.resolver.unwrap_or_else(|| Box::new(BuiltinResolver)),
      license_detector: config
        .license_detector
        .unwrap_or_else(|| Box::new(SimpleLicenseDetector::new())),
      content_transformer,
      check_only: config.check_only,
      update_years: config.update_years,
    }
  }

  /// The rendered header for `path`, or `None` if its file type is unknown.
  pub fn header_for(&self, path: &Path) -> Option<Vec<u8>> {
    let style = self.resolver.resolve(path)?;
    Some(render_header(&self.template, &self.copyright, &style))
  }

  /// Processes one task in the run's mode.
  ///
  /// Check mode returns the findings as [`HeaderError::MissingLicenseHeader`]
  /// and [`HeaderError::OutdatedLicenseHeader`].
  pub async fn run(&self, task: &FileTask) -> Result<FileOutcome, HeaderError> {
    if self.check_only {
      self.check_file(&task.path).await
    } else {
      self.process_file(task).await
    }
  }

  /// Inserts or refreshes the header of one file.
  pub async fn process_file(&self, task: &FileTask) -> Result<FileOutcome, HeaderError> {
    let Some(header) = self.header_for(&task.path) else {
      trace!("Skipping unrecognized file type: {}", task.path.display());
      return Ok(FileOutcome::Unrecognized);
    };

    let content = FileIO::read(&task.path).await?;

    let (outcome, new_content) = match self.plan_change(&task.path, &header, &content)? {
      Change::None(outcome) => return Ok(outcome),
      Change::Insert(new_content) => (FileOutcome::Inserted, new_content),
      Change::UpdateYear(new_content) => (FileOutcome::Updated, new_content),
    };

    FileIO::write_preserving_permissions(&task.path, &new_content, &task.permissions).await?;
    debug!("{:?}: {}", outcome, task.path.display());
    Ok(outcome)
  }

  /// Decides the change for a file given its rendered header and content.
  ///
  /// This performs no I/O.
  ///
  /// # Errors
  ///
  /// Returns [`HeaderError::UnparsableLicenseYear`] if an outdated header's
  /// year cannot be rewritten.
  pub fn plan_change(&self, path: &Path, header: &[u8], content: &[u8]) -> Result<Change, HeaderError> {
    if self.license_detector.is_generated(content) {
      trace!("Skipping generated file: {}", path.display());
      return Ok(Change::None(FileOutcome::Unchanged));
    }

    if self.license_detector.has_license(content) {
      if !(self.update_years && self.content_transformer.is_outdated(content)) {
        return Ok(Change::None(FileOutcome::Unchanged));
      }

      let updated = self
        .content_transformer
        .update_year(content)
        .map_err(|MissingYear| HeaderError::UnparsableLicenseYear {
          path: path.to_path_buf(),
        })?;

      if updated.as_ref() == content {
        return Ok(Change::None(FileOutcome::Unchanged));
      }
      return Ok(Change::UpdateYear(updated.into_owned()));
    }

    Ok(Change::Insert(self.content_transformer.insert_header(content, header)))
  }

  /// Reports whether one file satisfies the run without modifying it.
  pub async fn check_file(&self, path: &Path) -> Result<FileOutcome, HeaderError> {
    if self.resolver.resolve(path).is_none() {
      trace!("Skipping unrecognized file type: {}", path.display());
      return Ok(FileOutcome::Unrecognized);
    }

    let content = FileIO::read(path).await?;
    self.check_content(path, &content)
  }

  /// Check-mode verdict for content of a recognized file type.
  ///
  /// # Errors
  ///
  /// Returns the finding for a missing or, in update mode, outdated header.
  pub fn check_content(&self, path: &Path, content: &[u8]) -> Result<FileOutcome, HeaderError> {
    if self.license_detector.is_generated(content) {
      return Ok(FileOutcome::Unchanged);
    }

    if !self.license_detector.has_license(content) {
      return Err(HeaderError::MissingLicenseHeader {
        path: path.to_path_buf(),
      });
    }

    if self.update_years && self.content_transformer.is_outdated(content) {
      return Err(HeaderError::OutdatedLicenseHeader {
        path: path.to_path_buf(),
      });
    }

    Ok(FileOutcome::Unchanged)
  }
}
