//! # File I/O Module
//!
//! This module provides file reading and writing utilities for the processor.
//! Every failure is mapped to a [`HeaderError`] carrying the file path.

use std::fs::Permissions;
use std::path::Path;

use tracing::trace;

use crate::error::HeaderError;

/// File I/O operations for the processor.
pub struct FileIO;

impl FileIO {
  /// Reads the whole file.
  pub async fn read(path: &Path) -> Result<Vec<u8>, HeaderError> {
    tokio::fs::read(path).await.map_err(|source| HeaderError::Read {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Replaces the file's content and re-applies `permissions` if the write
  /// changed them.
  pub async fn write_preserving_permissions(
    path: &Path,
    content: &[u8],
    permissions: &Permissions,
  ) -> Result<(), HeaderError> {
    let write_error = |source| HeaderError::Write {
      path: path.to_path_buf(),
      source,
    };

    tokio::fs::write(path, content).await.map_err(write_error)?;

    let current = tokio::fs::metadata(path).await.map_err(write_error)?.permissions();
    if current != *permissions {
      trace!("Restoring permissions of {}", path.display());
      tokio::fs::set_permissions(path, permissions.clone())
        .await
        .map_err(write_error)?;
    }

    Ok(())
  }
}
