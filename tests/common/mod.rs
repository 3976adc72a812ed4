#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use addheader::processor::{Processor, ProcessorConfig};
use addheader::templates::{CopyrightData, LicenseTemplate};
use anyhow::{Context, Result};
use assert_cmd::prelude::*;

/// Template whose rendering is just the three values run together.
pub const HYS_TEMPLATE: &str = "{{.Holder}}{{.Year}}{{.SPDXID}}";

/// Writes `content` to `dir/relative`, creating parent directories.
pub fn write_file(dir: &Path, relative: &str, content: impl AsRef<[u8]>) -> Result<PathBuf> {
  let path = dir.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
  }
  fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
  Ok(path)
}

/// Reads a file as UTF-8 text.
pub fn read_file(path: &Path) -> Result<String> {
  fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Copyright data rendering as `HYS` with [`HYS_TEMPLATE`].
pub fn hys_data() -> CopyrightData {
  CopyrightData {
    year: "Y".to_string(),
    holder: "H".to_string(),
    spdx_id: "S".to_string(),
  }
}

/// A processor using `template` with the given flags.
pub fn processor(template: &str, data: CopyrightData, check_only: bool, update_years: bool) -> Result<Processor> {
  let template = LicenseTemplate::parse(template)?;
  Ok(Processor::new(ProcessorConfig {
    check_only,
    update_years,
    ..ProcessorConfig::new(template, data)
  }))
}

/// The addheader binary, run inside `dir` without environment overrides.
pub fn addheader(dir: &Path) -> Result<Command> {
  let mut cmd = Command::cargo_bin("addheader")?;
  cmd.current_dir(dir).env_remove("RUST_LOG").env_remove("ADDHEADER_CONFIG");
  Ok(cmd)
}
