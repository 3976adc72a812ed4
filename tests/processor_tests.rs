//! Per-file behavior of the processor against real files.

#![allow(clippy::panic_in_result_fn)]
#![allow(clippy::unwrap_used)]

mod common;

use std::fs;

use addheader::error::HeaderError;
use addheader::processor::{FileOutcome, FileTask};
use addheader::templates::CopyrightData;
use anyhow::Result;
use common::{HYS_TEMPLATE, hys_data, processor, read_file, write_file};
use tempfile::tempdir;

fn year_data(year: &str) -> CopyrightData {
  CopyrightData {
    year: year.to_string(),
    holder: "Acme".to_string(),
    spdx_id: "MIT".to_string(),
  }
}

#[tokio::test]
async fn test_c_file_gets_block_header() -> Result<()> {
  let dir = tempdir()?;
  let path = write_file(dir.path(), "main.c", "int main(void) {}\n")?;
  let processor = processor(HYS_TEMPLATE, hys_data(), false, false)?;

  let outcome = processor.process_file(&FileTask::from_path(&path)?).await?;

  assert_eq!(outcome, FileOutcome::Inserted);
  assert_eq!(read_file(&path)?, "/*\n * HYS\n */\n\nint main(void) {}\n");
  Ok(())
}

#[tokio::test]
async fn test_shebang_stays_first() -> Result<()> {
  let dir = tempdir()?;
  let path = write_file(dir.path(), "run.go", "#!/bin/bash\ncontent")?;
  let processor = processor(HYS_TEMPLATE, hys_data(), false, false)?;

  processor.process_file(&FileTask::from_path(&path)?).await?;

  assert_eq!(read_file(&path)?, "#!/bin/bash\n// HYS\n\ncontent");
  Ok(())
}

#[tokio::test]
async fn test_preserved_first_lines_by_file_type() -> Result<()> {
  let dir = tempdir()?;
  let processor = processor(HYS_TEMPLATE, hys_data(), false, false)?;

  let cases = [
    ("page.xml", "<?xml version=\"1.0\"?>\n<a/>\n", "<?xml version=\"1.0\"?>\n<!--\n HYS\n-->\n\n<a/>\n"),
    ("index.html", "<!DOCTYPE html>\n<html/>\n", "<!DOCTYPE html>\n<!--\n HYS\n-->\n\n<html/>\n"),
    ("app.rb", "# frozen_string_literal: true\nputs 1\n", "# frozen_string_literal: true\n# HYS\n\nputs 1\n"),
    ("index.php", "<?php\necho 1;\n", "<?php\n// HYS\n\necho 1;\n"),
    ("Dockerfile", "# syntax=docker/dockerfile:1\nFROM x\n", "# syntax=docker/dockerfile:1\n# HYS\n\nFROM x\n"),
  ];

  for (name, before, after) in cases {
    let path = write_file(dir.path(), name, before)?;
    assert_eq!(
      processor.process_file(&FileTask::from_path(&path)?).await?,
      FileOutcome::Inserted,
      "{name}"
    );
    assert_eq!(read_file(&path)?, after, "{name}");
  }
  Ok(())
}

#[tokio::test]
async fn test_holder_is_not_html_escaped() -> Result<()> {
  let dir = tempdir()?;
  let path = write_file(dir.path(), "a.py", "x = 1\n")?;
  let data = CopyrightData {
    holder: "Smith & <Sons>".to_string(),
    ..year_data("2024")
  };
  let processor = processor("Copyright {{.Year}} {{.Holder}}", data, false, false)?;

  processor.process_file(&FileTask::from_path(&path)?).await?;

  assert_eq!(read_file(&path)?, "# Copyright 2024 Smith & <Sons>\n\nx = 1\n");
  Ok(())
}

#[tokio::test]
async fn test_generated_file_is_never_touched() -> Result<()> {
  let dir = tempdir()?;
  let content = "// Code generated by protoc-gen-go. DO NOT EDIT.\npackage pb\n";
  let path = write_file(dir.path(), "x.pb.go", content)?;

  let mutate = processor(HYS_TEMPLATE, hys_data(), false, true)?;
  assert_eq!(
    mutate.process_file(&FileTask::from_path(&path)?).await?,
    FileOutcome::Unchanged
  );
  assert_eq!(read_file(&path)?, content);

  let check = processor(HYS_TEMPLATE, hys_data(), true, true)?;
  assert_eq!(check.check_file(&path).await?, FileOutcome::Unchanged);
  Ok(())
}

#[tokio::test]
async fn test_unknown_extension_is_a_no_op() -> Result<()> {
  let dir = tempdir()?;
  let path = write_file(dir.path(), "notes.txt", "no license here\n")?;

  let mutate = processor(HYS_TEMPLATE, hys_data(), false, false)?;
  assert_eq!(
    mutate.process_file(&FileTask::from_path(&path)?).await?,
    FileOutcome::Unrecognized
  );
  assert_eq!(read_file(&path)?, "no license here\n");

  let check = processor(HYS_TEMPLATE, hys_data(), true, false)?;
  assert_eq!(check.check_file(&path).await?, FileOutcome::Unrecognized);
  Ok(())
}

#[tokio::test]
async fn test_extension_is_case_insensitive() -> Result<()> {
  let dir = tempdir()?;
  let upper = write_file(dir.path(), "upper/F.PY", "x = 1\n")?;
  let lower = write_file(dir.path(), "lower/f.py", "x = 1\n")?;
  let processor = processor(HYS_TEMPLATE, hys_data(), false, false)?;

  processor.process_file(&FileTask::from_path(&upper)?).await?;
  processor.process_file(&FileTask::from_path(&lower)?).await?;

  assert_eq!(read_file(&upper)?, read_file(&lower)?);
  Ok(())
}

#[tokio::test]
async fn test_update_mode_refreshes_first_year_only() -> Result<()> {
  let dir = tempdir()?;
  let path = write_file(
    dir.path(),
    "lib.rs",
    "// Copyright 2015-2017,2019 Acme\n\npub fn f() {}\n",
  )?;
  let processor = processor("Copyright {{.Year}} {{.Holder}}", year_data("2021"), false, true)?;
  let task = FileTask::from_path(&path)?;

  assert_eq!(processor.process_file(&task).await?, FileOutcome::Updated);
  assert_eq!(read_file(&path)?, "// Copyright 2015-2021,2019 Acme\n\npub fn f() {}\n");

  // Current now, nothing left to do
  assert_eq!(processor.process_file(&task).await?, FileOutcome::Unchanged);
  Ok(())
}

#[tokio::test]
async fn test_license_without_year_is_left_alone_in_update_mode() -> Result<()> {
  let dir = tempdir()?;
  let content = "// SPDX-License-Identifier: MIT\n\npub fn f() {}\n";
  let path = write_file(dir.path(), "lib.rs", content)?;
  let processor = processor("Copyright {{.Year}} {{.Holder}}", year_data("2021"), false, true)?;

  assert_eq!(
    processor.process_file(&FileTask::from_path(&path)?).await?,
    FileOutcome::Unchanged
  );
  assert_eq!(read_file(&path)?, content);
  Ok(())
}

#[tokio::test]
async fn test_check_reports_missing_and_outdated() -> Result<()> {
  let dir = tempdir()?;
  let missing = write_file(dir.path(), "a.rs", "fn a() {}\n")?;
  let outdated = write_file(dir.path(), "b.rs", "// Copyright 2019 Acme\nfn b() {}\n")?;
  let current = write_file(dir.path(), "c.rs", "// Copyright 2019-2021 Acme\nfn c() {}\n")?;

  let check = processor("Copyright {{.Year}} {{.Holder}}", year_data("2021"), true, true)?;

  assert!(matches!(
    check.check_file(&missing).await,
    Err(HeaderError::MissingLicenseHeader { .. })
  ));
  assert!(matches!(
    check.check_file(&outdated).await,
    Err(HeaderError::OutdatedLicenseHeader { .. })
  ));
  assert_eq!(check.check_file(&current).await?, FileOutcome::Unchanged);

  // Check mode never writes
  assert_eq!(read_file(&missing)?, "fn a() {}\n");
  assert_eq!(read_file(&outdated)?, "// Copyright 2019 Acme\nfn b() {}\n");
  Ok(())
}

#[tokio::test]
async fn test_run_dispatches_on_mode() -> Result<()> {
  let dir = tempdir()?;
  let path = write_file(dir.path(), "a.sh", "echo hi\n")?;
  let task = FileTask::from_path(&path)?;

  let template = "Copyright {{.Year}} {{.Holder}}";
  let check = processor(template, year_data("2021"), true, false)?;
  assert!(check.run(&task).await.is_err());
  assert_eq!(read_file(&path)?, "echo hi\n");

  let mutate = processor(template, year_data("2021"), false, false)?;
  assert_eq!(mutate.run(&task).await?, FileOutcome::Inserted);
  assert_eq!(check.run(&task).await?, FileOutcome::Unchanged);
  Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn test_permissions_are_preserved() -> Result<()> {
  use std::os::unix::fs::PermissionsExt;

  let dir = tempdir()?;
  let path = write_file(dir.path(), "tool.sh", "#!/bin/sh\necho hi\n")?;
  fs::set_permissions(&path, fs::Permissions::from_mode(0o750))?;
  let processor = processor(HYS_TEMPLATE, hys_data(), false, false)?;

  processor.process_file(&FileTask::from_path(&path)?).await?;

  assert_eq!(read_file(&path)?, "#!/bin/sh\n# HYS\n\necho hi\n");
  assert_eq!(fs::metadata(&path)?.permissions().mode() & 0o777, 0o750);
  Ok(())
}

#[tokio::test]
async fn test_missing_file_is_a_read_error() -> Result<()> {
  let dir = tempdir()?;
  let path = write_file(dir.path(), "gone.rs", "fn f() {}\n")?;
  let task = FileTask::from_path(&path)?;
  fs::remove_file(&path)?;

  let processor = processor(HYS_TEMPLATE, hys_data(), false, false)?;
  let err = processor.process_file(&task).await.unwrap_err();

  assert!(matches!(err, HeaderError::Read { .. }));
  assert_eq!(err.path(), Some(path.as_path()));
  Ok(())
}
