//! # addheader
//!
//! A tool that ensures source code files have copyright license headers by scanning directory patterns recursively.
//!
//! `addheader` modifies source files in place and never adds a license header to a file that already has one or
//! that was produced by a code generator. File types are recognized by extension or file name; files of an
//! unknown type are left alone.
//!
//! ## Features
//!
//! * Built-in Apache 2.0, BSD, MIT and MPL 2.0 headers, or a custom template file
//! * Optional SPDX-License-Identifier lines, or short SPDX-only headers for any license
//! * Comment formatting chosen per file type, with overrides from `.addheader.toml`
//! * Shebangs, XML declarations and similar first lines stay at the top of the file
//! * Check-only mode to verify license headers without modifying files
//! * Year updates that turn `2019` into `2019-2025` in existing headers
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use addheader::comment_style::create_resolver;
//! use addheader::config::RunConfig;
//! use addheader::pipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!   let mut config = RunConfig::new("2025");
//!   config.holder = "Acme Inc.".to_string();
//!   config.license = "mit".to_string();
//!   config.check_only = true;
//!   config.patterns = vec!["src".to_string()];
//!
//!   let summary = pipeline::run(Arc::new(config), create_resolver(None)).await?;
//!   if !summary.is_success() {
//!     println!("{} files are missing license headers", summary.failed);
//!   }
//!
//!   Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`templates`] - License templates and header rendering
//! * [`comment_style`] - Comment styles per file type
//! * [`license_detection`] - Detection of existing headers and generated files
//! * [`years`] - Copyright year parsing and updates
//! * [`processor`] - Per-file check and mutation logic
//! * [`pipeline`] - Concurrent processing of all discovered files

pub mod cli;
pub mod comment_style;
pub mod config;
pub mod error;
pub mod license_detection;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod processor;
pub mod templates;
pub mod walker;
pub mod years;
