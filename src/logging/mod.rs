//! # Logging Module
//!
//! Diagnostics go through [`tracing`] and are written to stderr, so stdout
//! stays reserved for check-mode findings. Verbosity comes from `-v`/`-q`
//! unless `RUST_LOG` is set.
//!
//! ## Example
//!
//! ```rust
//! use addheader::logging::{ColorMode, init_tracing};
//!
//! // -vv: debug level
//! init_tracing(false, 2);
//!
//! // Use owo-colors' automatic TTY detection
//! ColorMode::Auto.apply();
//!
//! tracing::debug!("Processing file: {}", "example.rs");
//! ```

mod modes;

pub use modes::{ColorMode, default_directive, init_tracing};
