//! # addheader
//!
//! A tool that ensures source code files have copyright license headers.

use std::process::ExitCode;

use addheader::cli::{Cli, run_headers};
use addheader::output::print_fatal;

#[tokio::main]
async fn main() -> ExitCode {
  let cli = Cli::parse_args();

  match run_headers(cli.run_args).await {
    Ok(summary) if summary.is_success() => ExitCode::SUCCESS,
    Ok(_) => ExitCode::FAILURE,
    Err(e) => {
      print_fatal(format!("{e:#}"));
      ExitCode::FAILURE
    }
  }
}
