use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Enum representing the color mode options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
  /// Automatically determine whether to use colors based on TTY detection
  #[default]
  Auto,
  /// Never use colors
  Never,
  /// Always use colors
  Always,
}

impl ColorMode {
  /// Applies the mode to all colored output of this process.
  pub fn apply(self) {
    match self {
      ColorMode::Auto => owo_colors::unset_override(),
      ColorMode::Never => owo_colors::set_override(false),
      ColorMode::Always => owo_colors::set_override(true),
    }
  }
}

/// The default filter directive for the given flags.
///
/// Quiet wins over any number of `-v`.
pub const fn default_directive(quiet: bool, verbosity: u8) -> &'static str {
  if quiet {
    return "error";
  }

  match verbosity {
    0 => "warn",
    1 => "info",
    2 => "debug",
    _ => "trace",
  }
}

/// Initializes the tracing subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence over the command-line flags. Calling this more
/// than once is harmless; only the first call installs a subscriber.
pub fn init_tracing(quiet: bool, verbosity: u8) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(quiet, verbosity)));

  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .without_time()
    .try_init();
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_directive() {
    assert_eq!(default_directive(false, 0), "warn");
    assert_eq!(default_directive(false, 1), "info");
    assert_eq!(default_directive(false, 2), "debug");
    assert_eq!(default_directive(false, 7), "trace");
    assert_eq!(default_directive(true, 3), "error");
  }

  #[test]
  fn test_init_tracing_twice() {
    init_tracing(false, 2);
    init_tracing(true, 0);
  }
}
