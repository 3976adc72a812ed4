//! # Comment Style Module
//!
//! Maps file names to the comment delimiters used to wrap a license header.
//!
//! The built-in mapping is a static table keyed by lowercased basename or
//! extension. Files whose type is not in the table (and not covered by a
//! configuration override) are unrecognized: they never receive a header and
//! never fail a check.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use tracing::trace;

use crate::config::{CommentStyleConfig, Config};

/// Defines the comment style for different file types.
///
/// `top` and `bottom` get a line of their own when non-empty; `middle`
/// prefixes every line of the license text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentStyle {
  /// The string to use at the top of a comment block
  pub top: String,

  /// The string to use at the beginning of each line in the comment block
  pub middle: String,

  /// The string to use at the bottom of a comment block
  pub bottom: String,
}

impl CommentStyle {
  /// Create a line-comment style (no top/bottom markers).
  pub fn line(prefix: &str) -> Self {
    Self {
      top: String::new(),
      middle: prefix.to_string(),
      bottom: String::new(),
    }
  }

  /// Create a block-comment style.
  pub fn block(top: &str, middle: &str, bottom: &str) -> Self {
    Self {
      top: top.to_string(),
      middle: middle.to_string(),
      bottom: bottom.to_string(),
    }
  }
}

impl From<&CommentStyleConfig> for CommentStyle {
  fn from(config: &CommentStyleConfig) -> Self {
    Self {
      top: config.top.clone(),
      middle: config.middle.clone(),
      bottom: config.bottom.clone(),
    }
  }
}

/// Trait for resolving comment styles for file paths.
pub trait CommentStyleResolver: Send + Sync {
  /// Returns the comment style for `path`, or `None` if the file type is not
  /// recognized.
  fn resolve(&self, path: &Path) -> Option<CommentStyle>;
}

/// Extensions and basenames sharing one comment style.
struct StyleGroup {
  keys: &'static [&'static str],
  top: &'static str,
  middle: &'static str,
  bottom: &'static str,
}

const STYLE_GROUPS: &[StyleGroup] = &[
  StyleGroup {
    keys: &["c", "h", "gv", "java", "scala", "kt", "kts"],
    top: "/*",
    middle: " * ",
    bottom: " */",
  },
  StyleGroup {
    keys: &["js", "mjs", "cjs", "jsx", "tsx", "css", "scss", "sass", "ts"],
    top: "/**",
    middle: " * ",
    bottom: " */",
  },
  StyleGroup {
    keys: &[
      "cc", "cpp", "cs", "go", "hcl", "hh", "hpp", "m", "mm", "proto", "rs", "swift", "dart", "groovy", "v", "sv", "php",
    ],
    top: "",
    middle: "// ",
    bottom: "",
  },
  StyleGroup {
    keys: &[
      "py",
      "sh",
      "yaml",
      "yml",
      "dockerfile",
      "rb",
      "gemfile",
      "tcl",
      "tf",
      "bzl",
      "pl",
      "pp",
      "build",
      "toml",
      "cmake",
      "cmakelists.txt",
    ],
    top: "",
    middle: "# ",
    bottom: "",
  },
  StyleGroup {
    keys: &["el", "lisp"],
    top: "",
    middle: ";; ",
    bottom: "",
  },
  StyleGroup {
    keys: &["erl"],
    top: "",
    middle: "% ",
    bottom: "",
  },
  StyleGroup {
    keys: &["hs", "sql", "sdl"],
    top: "",
    middle: "-- ",
    bottom: "",
  },
  StyleGroup {
    keys: &["html", "xml", "vue", "wxi", "wxl", "wxs"],
    top: "<!--",
    middle: " ",
    bottom: "-->",
  },
  StyleGroup {
    keys: &["ml", "mli", "mll", "mly"],
    top: "(**",
    middle: "   ",
    bottom: "*)",
  },
];

/// Compound suffixes that are matched against the whole basename.
const SUFFIX_KEYS: &[(&str, &str)] = &[(".cmake.in", "cmake")];

static STYLE_TABLE: LazyLock<HashMap<&'static str, CommentStyle>> = LazyLock::new(|| {
  let mut table = HashMap::new();
  for group in STYLE_GROUPS {
    let style = CommentStyle::block(group.top, group.middle, group.bottom);
    for key in group.keys {
      table.insert(*key, style.clone());
    }
  }
  table
});

/// Returns the lowercased basename and the text after its last `.`, if any.
fn lookup_keys(path: &Path) -> (String, Option<String>) {
  let file_name = path
    .file_name()
    .map(|name| name.to_string_lossy().to_lowercase())
    .unwrap_or_default();
  let extension = file_name.rsplit_once('.').map(|(_, ext)| ext.to_string());
  (file_name, extension)
}

/// Looks up the built-in comment style for a file.
///
/// The lowercased basename is tried first (for names such as `dockerfile` or
/// `cmakelists.txt`), then the lowercased extension, then compound suffixes
/// such as `.cmake.in`.
pub fn builtin_style_for(path: &Path) -> Option<CommentStyle> {
  let (file_name, extension) = lookup_keys(path);

  if let Some(style) = STYLE_TABLE.get(file_name.as_str()) {
    return Some(style.clone());
  }

  if let Some(style) = extension.as_deref().and_then(|ext| STYLE_TABLE.get(ext)) {
    return Some(style.clone());
  }

  SUFFIX_KEYS
    .iter()
    .find(|(suffix, _)| file_name.ends_with(suffix))
    .and_then(|(_, key)| STYLE_TABLE.get(key))
    .cloned()
}

/// Default resolver using the built-in table.
#[derive(Debug, Default)]
pub struct BuiltinResolver;

impl CommentStyleResolver for BuiltinResolver {
  fn resolve(&self, path: &Path) -> Option<CommentStyle> {
    builtin_style_for(path)
  }
}

/// Resolver that checks user configuration first, then falls back to the
/// built-in table.
pub struct ConfigurableResolver {
  config: Arc<Config>,
}

impl std::fmt::Debug for ConfigurableResolver {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ConfigurableResolver")
      .field("config", &"<config>")
      .finish()
  }
}

impl ConfigurableResolver {
  pub fn new(config: Config) -> Self {
    Self {
      config: Arc::new(config),
    }
  }
}

impl CommentStyleResolver for ConfigurableResolver {
  fn resolve(&self, path: &Path) -> Option<CommentStyle> {
    let (file_name, extension) = lookup_keys(path);

    // 1. Exact filename override
    if let Some(style) = self.config.filenames.get(&file_name) {
      trace!("Using config filename override for: {}", file_name);
      return Some(CommentStyle::from(style));
    }

    // 2. Filename glob override, first matching key in sorted order
    for (pattern, style) in &self.config.filenames {
      if pattern.contains('*')
        && let Ok(glob_pattern) = glob::Pattern::new(pattern)
        && glob_pattern.matches(&file_name)
      {
        trace!("Using config filename glob override '{}' for: {}", pattern, file_name);
        return Some(CommentStyle::from(style));
      }
    }

    // 3. Extension override
    if let Some(style) = extension.as_deref().and_then(|ext| self.config.comment_styles.get(ext)) {
      trace!("Using config extension override for: {}", file_name);
      return Some(CommentStyle::from(style));
    }

    builtin_style_for(path)
  }
}

/// Create a comment style resolver for the optional configuration.
pub fn create_resolver(config: Option<Config>) -> Box<dyn CommentStyleResolver> {
  match config {
    Some(cfg) if cfg.has_overrides() => Box::new(ConfigurableResolver::new(cfg)),
    _ => Box::new(BuiltinResolver),
  }
}
