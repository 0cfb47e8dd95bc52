//! Configuration file support
//!
//! Loads settings from ~/.bracepad.toml (or %USERPROFILE%\.bracepad.toml on
//! Windows), or from the file given with `--config`.
//!
//! Example:
//! ```text
//! # bracepad configuration
//! indent_width = 4
//! enter_policy = "carry-indent"
//! highlight = true
//! show_line_numbers = false
//! log_file = "/tmp/bracepad.log"
//! log_level = "debug"
//!
//! [colors]
//! comment = "bright-black"
//! keyword = "magenta"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::error::{EditorError, Result};
use crate::syntax::{Category, Color};

/// What Enter does besides breaking the line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnterPolicy {
    /// Carry the line's indentation; after `{` indent further and put the
    /// closing brace on its own line below the caret
    #[default]
    CarryIndent,
    /// Only after `{`: indent the new line and append `}` at the end of the
    /// document; otherwise insert a bare newline
    BraceOnly,
}

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Spaces inserted by Tab and added after an opening brace
    pub indent_width: usize,
    /// Enter key behavior
    pub enter_policy: EnterPolicy,
    /// Whether syntax highlighting is enabled
    pub highlight: bool,
    /// Whether to show line numbers
    pub show_line_numbers: bool,
    /// Log destination; logging stays off when unset
    pub log_file: Option<PathBuf>,
    /// Tracing filter directive (e.g. "info", "bracepad=debug")
    pub log_level: String,
    /// Foreground color overrides keyed by class name
    pub colors: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indent_width: 4,
            enter_policy: EnterPolicy::default(),
            highlight: true,
            show_line_numbers: false,
            log_file: None,
            log_level: String::from("info"),
            colors: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".bracepad.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".bracepad.toml"))
        }
    }

    /// Load configuration
    ///
    /// An explicit path must exist. The default file is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => match Self::config_path() {
                Some(path) if path.is_file() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Load configuration from a file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents).map_err(|source| EditorError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse config file contents
    fn parse(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        let mut config: Config = toml::from_str(contents)?;
        config.indent_width = config.indent_width.clamp(1, 16);
        Ok(config)
    }

    /// Get the valid color overrides, warning about the rest
    pub fn color_overrides(&self) -> Vec<(Category, Color)> {
        let mut overrides = Vec::new();
        for (class, color_name) in &self.colors {
            let Some(category) = Category::from_name(class) else {
                warn!(class = %class, "unknown highlight class in config");
                continue;
            };
            let Some(color) = Color::from_name(color_name) else {
                warn!(class = %class, color = %color_name, "unknown color in config");
                continue;
            };
            overrides.push((category, color));
        }
        overrides
    }

    /// The indentation unit as a string of spaces
    pub fn indent_unit(&self) -> String {
        " ".repeat(self.indent_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_config() {
        let contents = r#"
# Comment
indent_width = 2
enter_policy = "brace-only"
highlight = false
show_line_numbers = true
log_file = "/tmp/pad.log"
log_level = "debug"

[colors]
keyword = "bright-blue"
        "#;

        let config = Config::parse(contents).unwrap();
        assert_eq!(config.indent_width, 2);
        assert_eq!(config.enter_policy, EnterPolicy::BraceOnly);
        assert!(!config.highlight);
        assert!(config.show_line_numbers);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/pad.log")));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.colors.get("keyword").map(String::as_str), Some("bright-blue"));
    }

    #[test]
    fn test_defaults_for_missing_keys() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.indent_width, 4);
        assert_eq!(config.enter_policy, EnterPolicy::CarryIndent);
        assert_eq!(config.indent_unit(), "    ");
    }

    #[test]
    fn test_indent_width_clamped() {
        assert_eq!(Config::parse("indent_width = 0").unwrap().indent_width, 1);
        assert_eq!(Config::parse("indent_width = 64").unwrap().indent_width, 16);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Config::parse(r#"enter_policy = "sideways""#).is_err());
        assert!(Config::parse("tab-width = 4").is_err());
        assert!(Config::parse("highlight = ").is_err());
    }

    #[test]
    fn test_color_overrides() {
        let config = Config::parse(
            r#"
[colors]
comment = "grey"
number = "no-such-color"
operator = "red"
string = "yellow"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.color_overrides(),
            [
                (Category::Comment, Color::BrightBlack),
                (Category::String, Color::Yellow),
            ]
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "indent_width = 8").unwrap();
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.indent_width, 8);
    }

    #[test]
    fn test_load_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "indent_width = \"wide\"").unwrap();
        match Config::load(Some(file.path())) {
            Err(EditorError::Config { path, .. }) => assert_eq!(path, file.path()),
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_explicit_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(matches!(Config::load(Some(&missing)), Err(EditorError::Io(_))));
    }
}
