//! Configuration file support.
//!
//! Settings live in a TOML file, by default at
//! `<config dir>/diffbench/config.toml`:
//!
//! ```toml
//! [layout]
//! result_height = 5
//! help_height = 5
//!
//! [diff]
//! granularity = "char"    # "char", "word" or "line"
//!
//! [theme]
//! insertion = "#00ff00"
//! deletion = "#ff0000"
//! # unchanged = "#c0c0c0" # terminal default when omitted
//!
//! [editor]
//! placeholder = "Type something"
//! line_numbers = true
//! ```
//!
//! Every key is optional; unknown keys are rejected so typos surface.

use crate::buffer::{Rgb, Style};
use crate::diff::{Granularity, Theme};
use crate::error::{Error, Result};
use crate::layout::LayoutConfig;
use crate::widget::TextAreaConfig;
use crate::workbench::WorkbenchOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Largest accepted value for a configured pane height.
const MAX_PANE_HEIGHT: u16 = 200;

/// Diff engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiffConfig {
    /// Unit of comparison.
    pub granularity: Granularity,
}

/// Diff colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Color of inserted text.
    pub insertion: Rgb,
    /// Color of deleted text.
    pub deletion: Rgb,
    /// Color of unchanged text; the terminal default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unchanged: Option<Rgb>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            insertion: Rgb::GREEN,
            deletion: Rgb::RED,
            unchanged: None,
        }
    }
}

/// Editor pane settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Placeholder shown in empty panes.
    pub placeholder: String,
    /// Whether panes show line numbers.
    pub line_numbers: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        let defaults = TextAreaConfig::default();
        Self {
            placeholder: defaults.placeholder,
            line_numbers: defaults.line_numbers,
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Pane geometry.
    pub layout: LayoutConfig,
    /// Diff engine.
    pub diff: DiffConfig,
    /// Diff colors.
    pub theme: ThemeConfig,
    /// Editor panes.
    pub editor: EditorConfig,
}

impl Config {
    /// The default config file location, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("diffbench").join("config.toml"))
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Self::parse(text, Path::new("<string>"))
    }

    /// Read, parse and validate the file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config = Self::parse(&text, path)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path` if given; otherwise load the default file if it exists,
    /// falling back to built-in defaults.
    ///
    /// An explicitly given file must exist.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                log::debug!("no config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn parse(text: &str, origin: &Path) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|source| Error::ConfigParse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that parse but make no sense.
    pub fn validate(&self) -> Result<()> {
        let layout = &self.layout;
        if layout.result_height == 0 {
            return Err(Error::Config("layout.result_height must be at least 1".into()));
        }
        for (name, value) in [
            ("result_height", layout.result_height),
            ("help_height", layout.help_height),
        ] {
            if value > MAX_PANE_HEIGHT {
                return Err(Error::Config(format!(
                    "layout.{name} = {value} exceeds {MAX_PANE_HEIGHT}"
                )));
            }
        }
        if self.editor.placeholder.contains(['\n', '\r']) {
            return Err(Error::Config("editor.placeholder must be a single line".into()));
        }
        Ok(())
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// The diff theme these settings describe.
    pub fn theme(&self) -> Theme {
        Theme {
            insertion: Style::PLAIN.fg(self.theme.insertion),
            deletion: Style::PLAIN.fg(self.theme.deletion),
            unchanged: self
                .theme
                .unchanged
                .map_or(Style::PLAIN, |color| Style::PLAIN.fg(color)),
        }
    }

    /// Workbench settings derived from this config.
    pub fn workbench_options(&self) -> WorkbenchOptions {
        WorkbenchOptions {
            layout: self.layout,
            granularity: self.diff.granularity,
            theme: self.theme(),
            editor: TextAreaConfig {
                placeholder: self.editor.placeholder.clone(),
                line_numbers: self.editor.line_numbers,
                ..TextAreaConfig::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_defaults_match_workbench_defaults() {
        let options = Config::default().workbench_options();
        assert_eq!(options, WorkbenchOptions::default());
    }

    #[test]
    fn test_partial_document() {
        let config = Config::from_toml_str(
            r##"
            [diff]
            granularity = "word"

            [theme]
            insertion = "#00aa00"
            unchanged = "#808080"
            "##,
        )
        .unwrap();

        assert_eq!(config.diff.granularity, Granularity::Word);
        assert_eq!(config.layout, LayoutConfig::default());
        let theme = config.theme();
        assert_eq!(theme.insertion.fg, Some(Rgb::new(0, 0xaa, 0)));
        assert_eq!(theme.deletion.fg, Some(Rgb::RED));
        assert_eq!(theme.unchanged.fg, Some(Rgb::new(0x80, 0x80, 0x80)));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = Config::from_toml_str("[layout]\nresult_hieght = 3\n").unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_bad_color_is_rejected() {
        let err = Config::from_toml_str("[theme]\ninsertion = \"green\"\n").unwrap_err();
        assert!(err.to_string().contains("green"));
    }

    #[test]
    fn test_validation() {
        let err = Config::from_toml_str("[layout]\nresult_height = 0\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = Config::from_toml_str("[layout]\nhelp_height = 999\n").unwrap_err();
        assert!(err.to_string().contains("help_height"));

        let err = Config::from_toml_str("[editor]\nplaceholder = \"a\\nb\"\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[layout]\nresult_height = 8\n\n[editor]\nline_numbers = false").unwrap();

        let config = Config::load_or_default(Some(file.path())).unwrap();
        assert_eq!(config.layout.result_height, 8);
        assert!(!config.editor.line_numbers);
        assert!(!config.workbench_options().editor.line_numbers);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            Config::load_or_default(Some(&missing)),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_to_toml_reloads() {
        let mut config = Config::default();
        config.theme.unchanged = Some(Rgb::WHITE);
        config.diff.granularity = Granularity::Line;

        let text = config.to_toml_string().unwrap();
        assert!(text.contains("granularity = \"line\""));
        assert_eq!(Config::from_toml_str(&text).unwrap(), config);
    }
}
