//! Configuration management for Broadsheet.
//!
//! Configuration is read from `~/.config/broadsheet/config.toml` at startup,
//! or from the path given with `--config`. If the default file doesn't exist,
//! one with commented defaults is created.

pub mod colors;
pub mod keybindings;

pub use colors::ColorConfig;
pub use keybindings::KeybindingConfig;

use crate::render::RenderOptions;
use crate::source::ContentConfig;
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub content: ContentConfig,
    pub reader: RenderOptions,
    pub colors: ColorConfig,
    pub keybindings: KeybindingConfig,
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Get the default config file path: `~/.config/broadsheet/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("broadsheet").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        tracing::info!("Created default config at {}", path.display());
        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> &'static str {
        r##"# Broadsheet Configuration
#
# Colors can be specified as:
# - Named colors: Black, Red, Green, Yellow, Blue, Magenta, Cyan, Gray,
#   DarkGray, LightRed, LightGreen, LightYellow, LightBlue, LightMagenta,
#   LightCyan, White, Reset
# - Hex colors: "#RRGGBB" or "#RGB"
#
# Keybindings can be specified as:
# - Single characters: "a", "A", "1"
# - Special keys: Enter, Tab, BackTab, Backspace, Delete, Home, End,
#   PageUp, PageDown, Up, Down, Left, Right, Esc, Space, F1-F12
# - With modifiers: "Ctrl+c", "Shift+Tab", "Alt+Enter"

[content]
# Content workspace and dataset
project_id = "wusctyxy"
dataset = "production"
api_version = "2023-05-03"

# Query the CDN edge instead of the live API
use_cdn = true

# Request timeout in seconds
timeout_secs = 10

# Serve the built-in articles only, never contact the API
offline = false

# Requested image widths
card_image_width = 800
hero_image_width = 1200
avatar_width = 120

[reader]
# Shown before bullet list items
bullet_prefix = "🔥"

# Prepended to bold text
strong_prefix = "🔥 "

# Plain-text paragraphs starting with one of these are shown as quotes
quote_triggers = ["Well, with our", "The key to"]

# Separates paragraphs in plain-text articles
paragraph_delimiter = "\n\n"

# Width requested for inline images
image_width = 1200

[colors]
# Border colors
active_border = "Cyan"
inactive_border = "DarkGray"

# Selection highlight
selection_bg_active = "Cyan"
selection_fg_active = "Black"
selection_bg_inactive = "DarkGray"
selection_fg_inactive = "White"

# Category bar
category = "Gray"
category_active = "#2ecc71"

# Article metadata and bookmark marker
metadata = "Yellow"
bookmark = "LightRed"

# Reader
drop_cap = "#2ecc71"
quote = "Gray"
heading = "White"
strong = "#2ecc71"
link = "Blue"

# Status bar
status_fg = "White"
status_bg = "DarkGray"

[keybindings]
# Navigation
quit = ["q", "Ctrl+c"]
move_up = ["k", "Up"]
move_down = ["j", "Down"]
next_page = ["n", "PageDown"]
prev_page = ["p", "PageUp"]
next_pane = ["Tab"]
prev_pane = ["BackTab", "Shift+Tab"]

# Actions
select = ["Enter"]
back = ["Esc", "Backspace"]
next_category = ["c"]
toggle_bookmark = ["b"]
next_link = ["l"]
open_link = ["o"]
share = ["s"]
refresh = ["R"]
toggle_maximize = ["m"]
"##
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn test_default_config_deserializes() {
        let config: Config = toml::from_str(Config::default_config_content())
            .expect("Default config should be valid TOML");

        assert_eq!(config.colors.active_border, Color::Cyan);
        assert_eq!(config.colors.strong, Color::Rgb(46, 204, 113));
        assert_eq!(config.keybindings.quit, vec!["q", "Ctrl+c"]);
        assert_eq!(config.reader, RenderOptions::default());
        assert_eq!(config.content.project_id, "wusctyxy");
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[colors]
active_border = "#FF0000"

[reader]
bullet_prefix = "*"
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert_eq!(config.colors.active_border, Color::Rgb(255, 0, 0));
        assert_eq!(config.colors.inactive_border, Color::DarkGray);
        assert_eq!(config.reader.bullet_prefix, "*");
        assert_eq!(config.reader.strong_prefix, "🔥 ");
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");

        assert_eq!(config.colors.active_border, Color::Cyan);
        assert_eq!(config.keybindings.toggle_bookmark, vec!["b"]);
        assert!(!config.content.offline);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[content]\noffline = true\ndataset = \"staging\"").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert!(config.content.offline);
        assert_eq!(config.content.dataset, "staging");
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_from_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[colors]\nactive_border = \"chartreuse\"").unwrap();

        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_create_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broadsheet").join("config.toml");

        Config::create_default_config(&path).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.keybindings.next_link, vec!["l"]);
    }
}
