//! Terminal settings.
//!
//! A `Settings` value is built by the host (usually from a TOML file via
//! `from_toml_str`) and handed to `History::new`. The core reads the
//! default colors, the auto-wrap default, and the ring capacity; the
//! remaining fields describe font and interaction behavior for the host.

use serde::{Deserialize, Serialize};

/// Default scrollback ring capacity.
pub const DEFAULT_HISTORY_SIZE: usize = 10_000;

/// User-facing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Font pattern handed to the host's font loader.
    pub font_spec: String,
    /// Value for the child's `TERM` environment variable.
    pub term_name: String,
    /// Default foreground: palette index or `0x80RRGGBB` true color.
    pub default_foreground_color: u32,
    /// Default background: palette index or `0x80RRGGBB` true color.
    pub default_background_color: u32,
    /// Whether DECAWM starts enabled.
    pub default_auto_wrap: bool,
    /// Ring capacity in lines.
    pub history_size: usize,
    /// Estimated glyph width as a fraction of the font size, used by the
    /// host to pick an initial window geometry.
    pub average_character_width: f32,
    /// Double-click detection window.
    pub double_click_ms: u32,
    /// Characters that end a word for double-click selection.
    pub word_separator_characters: String,
    /// Extra separators appended to the defaults.
    pub additional_word_separator_characters: String,
    /// Initial window title.
    pub window_title: String,
    /// Pixel width of one non-elastic tab indent.
    pub indent_width: u32,
    /// Minimum pixel gap between elastic columns.
    pub column_separation: u32,
    /// Starting directory for the child shell ("" = inherit).
    pub working_directory: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_spec: "sans-16".into(),
            term_name: "xterm".into(),
            default_foreground_color: 0,
            default_background_color: 15,
            default_auto_wrap: true,
            history_size: DEFAULT_HISTORY_SIZE,
            average_character_width: 0.6,
            double_click_ms: 300,
            word_separator_characters: " \t!\"#$%&'()*+,-./:;<=>?@[\\]^`{|}".into(),
            additional_word_separator_characters: String::new(),
            window_title: "elasterm".into(),
            indent_width: 30,
            column_separation: 20,
            working_directory: String::new(),
        }
    }
}

impl Settings {
    /// Parse settings from TOML text. Unknown keys are ignored; missing
    /// keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_HISTORY_SIZE, Settings};

    #[test]
    fn defaults_are_sane() {
        let settings = Settings::default();
        assert_eq!(settings.default_foreground_color, 0);
        assert_eq!(settings.default_background_color, 15);
        assert!(settings.default_auto_wrap);
        assert_eq!(settings.history_size, DEFAULT_HISTORY_SIZE);
        assert_eq!(settings.term_name, "xterm");
    }

    #[test]
    fn parses_partial_toml() {
        let settings = Settings::from_toml_str(
            r#"
            term_name = "xterm-256color"
            default_foreground_color = 7
            history_size = 500
            "#,
        )
        .unwrap();
        assert_eq!(settings.term_name, "xterm-256color");
        assert_eq!(settings.default_foreground_color, 7);
        assert_eq!(settings.history_size, 500);
        // Untouched fields keep defaults.
        assert_eq!(settings.default_background_color, 15);
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings.history_size, Settings::default().history_size);
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(Settings::from_toml_str("term_name = ").is_err());
    }
}
