//! Color configuration for the TUI and the article reader.

use ratatui::style::Color;
use serde::{de, Deserialize, Deserializer};

/// Colors for the panes and the article reader.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    #[serde(deserialize_with = "deserialize_color")]
    pub active_border: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub inactive_border: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_bg_active: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_fg_active: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_bg_inactive: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_fg_inactive: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub category: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub category_active: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub metadata: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub bookmark: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub drop_cap: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub quote: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub heading: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub strong: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub link: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub status_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub status_bg: Color,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            active_border: Color::Cyan,
            inactive_border: Color::DarkGray,
            selection_bg_active: Color::Cyan,
            selection_fg_active: Color::Black,
            selection_bg_inactive: Color::DarkGray,
            selection_fg_inactive: Color::White,
            category: Color::Gray,
            category_active: Color::Rgb(46, 204, 113),
            metadata: Color::Yellow,
            bookmark: Color::LightRed,
            drop_cap: Color::Rgb(46, 204, 113),
            quote: Color::Gray,
            heading: Color::White,
            strong: Color::Rgb(46, 204, 113),
            link: Color::Blue,
            status_fg: Color::White,
            status_bg: Color::DarkGray,
        }
    }
}

/// Custom deserializer for Color that supports named colors and hex codes.
fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color_string(&s).map_err(de::Error::custom)
}

const NAMED_COLORS: [(&str, Color); 17] = [
    ("black", Color::Black),
    ("red", Color::Red),
    ("green", Color::Green),
    ("yellow", Color::Yellow),
    ("blue", Color::Blue),
    ("magenta", Color::Magenta),
    ("cyan", Color::Cyan),
    ("gray", Color::Gray),
    ("darkgray", Color::DarkGray),
    ("lightred", Color::LightRed),
    ("lightgreen", Color::LightGreen),
    ("lightyellow", Color::LightYellow),
    ("lightblue", Color::LightBlue),
    ("lightmagenta", Color::LightMagenta),
    ("lightcyan", Color::LightCyan),
    ("white", Color::White),
    ("reset", Color::Reset),
];

/// Parse a color name (any case, "grey" spelling allowed) or a `#RRGGBB` /
/// `#RGB` hex code.
pub fn parse_color_string(s: &str) -> Result<Color, String> {
    let s = s.trim();

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| format!("Invalid hex color: {}", s));
    }

    let name = s.to_ascii_lowercase().replace("grey", "gray");
    NAMED_COLORS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, color)| *color)
        .ok_or_else(|| format!("Unknown color: {}", s))
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let value = u32::from_str_radix(hex, 16).ok()?;

    match hex.len() {
        6 => Some(Color::from_u32(value)),
        3 => {
            let channel = |shift: u32| ((value >> shift) & 0xf) as u8 * 17;
            Some(Color::Rgb(channel(8), channel(4), channel(0)))
        }
        _ => None,
    }
}
