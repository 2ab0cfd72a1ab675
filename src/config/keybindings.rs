//! Keybinding configuration for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

use crate::tui::event::Action;

/// Key bindings, one list of key strings per action.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeybindingConfig {
    pub quit: Vec<String>,
    pub move_up: Vec<String>,
    pub move_down: Vec<String>,
    pub next_page: Vec<String>,
    pub prev_page: Vec<String>,
    pub next_pane: Vec<String>,
    pub prev_pane: Vec<String>,
    pub select: Vec<String>,
    pub back: Vec<String>,
    pub next_category: Vec<String>,
    pub toggle_bookmark: Vec<String>,
    pub next_link: Vec<String>,
    pub open_link: Vec<String>,
    pub share: Vec<String>,
    pub refresh: Vec<String>,
    pub toggle_maximize: Vec<String>,
}

fn keys(list: &[&str]) -> Vec<String> {
    list.iter().map(|k| k.to_string()).collect()
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self {
            quit: keys(&["q", "Ctrl+c"]),
            move_up: keys(&["k", "Up"]),
            move_down: keys(&["j", "Down"]),
            next_page: keys(&["n", "PageDown"]),
            prev_page: keys(&["p", "PageUp"]),
            next_pane: keys(&["Tab"]),
            prev_pane: keys(&["BackTab", "Shift+Tab"]),
            select: keys(&["Enter"]),
            back: keys(&["Esc", "Backspace"]),
            next_category: keys(&["c"]),
            toggle_bookmark: keys(&["b"]),
            next_link: keys(&["l"]),
            open_link: keys(&["o"]),
            share: keys(&["s"]),
            refresh: keys(&["R"]),
            toggle_maximize: keys(&["m"]),
        }
    }
}

impl KeybindingConfig {
    /// Get the action for a key event.
    pub fn get_action(&self, key: &KeyEvent) -> Action {
        let table: [(&[String], Action); 16] = [
            (self.quit.as_slice(), Action::Quit),
            (self.move_up.as_slice(), Action::MoveUp),
            (self.move_down.as_slice(), Action::MoveDown),
            (self.next_page.as_slice(), Action::NextPage),
            (self.prev_page.as_slice(), Action::PrevPage),
            (self.next_pane.as_slice(), Action::NextPane),
            (self.prev_pane.as_slice(), Action::PrevPane),
            (self.select.as_slice(), Action::Select),
            (self.back.as_slice(), Action::Back),
            (self.next_category.as_slice(), Action::NextCategory),
            (self.toggle_bookmark.as_slice(), Action::ToggleBookmark),
            (self.next_link.as_slice(), Action::NextLink),
            (self.open_link.as_slice(), Action::OpenLink),
            (self.share.as_slice(), Action::Share),
            (self.refresh.as_slice(), Action::Refresh),
            (self.toggle_maximize.as_slice(), Action::ToggleMaximize),
        ];

        table
            .into_iter()
            .find(|(bindings, _)| is_bound(bindings, key))
            .map(|(_, action)| action)
            .unwrap_or(Action::None)
    }
}

/// Unparseable bindings never match.
fn is_bound(bindings: &[String], key: &KeyEvent) -> bool {
    bindings
        .iter()
        .filter_map(|binding| parse_key_string(binding).ok())
        .any(|binding| binding.matches(key))
}

/// A parsed key binding with code and modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Shift is implied by the character itself, so "R" matches Shift+R.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        self.code == key.code
            && (self.modifiers == key.modifiers
                || self.modifiers == key.modifiers - KeyModifiers::SHIFT)
    }
}

const NAMED_KEYS: [(&str, KeyCode); 22] = [
    ("enter", KeyCode::Enter),
    ("return", KeyCode::Enter),
    ("tab", KeyCode::Tab),
    ("backtab", KeyCode::BackTab),
    ("backspace", KeyCode::Backspace),
    ("bs", KeyCode::Backspace),
    ("delete", KeyCode::Delete),
    ("del", KeyCode::Delete),
    ("home", KeyCode::Home),
    ("end", KeyCode::End),
    ("pageup", KeyCode::PageUp),
    ("pgup", KeyCode::PageUp),
    ("pagedown", KeyCode::PageDown),
    ("pgdn", KeyCode::PageDown),
    ("up", KeyCode::Up),
    ("down", KeyCode::Down),
    ("left", KeyCode::Left),
    ("right", KeyCode::Right),
    ("esc", KeyCode::Esc),
    ("escape", KeyCode::Esc),
    ("space", KeyCode::Char(' ')),
    ("spacebar", KeyCode::Char(' ')),
];

/// Parse a binding such as "j", "PageDown", "F5" or "Ctrl+Shift+a".
pub fn parse_key_string(s: &str) -> Result<KeyBinding, String> {
    let mut parts = s.trim().split('+').rev();
    let key = parts.next().unwrap_or_default();

    let modifiers = parts.try_fold(KeyModifiers::NONE, |acc, part| {
        parse_modifier(part).map(|modifier| acc | modifier)
    })?;

    Ok(KeyBinding {
        code: parse_key_code(key)?,
        modifiers,
    })
}

fn parse_modifier(s: &str) -> Result<KeyModifiers, String> {
    match s.to_ascii_lowercase().as_str() {
        "ctrl" | "control" => Ok(KeyModifiers::CONTROL),
        "shift" => Ok(KeyModifiers::SHIFT),
        "alt" => Ok(KeyModifiers::ALT),
        _ => Err(format!("Unknown modifier: {}", s)),
    }
}

fn parse_key_code(s: &str) -> Result<KeyCode, String> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    let lower = s.to_ascii_lowercase();
    if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
        return match n {
            1..=12 => Ok(KeyCode::F(n)),
            _ => Err(format!("Unknown key: {}", s)),
        };
    }

    NAMED_KEYS
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, code)| *code)
        .ok_or_else(|| format!("Unknown key: {}", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_default_reader_actions() {
        let config = KeybindingConfig::default();
        let cases = [
            (KeyCode::Char('q'), KeyModifiers::NONE, Action::Quit),
            (KeyCode::Char('j'), KeyModifiers::NONE, Action::MoveDown),
            (KeyCode::Enter, KeyModifiers::NONE, Action::Select),
            (KeyCode::Esc, KeyModifiers::NONE, Action::Back),
            (KeyCode::Backspace, KeyModifiers::NONE, Action::Back),
            (KeyCode::Char('b'), KeyModifiers::NONE, Action::ToggleBookmark),
            (KeyCode::Char('l'), KeyModifiers::NONE, Action::NextLink),
            (KeyCode::Char('o'), KeyModifiers::NONE, Action::OpenLink),
            (KeyCode::Char('s'), KeyModifiers::NONE, Action::Share),
            (KeyCode::Char('R'), KeyModifiers::SHIFT, Action::Refresh),
            (KeyCode::BackTab, KeyModifiers::SHIFT, Action::PrevPane),
            (KeyCode::Char('x'), KeyModifiers::NONE, Action::None),
        ];

        for (code, modifiers, action) in cases {
            assert_eq!(config.get_action(&press(code, modifiers)), action, "{:?}", code);
        }
    }

    #[test]
    fn test_ctrl_c_quits_but_c_changes_category() {
        let config = KeybindingConfig::default();
        assert_eq!(
            config.get_action(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
        assert_eq!(
            config.get_action(&press(KeyCode::Char('c'), KeyModifiers::NONE)),
            Action::NextCategory
        );
    }

    #[test]
    fn test_custom_share_bindings() {
        let config: KeybindingConfig =
            toml::from_str(r#"share = ["Ctrl+s", "F5", "Hyper+x", "F13"]"#).unwrap();

        assert_eq!(
            config.get_action(&press(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            Action::Share
        );
        assert_eq!(
            config.get_action(&press(KeyCode::F(5), KeyModifiers::NONE)),
            Action::Share
        );
        assert_eq!(
            config.get_action(&press(KeyCode::Char('s'), KeyModifiers::NONE)),
            Action::None
        );
        // Other actions keep their defaults
        assert_eq!(
            config.get_action(&press(KeyCode::Char('o'), KeyModifiers::NONE)),
            Action::OpenLink
        );
    }

    #[test]
    fn test_invalid_bindings_rejected() {
        assert!(parse_key_string("Hyper+x").is_err());
        assert!(parse_key_string("F13").is_err());
        assert!(parse_key_string("F0").is_err());
        assert!(parse_key_string("Ctrl+").is_err());
    }

    #[test]
    fn test_parse_multibyte_char() {
        let binding = parse_key_string("é").unwrap();
        assert_eq!(binding.code, KeyCode::Char('é'));
    }
}
