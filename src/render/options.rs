use serde::Deserialize;

pub const DEFAULT_PARAGRAPH_DELIMITER: &str = "\n\n";

/// Glyphs and heuristics used by the renderer.
///
/// Loaded from the `[reader]` table of the config file; every field falls
/// back to its default when absent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Shown before every bullet list item.
    pub bullet_prefix: String,
    /// Prepended to the text of every strong span.
    pub strong_prefix: String,
    /// Plain-text paragraphs starting with one of these render as quotes.
    pub quote_triggers: Vec<String>,
    /// Separates paragraphs in plain-text bodies.
    pub paragraph_delimiter: String,
    /// Width requested for inline images.
    pub image_width: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            bullet_prefix: "🔥".to_string(),
            strong_prefix: "🔥 ".to_string(),
            quote_triggers: vec!["Well, with our".to_string(), "The key to".to_string()],
            paragraph_delimiter: DEFAULT_PARAGRAPH_DELIMITER.to_string(),
            image_width: 1200,
        }
    }
}

impl RenderOptions {
    pub fn is_quote(&self, segment: &str) -> bool {
        self.quote_triggers
            .iter()
            .any(|trigger| !trigger.is_empty() && segment.starts_with(trigger.as_str()))
    }

    /// The configured delimiter, or the default when it is empty.
    pub fn delimiter(&self) -> &str {
        if self.paragraph_delimiter.is_empty() {
            DEFAULT_PARAGRAPH_DELIMITER
        } else {
            &self.paragraph_delimiter
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_triggers_match_prefix_only() {
        let options = RenderOptions::default();
        assert!(options.is_quote("Well, with our plan..."));
        assert!(options.is_quote("The key to perfect dumplings"));
        assert!(!options.is_quote("And the key to it"));
        assert!(!options.is_quote(" Well, with our plan"));
    }

    #[test]
    fn test_empty_trigger_never_matches() {
        let options = RenderOptions {
            quote_triggers: vec![String::new()],
            ..RenderOptions::default()
        };
        assert!(!options.is_quote("anything"));
    }

    #[test]
    fn test_empty_delimiter_falls_back() {
        let options = RenderOptions {
            paragraph_delimiter: String::new(),
            ..RenderOptions::default()
        };
        assert_eq!(options.delimiter(), "\n\n");
    }

    #[test]
    fn test_partial_reader_table() {
        let options: RenderOptions = toml::from_str("image_width = 640").unwrap();
        assert_eq!(options.image_width, 640);
        assert_eq!(options.bullet_prefix, "🔥");
    }
}
