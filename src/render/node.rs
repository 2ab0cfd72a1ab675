use serde::Serialize;

/// One unit of rendered article output.
///
/// The renderer decides structure, text and link targets only; visual
/// styling is left to whichever front end draws the nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum PresentationNode {
    /// Opening block with an enlarged first character.
    DropCap { first: String, rest: String },
    Quote { text: String },
    Heading { level: u8, spans: Vec<DecoratedSpan> },
    Bullet { prefix: String, spans: Vec<DecoratedSpan> },
    Paragraph { spans: Vec<DecoratedSpan> },
    Image { url: String },
}

impl PresentationNode {
    /// A paragraph holding one undecorated span.
    pub fn paragraph(text: impl Into<String>) -> Self {
        PresentationNode::Paragraph {
            spans: vec![DecoratedSpan::plain(text)],
        }
    }

    /// Splits `text` after its first character. Empty text has no drop cap.
    pub fn drop_cap(text: &str) -> Option<Self> {
        let mut chars = text.chars();
        let first = chars.next()?;
        Some(PresentationNode::DropCap {
            first: first.to_string(),
            rest: chars.as_str().to_string(),
        })
    }

    /// Displayed text of the node, without styling. Images have none.
    pub fn plain_text(&self) -> String {
        match self {
            PresentationNode::DropCap { first, rest } => format!("{}{}", first, rest),
            PresentationNode::Quote { text } => text.clone(),
            PresentationNode::Heading { spans, .. } | PresentationNode::Paragraph { spans } => {
                spans.iter().map(|s| s.text.as_str()).collect()
            }
            PresentationNode::Bullet { prefix, spans } => {
                let body: String = spans.iter().map(|s| s.text.as_str()).collect();
                format!("{} {}", prefix, body)
            }
            PresentationNode::Image { .. } => String::new(),
        }
    }

    pub fn spans(&self) -> &[DecoratedSpan] {
        match self {
            PresentationNode::Heading { spans, .. }
            | PresentationNode::Bullet { spans, .. }
            | PresentationNode::Paragraph { spans } => spans,
            _ => &[],
        }
    }
}

/// A span after mark resolution.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DecoratedSpan {
    /// Text as shown, including any strong prefix.
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    /// Target opened by the external handler when the span is activated.
    pub link: Option<String>,
}

impl DecoratedSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.link.is_some()
    }
}

/// Every link target in `nodes`, in reading order.
pub fn links(nodes: &[PresentationNode]) -> Vec<&str> {
    nodes
        .iter()
        .flat_map(|node| node.spans())
        .filter_map(|span| span.link.as_deref())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_cap_splits_first_char() {
        assert_eq!(
            PresentationNode::drop_cap("A."),
            Some(PresentationNode::DropCap {
                first: "A".into(),
                rest: ".".into()
            })
        );
    }

    #[test]
    fn test_drop_cap_multibyte_first_char() {
        let node = PresentationNode::drop_cap("Ärger").unwrap();
        assert_eq!(
            node,
            PresentationNode::DropCap {
                first: "Ä".into(),
                rest: "rger".into()
            }
        );
    }

    #[test]
    fn test_drop_cap_empty() {
        assert_eq!(PresentationNode::drop_cap(""), None);
    }

    #[test]
    fn test_plain_text() {
        let bullet = PresentationNode::Bullet {
            prefix: "🔥".into(),
            spans: vec![DecoratedSpan::plain("one"), DecoratedSpan::plain(" two")],
        };
        assert_eq!(bullet.plain_text(), "🔥 one two");
        assert_eq!(
            PresentationNode::Image { url: "u".into() }.plain_text(),
            ""
        );
    }

    #[test]
    fn test_links_in_reading_order() {
        let linked = |text: &str, href: &str| DecoratedSpan {
            text: text.into(),
            link: Some(href.into()),
            ..DecoratedSpan::default()
        };
        let nodes = vec![
            PresentationNode::Paragraph {
                spans: vec![DecoratedSpan::plain("a"), linked("b", "https://b")],
            },
            PresentationNode::Quote { text: "q".into() },
            PresentationNode::Bullet {
                prefix: "🔥".into(),
                spans: vec![linked("c", "https://c")],
            },
        ];
        assert_eq!(links(&nodes), vec!["https://b", "https://c"]);
        assert!(nodes[0].spans()[1].is_interactive());
        assert!(!nodes[0].spans()[0].is_interactive());
    }
}
