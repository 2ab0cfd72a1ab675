//! The rich content tree of an article body.
//!
//! A body is an ordered sequence of [`ContentBlock`]s. The tree is built once
//! from a content source response and never mutated afterwards.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Mark id for bold text.
pub const MARK_STRONG: &str = "strong";
/// Mark id for italic text.
pub const MARK_EM: &str = "em";

/// One block of an article body.
///
/// Deserialization never fails on an individual block: a bare string becomes
/// an unknown block carrying the text, and anything else unrecognized
/// becomes an empty unknown block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Image(ImageBlock),
    Text(TextBlock),
    Unknown(UnknownBlock),
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum TaggedBlock {
    Image(ImageBlock),
    Text(TextBlock),
    Unknown(UnknownBlock),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireBlock {
    Bare(String),
    Tagged(TaggedBlock),
    Other(serde::de::IgnoredAny),
}

impl<'de> Deserialize<'de> for ContentBlock {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match WireBlock::deserialize(deserializer)? {
            WireBlock::Bare(raw) => ContentBlock::Unknown(UnknownBlock { raw: Some(raw) }),
            WireBlock::Tagged(TaggedBlock::Image(block)) => ContentBlock::Image(block),
            WireBlock::Tagged(TaggedBlock::Text(block)) => ContentBlock::Text(block),
            WireBlock::Tagged(TaggedBlock::Unknown(block)) => ContentBlock::Unknown(block),
            WireBlock::Other(_) => ContentBlock::Unknown(UnknownBlock { raw: None }),
        })
    }
}

impl ContentBlock {
    /// Concatenated span text of a text block, the raw payload of an unknown
    /// bare-string block, and empty for everything else.
    pub fn plain_text(&self) -> String {
        match self {
            ContentBlock::Text(block) => block.combined_text(),
            ContentBlock::Unknown(UnknownBlock { raw: Some(raw) }) => raw.clone(),
            _ => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageBlock {
    #[serde(default, rename = "assetRef")]
    pub asset: Option<AssetRef>,
}

/// Reference to an image asset, resolved to a display URL by an
/// [`AssetResolver`](crate::source::AssetResolver).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetRef {
    /// Asset document id, e.g. `image-Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000-jpg`.
    Reference(String),
    /// An already dereferenced asset URL.
    Url(String),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TextBlock {
    pub style: BlockStyle,
    #[serde(rename = "listItem")]
    pub list_item: ListItem,
    pub spans: Vec<Span>,
    #[serde(rename = "markDefs")]
    pub mark_defs: HashMap<String, MarkDef>,
}

impl TextBlock {
    pub fn new(spans: Vec<Span>) -> Self {
        Self {
            spans,
            ..Self::default()
        }
    }

    pub fn with_style(mut self, style: BlockStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_list_item(mut self, list_item: ListItem) -> Self {
        self.list_item = list_item;
        self
    }

    pub fn with_mark_def(mut self, key: impl Into<String>, def: MarkDef) -> Self {
        self.mark_defs.insert(key.into(), def);
        self
    }

    /// All span texts joined, marks ignored.
    pub fn combined_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// The href of the first mark on `span` whose definition is a link with a
    /// non-empty target, in the span's own mark order.
    pub fn link_for(&self, span: &Span) -> Option<&str> {
        span.marks.iter().find_map(|mark| {
            self.mark_defs
                .get(mark)
                .filter(|def| def.kind == MarkKind::Link)
                .and_then(|def| def.href.as_deref())
                .filter(|href| !href.is_empty())
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockStyle {
    #[default]
    Normal,
    H1,
    H2,
    H3,
    H4,
    Blockquote,
}

impl BlockStyle {
    /// Lenient parse: unrecognized styles render as normal paragraphs.
    pub fn parse(s: &str) -> Self {
        match s {
            "h1" => BlockStyle::H1,
            "h2" => BlockStyle::H2,
            "h3" => BlockStyle::H3,
            "h4" => BlockStyle::H4,
            "blockquote" => BlockStyle::Blockquote,
            _ => BlockStyle::Normal,
        }
    }

    pub fn heading_level(self) -> Option<u8> {
        match self {
            BlockStyle::H1 => Some(1),
            BlockStyle::H2 => Some(2),
            BlockStyle::H3 => Some(3),
            BlockStyle::H4 => Some(4),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for BlockStyle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(BlockStyle::parse(&s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListItem {
    #[default]
    None,
    Bullet,
}

impl ListItem {
    pub fn parse(s: &str) -> Self {
        match s {
            "bullet" => ListItem::Bullet,
            _ => ListItem::None,
        }
    }
}

impl<'de> Deserialize<'de> for ListItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ListItem::parse(&s))
    }
}

/// A run of text sharing one mark set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Span {
    pub text: String,
    pub marks: Vec<String>,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    pub fn marked(text: impl Into<String>, marks: &[&str]) -> Self {
        Self {
            text: text.into(),
            marks: marks.iter().map(|m| m.to_string()).collect(),
        }
    }

    pub fn has_mark(&self, mark: &str) -> bool {
        self.marks.iter().any(|m| m == mark)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkKind {
    Link,
    #[default]
    Other,
}

impl MarkKind {
    pub fn parse(s: &str) -> Self {
        match s {
            "link" => MarkKind::Link,
            _ => MarkKind::Other,
        }
    }
}

impl<'de> Deserialize<'de> for MarkKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(MarkKind::parse(&s))
    }
}

/// Out-of-line payload for annotation marks.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkDef {
    pub kind: MarkKind,
    pub href: Option<String>,
}

impl MarkDef {
    pub fn link(href: impl Into<String>) -> Self {
        Self {
            kind: MarkKind::Link,
            href: Some(href.into()),
        }
    }
}

/// A block shape the renderer does not know.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UnknownBlock {
    /// Set only when the block arrived as a bare string.
    pub raw: Option<String>,
}
