//! Rich content rendering.
//!
//! Turns an article body into an ordered list of [`PresentationNode`]s. A
//! structured block tree renders in block mode; without one, the plain-text
//! body is split into paragraphs and rendered in fallback mode. The two modes
//! never mix within one article.
//!
//! Block-mode rules, first match wins:
//!
//! 1. image block: an image node if the asset resolves, otherwise nothing
//! 2. bullet list item: a bullet node
//! 3. first block, not a blockquote/h1/h2, with text: a drop cap
//! 4. blockquote: a quote node with the plain text
//! 5. h1..h4: a heading node
//! 6. anything else: a paragraph node
//!
//! Rendering is a pure function of its inputs and never fails; blocks it
//! cannot show are left out.

mod node;
mod options;

pub use node::{links, DecoratedSpan, PresentationNode};
pub use options::RenderOptions;

use crate::domain::content::{MARK_EM, MARK_STRONG};
use crate::domain::{Article, BlockStyle, ContentBlock, ListItem, Span, TextBlock, UnknownBlock};
use crate::source::AssetResolver;

/// Render an article body, picking block or fallback mode.
pub fn render(
    article: &Article,
    options: &RenderOptions,
    resolver: &dyn AssetResolver,
) -> Vec<PresentationNode> {
    match article.blocks.as_deref() {
        Some(blocks) if !blocks.is_empty() => render_blocks(blocks, options, resolver),
        _ => render_plain_text(&article.plain_text, options),
    }
}

pub fn render_blocks(
    blocks: &[ContentBlock],
    options: &RenderOptions,
    resolver: &dyn AssetResolver,
) -> Vec<PresentationNode> {
    blocks
        .iter()
        .enumerate()
        .filter_map(|(index, block)| render_block(index, block, options, resolver))
        .collect()
}

fn render_block(
    index: usize,
    block: &ContentBlock,
    options: &RenderOptions,
    resolver: &dyn AssetResolver,
) -> Option<PresentationNode> {
    match block {
        ContentBlock::Image(image) => {
            let url = image
                .asset
                .as_ref()
                .and_then(|asset| resolver.resolve(asset, options.image_width));
            if url.is_none() {
                tracing::debug!(index, "Skipping image block without a resolvable asset");
            }
            url.map(|url| PresentationNode::Image { url })
        }
        ContentBlock::Text(text) => Some(render_text_block(index, text, options)),
        ContentBlock::Unknown(UnknownBlock { raw: Some(raw) }) => {
            Some(PresentationNode::paragraph(raw.clone()))
        }
        ContentBlock::Unknown(UnknownBlock { raw: None }) => {
            tracing::debug!(index, "Skipping unrecognized block");
            None
        }
    }
}

fn render_text_block(index: usize, block: &TextBlock, options: &RenderOptions) -> PresentationNode {
    if block.list_item == ListItem::Bullet {
        return PresentationNode::Bullet {
            prefix: options.bullet_prefix.clone(),
            spans: decorate_spans(block, options),
        };
    }

    // Drop cap and quote use the bare combined text; marks are not applied.
    let combined = block.combined_text();

    let drop_cap_style = !matches!(
        block.style,
        BlockStyle::Blockquote | BlockStyle::H1 | BlockStyle::H2
    );
    if index == 0 && drop_cap_style {
        if let Some(node) = PresentationNode::drop_cap(&combined) {
            return node;
        }
    }

    if block.style == BlockStyle::Blockquote {
        return PresentationNode::Quote { text: combined };
    }

    if let Some(level) = block.style.heading_level() {
        return PresentationNode::Heading {
            level,
            spans: decorate_spans(block, options),
        };
    }

    PresentationNode::Paragraph {
        spans: decorate_spans(block, options),
    }
}

fn decorate_spans(block: &TextBlock, options: &RenderOptions) -> Vec<DecoratedSpan> {
    block
        .spans
        .iter()
        .map(|span| decorate_span(span, block, options))
        .collect()
}

/// Resolve a span's marks against its block's mark definitions.
pub fn decorate_span(span: &Span, block: &TextBlock, options: &RenderOptions) -> DecoratedSpan {
    let bold = span.has_mark(MARK_STRONG);
    let italic = span.has_mark(MARK_EM);
    let text = if bold {
        format!("{}{}", options.strong_prefix, span.text)
    } else {
        span.text.clone()
    };

    DecoratedSpan {
        text,
        bold,
        italic,
        link: block.link_for(span).map(str::to_string),
    }
}

/// Fallback mode: split on the paragraph delimiter and render each segment.
pub fn render_plain_text(text: &str, options: &RenderOptions) -> Vec<PresentationNode> {
    text.split(options.delimiter())
        .enumerate()
        .map(|(index, segment)| {
            if index == 0 {
                if let Some(node) = PresentationNode::drop_cap(segment) {
                    return node;
                }
            }
            if options.is_quote(segment) {
                PresentationNode::Quote {
                    text: segment.to_string(),
                }
            } else {
                PresentationNode::paragraph(segment)
            }
        })
        .collect()
}
