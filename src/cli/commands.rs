use std::path::Path;

use crate::app::{AppContext, Result};
use crate::domain::{Article, ArticleSummary, FeedFilter};
use crate::render::{self, DecoratedSpan, PresentationNode};

pub async fn list_feed(ctx: &AppContext, category: Option<&str>) -> Result<()> {
    let filter = category.map(FeedFilter::from_label).unwrap_or_default();
    let articles = ctx.load_feed(&filter).await;

    if articles.is_empty() {
        println!("No articles in {}", filter.label());
        return Ok(());
    }

    for (index, summary) in articles.iter().enumerate() {
        println!("{}", format_summary(summary, index == 0));
    }

    Ok(())
}

pub async fn list_categories(ctx: &AppContext) -> Result<()> {
    let categories = ctx.load_categories().await;

    if categories.is_empty() {
        println!("No categories");
        return Ok(());
    }

    for category in categories {
        println!("{}  ({})", category.title, category.id);
    }

    Ok(())
}

pub async fn read_article(ctx: &AppContext, id: &str, share: bool) -> Result<()> {
    let article = ctx.load_article(id).await?;
    if share {
        println!("{}", article.share_message());
        return Ok(());
    }

    let nodes = ctx.render(&article);
    println!("{}", format_article(&article, &nodes));
    Ok(())
}

/// Render an article document read from disk, without touching the network.
pub fn render_file(ctx: &AppContext, path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(path)?;
    let nodes = render_document(ctx, &content)?;

    tracing::debug!("Rendered {} nodes from {}", nodes.len(), path.display());
    println!("{}", format_nodes(&nodes));
    Ok(())
}

/// Parse an article document and render it. Unrecognized blocks degrade
/// instead of failing the document.
pub fn render_document(ctx: &AppContext, content: &str) -> Result<Vec<PresentationNode>> {
    let article: Article = serde_json::from_str(content)?;
    Ok(ctx.render(&article))
}

fn format_summary(summary: &ArticleSummary, featured: bool) -> String {
    let marker = if featured { "*" } else { " " };
    format!(
        "{} {}\n    {} | {} | {} | {} min read  [{}]",
        marker,
        summary.display_title(),
        summary.category,
        summary.author,
        summary.date,
        summary.read_time,
        summary.slug.as_deref().unwrap_or(&summary.id)
    )
}

fn format_article(article: &Article, nodes: &[PresentationNode]) -> String {
    let mut out = format!(
        "{}\n{} | {} | {} min read\n\n",
        article.display_title(),
        article.author,
        article.date,
        article.read_time
    );
    out.push_str(&format_nodes(nodes));
    out
}

/// Plain-text rendition of presentation nodes, one block per node.
pub fn format_nodes(nodes: &[PresentationNode]) -> String {
    let blocks: Vec<String> = nodes.iter().map(format_node).collect();
    let mut out = blocks.join("\n\n");

    let links = render::links(nodes);
    if !links.is_empty() {
        out.push_str("\n\nLinks:");
        for (i, href) in links.iter().enumerate() {
            out.push_str(&format!("\n  [{}] {}", i + 1, href));
        }
    }

    out
}

fn format_node(node: &PresentationNode) -> String {
    match node {
        PresentationNode::DropCap { first, rest } => format!("{}{}", first, rest),
        PresentationNode::Quote { text } => format!("  | {}", text),
        PresentationNode::Heading { level, spans } => {
            format!("{} {}", "#".repeat(*level as usize), format_spans(spans))
        }
        PresentationNode::Bullet { prefix, spans } => format!("{} {}", prefix, format_spans(spans)),
        PresentationNode::Paragraph { spans } => format_spans(spans),
        PresentationNode::Image { url } => format!("[image] {}", url),
    }
}

fn format_spans(spans: &[DecoratedSpan]) -> String {
    spans
        .iter()
        .map(|span| match &span.link {
            Some(href) => format!("{} <{}>", span.text, href),
            None => span.text.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_nodes() {
        let nodes = vec![
            PresentationNode::DropCap {
                first: "D".into(),
                rest: "umplings.".into(),
            },
            PresentationNode::Quote {
                text: "The key to it".into(),
            },
            PresentationNode::Heading {
                level: 2,
                spans: vec![DecoratedSpan::plain("Steps")],
            },
            PresentationNode::Bullet {
                prefix: "🔥".into(),
                spans: vec![DecoratedSpan::plain("Fold")],
            },
            PresentationNode::Paragraph {
                spans: vec![
                    DecoratedSpan::plain("See "),
                    DecoratedSpan {
                        text: "this".into(),
                        link: Some("https://example.com".into()),
                        ..DecoratedSpan::default()
                    },
                ],
            },
            PresentationNode::Image {
                url: "https://cdn.example.com/a.jpg".into(),
            },
        ];

        let text = format_nodes(&nodes);
        assert_eq!(
            text,
            "Dumplings.\n\n  | The key to it\n\n## Steps\n\n🔥 Fold\n\n\
             See this <https://example.com>\n\n[image] https://cdn.example.com/a.jpg\n\n\
             Links:\n  [1] https://example.com"
        );
    }

    #[test]
    fn test_format_summary_marks_featured() {
        let summary = ArticleSummary {
            id: "1".into(),
            slug: None,
            title: "Headline".into(),
            image: String::new(),
            author: "Ana".into(),
            author_avatar: String::new(),
            date: "10 Jan, 2021".into(),
            read_time: 3,
            category: "Media".into(),
        };

        let featured = format_summary(&summary, true);
        assert!(featured.starts_with("* Headline"));
        assert!(featured.ends_with("3 min read  [1]"));
        assert!(format_summary(&summary, false).starts_with("  Headline"));
    }

    fn offline_context() -> AppContext {
        use crate::render::RenderOptions;
        use crate::source::{FallbackSource, ImageUrlBuilder};

        AppContext::with_sources(
            None,
            FallbackSource::builtin().unwrap(),
            ImageUrlBuilder::new("proj", "production"),
            RenderOptions::default(),
        )
    }

    #[test]
    fn test_render_document_with_mixed_blocks() {
        let ctx = offline_context();
        let nodes = render_document(
            &ctx,
            r#"{
                "plainText": "unused",
                "blocks": [
                    {"type": "text", "spans": [{"text": "Lead", "marks": []}]},
                    "a bare string",
                    {"type": "embed", "html": "<iframe>"},
                    {"type": "image", "assetRef": {"reference": "image-abc-10x20-png"}},
                    {"type": "text", "listItem": "bullet", "spans": [{"text": "Point", "marks": []}]}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(
            nodes,
            vec![
                PresentationNode::DropCap {
                    first: "L".into(),
                    rest: "ead".into()
                },
                PresentationNode::paragraph("a bare string"),
                PresentationNode::Image {
                    url: "https://cdn.sanity.io/images/proj/production/abc-10x20.png?w=1200".into()
                },
                PresentationNode::Bullet {
                    prefix: "🔥".into(),
                    spans: vec![DecoratedSpan::plain("Point")]
                },
            ]
        );
    }

    #[test]
    fn test_render_file() {
        use std::io::Write;

        let ctx = offline_context();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"plainText": "Hello.\n\nWorld.", "blocks": null}}"#
        )
        .unwrap();

        assert!(render_file(&ctx, file.path()).is_ok());

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        write!(bad, "not json").unwrap();
        assert!(render_file(&ctx, bad.path()).is_err());
    }
}
