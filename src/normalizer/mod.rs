use std::collections::HashMap;

use chrono::{DateTime, NaiveDate};
use html_escape::decode_html_entities;
use serde::Deserialize;
use serde_json::Value;

use crate::app::Result;
use crate::domain::{
    Article, ArticleSummary, AssetRef, BlockStyle, Category, ContentBlock, ImageBlock, ListItem,
    MarkDef, MarkKind, Span, TextBlock, UnknownBlock,
};
use crate::source::{AssetResolver, ContentConfig, ImageUrlBuilder};

const DEFAULT_READ_TIME: u32 = 5;
const UNKNOWN_AUTHOR: &str = "Unknown";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPost {
    #[serde(rename = "_id")]
    id: String,
    title: Option<String>,
    slug: Option<RawSlug>,
    main_image: Option<RawImage>,
    #[serde(default)]
    body: Value,
    published_at: Option<String>,
    excerpt: Option<String>,
    author: Option<RawAuthor>,
    author_image: Option<RawImage>,
    #[serde(default)]
    categories: Option<Vec<Option<RawCategory>>>,
    views: Option<u64>,
    read_time: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawSlug {
    current: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawImage {
    asset: Option<RawAsset>,
}

#[derive(Debug, Deserialize)]
struct RawAsset {
    #[serde(rename = "_ref")]
    reference: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawAuthor {
    Name(String),
    Profile {
        name: Option<String>,
        image: Option<RawImage>,
    },
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    #[serde(rename = "_id")]
    id: Option<String>,
    title: Option<String>,
}

/// Field values used when a post leaves them out.
#[derive(Debug, Clone)]
pub struct ArticleDefaults {
    pub image: String,
    pub author: String,
    pub author_avatar: String,
    pub date: String,
    pub category: String,
    pub read_time: u32,
    pub views: u64,
}

impl ArticleDefaults {
    pub fn from_article(article: &Article) -> Self {
        Self {
            image: article.image.clone(),
            author: article.author.clone(),
            author_avatar: article.author_avatar.clone(),
            date: article.date.clone(),
            category: article.category.clone(),
            read_time: article.read_time,
            views: article.views,
        }
    }
}

/// Maps raw content API documents into domain models.
#[derive(Debug, Clone)]
pub struct Normalizer {
    images: ImageUrlBuilder,
    defaults: ArticleDefaults,
    card_image_width: u32,
    hero_image_width: u32,
    avatar_width: u32,
}

impl Normalizer {
    pub fn new(config: &ContentConfig, defaults: ArticleDefaults) -> Self {
        Self {
            images: ImageUrlBuilder::from_config(config),
            defaults,
            card_image_width: config.card_image_width,
            hero_image_width: config.hero_image_width,
            avatar_width: config.avatar_width,
        }
    }

    /// Normalize a feed listing: an array of post documents.
    pub fn normalize_summaries(&self, value: Value) -> Result<Vec<ArticleSummary>> {
        let posts: Option<Vec<Option<RawPost>>> = serde_json::from_value(value)?;
        Ok(posts
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .map(|post| self.summary_from(post))
            .collect())
    }

    /// Normalize a single post document. `null` means not found.
    pub fn normalize_article(&self, value: Value) -> Result<Option<Article>> {
        let post: Option<RawPost> = serde_json::from_value(value)?;
        Ok(post.map(|post| self.article_from(post)))
    }

    pub fn normalize_categories(&self, value: Value) -> Result<Vec<Category>> {
        let categories: Option<Vec<Option<RawCategory>>> = serde_json::from_value(value)?;
        Ok(categories
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .filter_map(|c| {
                Some(Category {
                    id: c.id?,
                    title: decode(c.title?),
                })
            })
            .collect())
    }

    fn summary_from(&self, post: RawPost) -> ArticleSummary {
        let (author, author_image) = split_author(post.author, post.author_image);
        ArticleSummary {
            id: post.id,
            slug: post.slug.and_then(|s| s.current),
            title: decode(post.title.unwrap_or_default()),
            image: self
                .image_url(post.main_image.as_ref(), self.card_image_width)
                .unwrap_or_else(|| self.defaults.image.clone()),
            author: author.unwrap_or_else(|| self.defaults.author.clone()),
            author_avatar: self
                .image_url(author_image.as_ref(), self.avatar_width)
                .unwrap_or_else(|| self.defaults.author_avatar.clone()),
            date: self.display_date(post.published_at.as_deref()),
            read_time: post
                .read_time
                .filter(|&t| t > 0)
                .unwrap_or(if self.defaults.read_time > 0 {
                    self.defaults.read_time
                } else {
                    DEFAULT_READ_TIME
                }),
            category: first_category(post.categories).unwrap_or_default(),
        }
    }

    fn article_from(&self, post: RawPost) -> Article {
        let (author, author_image) = split_author(post.author, post.author_image);
        let excerpt = post.excerpt.map(decode);
        let plain_text = plain_text(&post.body, excerpt.as_deref());
        let blocks = parse_blocks(&post.body);

        Article {
            id: post.id,
            slug: post.slug.and_then(|s| s.current),
            title: decode(post.title.unwrap_or_default()),
            excerpt,
            plain_text,
            blocks,
            image: self
                .image_url(post.main_image.as_ref(), self.hero_image_width)
                .unwrap_or_else(|| self.defaults.image.clone()),
            author: author.unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            author_avatar: self
                .image_url(author_image.as_ref(), self.avatar_width)
                .unwrap_or_else(|| self.defaults.author_avatar.clone()),
            date: self.display_date(post.published_at.as_deref()),
            category: first_category(post.categories)
                .unwrap_or_else(|| self.defaults.category.clone()),
            read_time: post.read_time.unwrap_or(self.defaults.read_time),
            views: post
                .views
                .filter(|&v| v > 0)
                .unwrap_or(self.defaults.views),
        }
    }

    fn image_url(&self, image: Option<&RawImage>, width: u32) -> Option<String> {
        let asset = asset_ref(image?.asset.as_ref()?)?;
        self.images.resolve(&asset, width)
    }

    fn display_date(&self, published_at: Option<&str>) -> String {
        published_at
            .and_then(format_date)
            .unwrap_or_else(|| self.defaults.date.clone())
    }
}

fn decode(s: String) -> String {
    decode_html_entities(&s).to_string()
}

fn split_author(
    author: Option<RawAuthor>,
    author_image: Option<RawImage>,
) -> (Option<String>, Option<RawImage>) {
    match author {
        Some(RawAuthor::Name(name)) => (Some(name).filter(|n| !n.is_empty()), author_image),
        Some(RawAuthor::Profile { name, image }) => {
            (name.filter(|n| !n.is_empty()), image.or(author_image))
        }
        None => (None, author_image),
    }
}

fn first_category(categories: Option<Vec<Option<RawCategory>>>) -> Option<String> {
    categories?
        .into_iter()
        .next()
        .flatten()
        .and_then(|c| c.title)
        .map(decode)
}

fn asset_ref(asset: &RawAsset) -> Option<AssetRef> {
    if let Some(reference) = asset.reference.as_ref().filter(|r| !r.is_empty()) {
        return Some(AssetRef::Reference(reference.clone()));
    }
    asset
        .url
        .as_ref()
        .filter(|u| !u.is_empty())
        .map(|u| AssetRef::Url(u.clone()))
}

/// Format an RFC 3339 timestamp or plain date as `10 Jan, 2020`.
pub fn format_date(raw: &str) -> Option<String> {
    const DISPLAY: &str = "%d %b, %Y";

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.format(DISPLAY).to_string());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| d.format(DISPLAY).to_string())
}

/// Parse a Portable Text body. Only an array yields blocks.
pub fn parse_blocks(body: &Value) -> Option<Vec<ContentBlock>> {
    body.as_array()
        .map(|items| items.iter().map(parse_block).collect())
}

fn parse_block(value: &Value) -> ContentBlock {
    if let Some(raw) = value.as_str() {
        return ContentBlock::Unknown(UnknownBlock {
            raw: Some(raw.to_string()),
        });
    }

    match value.get("_type").and_then(Value::as_str) {
        Some("block") => ContentBlock::Text(parse_text_block(value)),
        Some("image") => ContentBlock::Image(ImageBlock {
            asset: value
                .get("asset")
                .and_then(|a| serde_json::from_value::<RawAsset>(a.clone()).ok())
                .and_then(|a| asset_ref(&a)),
        }),
        _ => ContentBlock::Unknown(UnknownBlock { raw: None }),
    }
}

fn parse_text_block(value: &Value) -> TextBlock {
    let str_field = |key: &str| value.get(key).and_then(Value::as_str);

    let spans = value
        .get("children")
        .and_then(Value::as_array)
        .map(|children| children.iter().map(parse_span).collect())
        .unwrap_or_default();

    let mut mark_defs = HashMap::new();
    if let Some(defs) = value.get("markDefs").and_then(Value::as_array) {
        for def in defs {
            let Some(key) = def.get("_key").and_then(Value::as_str) else {
                continue;
            };
            mark_defs.insert(
                key.to_string(),
                MarkDef {
                    kind: def
                        .get("_type")
                        .and_then(Value::as_str)
                        .map(MarkKind::parse)
                        .unwrap_or_default(),
                    href: def.get("href").and_then(Value::as_str).map(String::from),
                },
            );
        }
    }

    TextBlock {
        style: str_field("style").map(BlockStyle::parse).unwrap_or_default(),
        list_item: str_field("listItem").map(ListItem::parse).unwrap_or_default(),
        spans,
        mark_defs,
    }
}

fn parse_span(value: &Value) -> Span {
    Span {
        text: value
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        marks: value
            .get("marks")
            .and_then(Value::as_array)
            .map(|marks| {
                marks
                    .iter()
                    .filter_map(Value::as_str)
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default(),
    }
}

/// Plain-text rendition of a body, used when no block tree is rendered.
pub fn plain_text(body: &Value, excerpt: Option<&str>) -> String {
    match body {
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match parse_block(item) {
                ContentBlock::Image(_) => String::new(),
                block => block.plain_text(),
            })
            .collect::<Vec<_>>()
            .join("\n\n"),
        _ => excerpt.unwrap_or_default().to_string(),
    }
}
