pub mod article;
pub mod content;

pub use article::{Article, ArticleSummary, Category, FeedFilter};
pub use content::{
    AssetRef, BlockStyle, ContentBlock, ImageBlock, ListItem, MarkDef, MarkKind, Span, TextBlock,
    UnknownBlock,
};
