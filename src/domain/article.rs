use serde::{Deserialize, Serialize};

use super::content::ContentBlock;

/// A fully loaded article, ready for the reader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    /// Plain-text body, paragraphs separated by a blank line.
    #[serde(default)]
    pub plain_text: String,
    /// Structured body; `None` or empty forces plain-text rendering.
    #[serde(default)]
    pub blocks: Option<Vec<ContentBlock>>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub author_avatar: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub read_time: u32,
    #[serde(default)]
    pub views: u64,
}

impl Article {
    /// True when the structured body is present and non-empty.
    pub fn has_blocks(&self) -> bool {
        self.blocks.as_ref().is_some_and(|b| !b.is_empty())
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "(Untitled)"
        } else {
            &self.title
        }
    }

    /// Text handed to the system share target.
    pub fn share_message(&self) -> String {
        format!(
            "{}\n\nRead more: Check out this article on our news app!",
            self.display_title()
        )
    }

    pub fn summary(&self) -> ArticleSummary {
        ArticleSummary {
            id: self.id.clone(),
            slug: self.slug.clone(),
            title: self.title.clone(),
            image: self.image.clone(),
            author: self.author.clone(),
            author_avatar: self.author_avatar.clone(),
            date: self.date.clone(),
            read_time: self.read_time,
            category: self.category.clone(),
        }
    }
}

/// The subset of an article shown on a home feed card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub id: String,
    pub slug: Option<String>,
    pub title: String,
    pub image: String,
    pub author: String,
    pub author_avatar: String,
    pub date: String,
    pub read_time: u32,
    pub category: String,
}

impl ArticleSummary {
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "(Untitled)"
        } else {
            &self.title
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub title: String,
}

/// Which articles the home feed shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FeedFilter {
    #[default]
    All,
    Category(String),
}

impl FeedFilter {
    pub const ALL_LABEL: &'static str = "All posts";

    /// The filter pills offered on the home feed.
    pub fn defaults() -> Vec<FeedFilter> {
        vec![
            FeedFilter::All,
            FeedFilter::Category("Strategies".into()),
            FeedFilter::Category("Market Insight".into()),
        ]
    }

    pub fn from_label(label: &str) -> Self {
        if label.eq_ignore_ascii_case(Self::ALL_LABEL) {
            FeedFilter::All
        } else {
            FeedFilter::Category(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            FeedFilter::All => Self::ALL_LABEL,
            FeedFilter::Category(title) => title,
        }
    }

    pub fn matches(&self, summary: &ArticleSummary) -> bool {
        match self {
            FeedFilter::All => true,
            FeedFilter::Category(title) => summary.category == *title,
        }
    }

    pub fn apply(&self, summaries: Vec<ArticleSummary>) -> Vec<ArticleSummary> {
        summaries.into_iter().filter(|s| self.matches(s)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::{Span, TextBlock};

    fn article(id: &str, category: &str) -> Article {
        Article {
            id: id.into(),
            slug: None,
            title: format!("Article {}", id),
            excerpt: None,
            plain_text: String::new(),
            blocks: None,
            image: String::new(),
            author: String::new(),
            author_avatar: String::new(),
            date: String::new(),
            category: category.into(),
            read_time: 5,
            views: 0,
        }
    }

    #[test]
    fn test_has_blocks() {
        let mut a = article("1", "News");
        assert!(!a.has_blocks());

        a.blocks = Some(Vec::new());
        assert!(!a.has_blocks());

        a.blocks = Some(vec![ContentBlock::Text(TextBlock::new(vec![Span::plain("x")]))]);
        assert!(a.has_blocks());
    }

    #[test]
    fn test_share_message() {
        let a = article("7", "Media");
        assert_eq!(
            a.share_message(),
            "Article 7\n\nRead more: Check out this article on our news app!"
        );
    }

    #[test]
    fn test_display_title_without_title() {
        let mut a = article("1", "News");
        a.title.clear();
        assert_eq!(a.display_title(), "(Untitled)");
        assert_eq!(a.summary().display_title(), "(Untitled)");
    }

    #[test]
    fn test_filter_all_keeps_everything() {
        let summaries = vec![article("1", "News").summary(), article("2", "").summary()];
        assert_eq!(FeedFilter::All.apply(summaries).len(), 2);
    }

    #[test]
    fn test_filter_by_category_is_exact() {
        let summaries = vec![
            article("1", "Strategies").summary(),
            article("2", "Market Insight").summary(),
            article("3", "strategies").summary(),
        ];
        let kept = FeedFilter::Category("Strategies".into()).apply(summaries);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "1");
    }

    #[test]
    fn test_filter_labels_round_trip() {
        for filter in FeedFilter::defaults() {
            assert_eq!(FeedFilter::from_label(filter.label()), filter);
        }
        assert_eq!(FeedFilter::from_label("all posts"), FeedFilter::All);
    }
}
