use async_trait::async_trait;

use crate::app::{BroadsheetError, Result};
use crate::domain::{Article, ArticleSummary, Category};
use crate::source::ContentSource;

const BUILTIN_ARTICLES: &str = include_str!("../../assets/fallback_articles.json");

/// Serves a fixed, in-memory set of articles.
///
/// Used when the content API is unreachable or returns nothing, and as the
/// source of default values for fields the API leaves out.
#[derive(Debug, Clone)]
pub struct FallbackSource {
    articles: Vec<Article>,
}

impl FallbackSource {
    pub fn new(articles: Vec<Article>) -> Result<Self> {
        if articles.is_empty() {
            return Err(BroadsheetError::Config(
                "Fallback dataset must contain at least one article".into(),
            ));
        }
        Ok(Self { articles })
    }

    /// The dataset shipped with the binary.
    pub fn builtin() -> Result<Self> {
        let articles: Vec<Article> = serde_json::from_str(BUILTIN_ARTICLES)?;
        Self::new(articles)
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Featured article and the source of default field values.
    pub fn first(&self) -> &Article {
        &self.articles[0]
    }

    pub fn find(&self, id: &str) -> Option<&Article> {
        self.articles
            .iter()
            .find(|a| a.id == id || a.slug.as_deref() == Some(id))
    }

    pub fn summaries(&self) -> Vec<ArticleSummary> {
        self.articles.iter().map(Article::summary).collect()
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<Category> {
        let mut categories: Vec<Category> = Vec::new();
        for article in &self.articles {
            if article.category.is_empty()
                || categories.iter().any(|c| c.title == article.category)
            {
                continue;
            }
            categories.push(Category {
                id: article.category.to_lowercase().replace(' ', "-"),
                title: article.category.clone(),
            });
        }
        categories
    }
}

#[async_trait]
impl ContentSource for FallbackSource {
    async fn list_articles(&self) -> Result<Vec<ArticleSummary>> {
        Ok(self.summaries())
    }

    async fn get_article(&self, id: &str) -> Result<Option<Article>> {
        Ok(self.find(id).cloned())
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        Ok(self.categories())
    }
}
