use std::sync::Arc;

use crate::app::error::{BroadsheetError, Result};
use crate::config::Config;
use crate::domain::{Article, ArticleSummary, Category, FeedFilter};
use crate::normalizer::{ArticleDefaults, Normalizer};
use crate::render::{self, PresentationNode, RenderOptions};
use crate::source::{ContentSource, FallbackSource, ImageUrlBuilder, SanitySource};

/// Articles and categories for the home screen.
#[derive(Debug, Clone, Default)]
pub struct Home {
    pub articles: Vec<ArticleSummary>,
    pub categories: Vec<Category>,
}

impl Home {
    /// The article shown on the large card at the top.
    pub fn featured(&self) -> Option<&ArticleSummary> {
        self.articles.first()
    }
}

pub struct AppContext {
    /// `None` in offline mode.
    pub remote: Option<Arc<dyn ContentSource>>,
    pub fallback: Arc<FallbackSource>,
    pub resolver: ImageUrlBuilder,
    pub render_options: RenderOptions,
}

impl AppContext {
    pub fn new(config: &Config, offline: bool) -> Result<Self> {
        let fallback = FallbackSource::builtin()?;
        let resolver = ImageUrlBuilder::from_config(&config.content);

        let remote: Option<Arc<dyn ContentSource>> = if offline || config.content.offline {
            tracing::info!("Offline mode, serving built-in articles");
            None
        } else {
            let defaults = ArticleDefaults::from_article(fallback.first());
            let normalizer = Normalizer::new(&config.content, defaults);
            Some(Arc::new(SanitySource::new(&config.content, normalizer)?))
        };

        Ok(Self::with_sources(
            remote,
            fallback,
            resolver,
            config.reader.clone(),
        ))
    }

    pub fn with_sources(
        remote: Option<Arc<dyn ContentSource>>,
        fallback: FallbackSource,
        resolver: ImageUrlBuilder,
        render_options: RenderOptions,
    ) -> Self {
        Self {
            remote,
            fallback: Arc::new(fallback),
            resolver,
            render_options,
        }
    }

    pub fn is_offline(&self) -> bool {
        self.remote.is_none()
    }

    /// Home feed articles matching `filter`.
    ///
    /// Falls back to the built-in articles when the remote source fails or
    /// has nothing to show.
    pub async fn load_feed(&self, filter: &FeedFilter) -> Vec<ArticleSummary> {
        let articles = match &self.remote {
            Some(remote) => match remote.list_articles().await {
                Ok(articles) if !articles.is_empty() => articles,
                Ok(_) => {
                    tracing::warn!("Content API returned no articles, using built-in articles");
                    self.fallback.summaries()
                }
                Err(e) => {
                    tracing::warn!("Failed to load feed: {}, using built-in articles", e);
                    self.fallback.summaries()
                }
            },
            None => self.fallback.summaries(),
        };
        filter.apply(articles)
    }

    pub async fn load_categories(&self) -> Vec<Category> {
        match &self.remote {
            Some(remote) => match remote.list_categories().await {
                Ok(categories) if !categories.is_empty() => categories,
                Ok(_) => self.fallback.categories(),
                Err(e) => {
                    tracing::warn!("Failed to load categories: {}", e);
                    self.fallback.categories()
                }
            },
            None => self.fallback.categories(),
        }
    }

    /// Feed and categories, fetched concurrently.
    pub async fn load_home(&self, filter: &FeedFilter) -> Home {
        let (articles, categories) =
            futures::future::join(self.load_feed(filter), self.load_categories()).await;
        Home {
            articles,
            categories,
        }
    }

    /// Load one article by slug or id.
    ///
    /// A remote miss or failure falls back to the built-in article with the
    /// same id; if there is none the article is reported as not found.
    pub async fn load_article(&self, id: &str) -> Result<Article> {
        if let Some(remote) = &self.remote {
            match remote.get_article(id).await {
                Ok(Some(article)) => return Ok(article),
                Ok(None) => tracing::debug!("Article {} not found remotely", id),
                Err(e) => tracing::warn!("Failed to load article {}: {}", id, e),
            }
        }

        self.fallback
            .find(id)
            .cloned()
            .ok_or_else(|| BroadsheetError::ArticleNotFound(id.to_string()))
    }

    pub fn render(&self, article: &Article) -> Vec<PresentationNode> {
        render::render(article, &self.render_options, &self.resolver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::domain::{ContentBlock, Span, TextBlock};

    enum Behaviour {
        Fail,
        Empty,
        Serve(Article),
    }

    struct StubSource(Behaviour);

    #[async_trait]
    impl ContentSource for StubSource {
        async fn list_articles(&self) -> Result<Vec<ArticleSummary>> {
            match &self.0 {
                Behaviour::Fail => Err(BroadsheetError::Other("offline".into())),
                Behaviour::Empty => Ok(Vec::new()),
                Behaviour::Serve(article) => Ok(vec![article.summary()]),
            }
        }

        async fn get_article(&self, id: &str) -> Result<Option<Article>> {
            match &self.0 {
                Behaviour::Fail => Err(BroadsheetError::Other("offline".into())),
                Behaviour::Empty => Ok(None),
                Behaviour::Serve(article) => Ok(Some(article.clone()).filter(|a| a.id == id)),
            }
        }

        async fn list_categories(&self) -> Result<Vec<Category>> {
            match &self.0 {
                Behaviour::Fail => Err(BroadsheetError::Other("offline".into())),
                Behaviour::Empty => Ok(Vec::new()),
                Behaviour::Serve(_) => Ok(vec![Category {
                    id: "c1".into(),
                    title: "Strategies".into(),
                }]),
            }
        }
    }

    fn remote_article() -> Article {
        let mut article = FallbackSource::builtin().unwrap().first().clone();
        article.id = "remote-1".into();
        article.category = "Strategies".into();
        article.blocks = Some(vec![ContentBlock::Text(TextBlock::new(vec![Span::plain(
            "Remote body",
        )]))]);
        article
    }

    fn context(behaviour: Option<Behaviour>) -> AppContext {
        AppContext::with_sources(
            behaviour.map(|b| Arc::new(StubSource(b)) as Arc<dyn ContentSource>),
            FallbackSource::builtin().unwrap(),
            ImageUrlBuilder::new("p", "production"),
            RenderOptions::default(),
        )
    }

    #[test]
    fn test_feed_uses_remote_when_available() {
        let ctx = context(Some(Behaviour::Serve(remote_article())));
        let feed = tokio_test::block_on(ctx.load_feed(&FeedFilter::All));
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].id, "remote-1");
    }

    #[test]
    fn test_feed_falls_back_on_failure_and_empty() {
        for behaviour in [Behaviour::Fail, Behaviour::Empty] {
            let ctx = context(Some(behaviour));
            let feed = tokio_test::block_on(ctx.load_feed(&FeedFilter::All));
            assert_eq!(feed.len(), 4);
        }
    }

    #[test]
    fn test_feed_filter_applies_after_fallback() {
        let ctx = context(None);
        let feed = tokio_test::block_on(ctx.load_feed(&FeedFilter::Category("Media".into())));
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].id, "3");

        let none = tokio_test::block_on(ctx.load_feed(&FeedFilter::Category("Strategies".into())));
        assert!(none.is_empty());
    }

    #[test]
    fn test_load_home_featured_first() {
        let ctx = context(Some(Behaviour::Fail));
        let home = tokio_test::block_on(ctx.load_home(&FeedFilter::All));
        assert_eq!(home.featured().map(|a| a.id.as_str()), Some("1"));
        assert_eq!(home.categories.len(), 4);
    }

    #[test]
    fn test_load_article_remote_then_fallback() {
        let ctx = context(Some(Behaviour::Serve(remote_article())));
        let remote = tokio_test::block_on(ctx.load_article("remote-1")).unwrap();
        assert!(remote.has_blocks());

        let local = tokio_test::block_on(ctx.load_article("2")).unwrap();
        assert_eq!(local.id, "2");
    }

    #[test]
    fn test_load_article_failure_falls_back() {
        let ctx = context(Some(Behaviour::Fail));
        let article = tokio_test::block_on(ctx.load_article("4")).unwrap();
        assert!(article.title.contains("Dumplings"));
    }

    #[test]
    fn test_load_article_not_found() {
        let ctx = context(Some(Behaviour::Empty));
        let err = tokio_test::block_on(ctx.load_article("missing")).unwrap_err();
        assert!(matches!(err, BroadsheetError::ArticleNotFound(ref id) if id == "missing"));
    }

    #[test]
    fn test_render_uses_block_mode_for_remote() {
        let ctx = context(None);
        let nodes = ctx.render(&remote_article());
        assert_eq!(
            nodes,
            vec![PresentationNode::DropCap {
                first: "R".into(),
                rest: "emote body".into()
            }]
        );
        assert!(ctx.is_offline());
    }
}
