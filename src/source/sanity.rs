use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::app::{BroadsheetError, Result};
use crate::domain::{Article, ArticleSummary, Category};
use crate::normalizer::Normalizer;
use crate::source::{ContentConfig, ContentSource};

const ALL_POSTS: &str = r#"*[_type == "post"] | order(publishedAt desc) {
  _id, title, slug, chapter, mainImage, publishedAt, excerpt, readTime,
  author->{name, image},
  categories[]->{_id, title}
}"#;

const POST_BY_SLUG: &str = r#"*[_type == "post" && slug.current == $slug][0] {
  _id, title, slug, mainImage, body, publishedAt, excerpt, tags, chapter, views,
  author->{name, image},
  categories[]->{_id, title}
}"#;

const POST_BY_ID: &str = r#"*[_id == $id][0] {
  _id, title, slug, mainImage, body, publishedAt, excerpt, views,
  "author": author->name,
  "authorImage": author->image,
  categories[]->{_id, title}
}"#;

const ALL_CATEGORIES: &str = r#"*[_type == "category"] | order(title asc) { _id, title }"#;

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Value,
}

/// Reads posts from a Sanity dataset over its HTTP query API.
pub struct SanitySource {
    client: Client,
    endpoint: Url,
    normalizer: Normalizer,
}

impl SanitySource {
    pub fn new(config: &ContentConfig, normalizer: Normalizer) -> Result<Self> {
        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(|| format!("broadsheet/{}", env!("CARGO_PKG_VERSION")));

        let client = Client::builder()
            .timeout(config.timeout())
            .gzip(true)
            .brotli(true)
            .user_agent(user_agent)
            .build()?;

        let endpoint = Url::parse(&config.query_endpoint())?;

        Ok(Self {
            client,
            endpoint,
            normalizer,
        })
    }

    /// Build the request URL. Parameter values are sent JSON-encoded as
    /// `$name` arguments, never spliced into the query text.
    pub fn query_url(&self, query: &str, params: &[(&str, &str)]) -> Result<Url> {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("query", query);
            for (name, value) in params {
                let encoded = serde_json::to_string(value)?;
                pairs.append_pair(&format!("${}", name), &encoded);
            }
        }
        Ok(url)
    }

    async fn query(&self, query: &str, params: &[(&str, &str)]) -> Result<Value> {
        let url = self.query_url(query, params)?;
        tracing::debug!(endpoint = %self.endpoint, "Querying content API");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BroadsheetError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        let parsed: QueryResponse = serde_json::from_slice(&body)?;
        Ok(parsed.result)
    }
}

#[async_trait]
impl ContentSource for SanitySource {
    async fn list_articles(&self) -> Result<Vec<ArticleSummary>> {
        let result = self.query(ALL_POSTS, &[]).await?;
        let summaries = self.normalizer.normalize_summaries(result)?;
        tracing::info!("Fetched {} articles", summaries.len());
        Ok(summaries)
    }

    async fn get_article(&self, id: &str) -> Result<Option<Article>> {
        let by_slug = self.query(POST_BY_SLUG, &[("slug", id)]).await?;
        if let Some(article) = self.normalizer.normalize_article(by_slug)? {
            return Ok(Some(article));
        }

        tracing::debug!("No post with slug {}, trying id", id);
        let by_id = self.query(POST_BY_ID, &[("id", id)]).await?;
        self.normalizer.normalize_article(by_id)
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        let result = self.query(ALL_CATEGORIES, &[]).await?;
        self.normalizer.normalize_categories(result)
    }
}
