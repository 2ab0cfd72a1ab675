use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the hosted content API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Project id of the content workspace (default: "wusctyxy")
    pub project_id: String,

    /// Dataset to query (default: "production")
    pub dataset: String,

    /// API version date, YYYY-MM-DD (default: "2023-05-03")
    pub api_version: String,

    /// Query the CDN edge instead of the live API (default: true)
    pub use_cdn: bool,

    /// Request timeout in seconds (default: 10)
    pub timeout_secs: u64,

    /// Never contact the API; serve the built-in articles only (default: false)
    pub offline: bool,

    /// Image width for feed cards (default: 800)
    pub card_image_width: u32,

    /// Image width for the article hero image (default: 1200)
    pub hero_image_width: u32,

    /// Image width for author avatars (default: 120)
    pub avatar_width: u32,

    /// User agent string to use
    pub user_agent: Option<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            project_id: "wusctyxy".to_string(),
            dataset: "production".to_string(),
            api_version: "2023-05-03".to_string(),
            use_cdn: true,
            timeout_secs: 10,
            offline: false,
            card_image_width: 800,
            hero_image_width: 1200,
            avatar_width: 120,
            user_agent: None,
        }
    }
}

impl ContentConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Base URL of the query endpoint, without the query string.
    pub fn query_endpoint(&self) -> String {
        let host = if self.use_cdn { "apicdn" } else { "api" };
        format!(
            "https://{}.{}.sanity.io/v{}/data/query/{}",
            self.project_id,
            host,
            self.api_version.trim_start_matches('v'),
            self.dataset
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_endpoint_cdn() {
        let config = ContentConfig::default();
        assert_eq!(
            config.query_endpoint(),
            "https://wusctyxy.apicdn.sanity.io/v2023-05-03/data/query/production"
        );
    }

    #[test]
    fn test_query_endpoint_live_api() {
        let config = ContentConfig {
            use_cdn: false,
            api_version: "v2024-01-01".into(),
            dataset: "staging".into(),
            ..ContentConfig::default()
        };
        assert_eq!(
            config.query_endpoint(),
            "https://wusctyxy.api.sanity.io/v2024-01-01/data/query/staging"
        );
    }

    #[test]
    fn test_partial_content_table() {
        let config: ContentConfig = toml::from_str("offline = true").unwrap();
        assert!(config.offline);
        assert_eq!(config.dataset, "production");
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }
}
