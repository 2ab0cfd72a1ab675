use thiserror::Error;

#[derive(Error, Debug)]
pub enum BroadsheetError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Content API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Article not found: {0}")]
    ArticleNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl From<crate::config::ConfigError> for BroadsheetError {
    fn from(e: crate::config::ConfigError) -> Self {
        BroadsheetError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BroadsheetError>;
