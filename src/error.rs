use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Claude API error: {0}")]
    ClaudeApi(String),

    #[error("Search API error: {0}")]
    SearchApi(String),

    #[error("Reader API error: {0}")]
    ReaderApi(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}
