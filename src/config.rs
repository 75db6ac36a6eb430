use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database_url")]
    pub database_url: String,

    pub claude_api_key: Option<String>,
    pub brave_api_key: Option<String>,
    pub jina_api_key: Option<String>,

    /// Minimum number of stored articles before supplementation kicks in.
    #[serde(default = "default_min_article_threshold")]
    pub min_article_threshold: usize,

    #[serde(default = "default_search_result_count")]
    pub search_result_count: usize,

    #[serde(default = "default_excluded_domains")]
    pub excluded_domains: Vec<String>,
}

fn default_database_url() -> String {
    "postgres://localhost/agentic_reporter".to_string()
}

fn default_min_article_threshold() -> usize {
    7
}

fn default_search_result_count() -> usize {
    5
}

fn default_excluded_domains() -> Vec<String> {
    ["youtube.com", "youtu.be", "vimeo.com", "dailymotion.com"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            claude_api_key: None,
            brave_api_key: None,
            jina_api_key: None,
            min_article_threshold: default_min_article_threshold(),
            search_result_count: default_search_result_count(),
            excluded_domains: default_excluded_domains(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        let mut config = if config_path.exists() {
            Self::load_from(&config_path)?
        } else {
            let config = Config::default();
            config.save_to(&config_path)?;
            config
        };

        config.apply_env_overrides();
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("agentic-reporter")
            .join("config.toml")
    }

    /// Environment variables take precedence over the config file.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            self.database_url = url;
        }
        if let Ok(key) = std::env::var("CLAUDE_API_KEY") {
            self.claude_api_key = Some(key);
        }
        if let Ok(key) = std::env::var("BRAVE_API_KEY") {
            self.brave_api_key = Some(key);
        }
        if let Ok(key) = std::env::var("JINA_API_KEY") {
            self.jina_api_key = Some(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = Config::default();
        assert_eq!(config.min_article_threshold, 7);
        assert_eq!(config.search_result_count, 5);
        assert!(config.excluded_domains.contains(&"youtube.com".to_string()));
        assert!(config.claude_api_key.is_none());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config: Config = toml::from_str(
            r#"
            database_url = "postgres://db.internal/reports"
            claude_api_key = "sk-test"
            "#,
        )
        .unwrap();
        assert_eq!(config.database_url, "postgres://db.internal/reports");
        assert_eq!(config.claude_api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.min_article_threshold, 7);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.brave_api_key = Some("brave-key".to_string());
        config.min_article_threshold = 3;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.brave_api_key.as_deref(), Some("brave-key"));
        assert_eq!(loaded.min_article_threshold, 3);
    }
}
