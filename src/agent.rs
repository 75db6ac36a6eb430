use std::collections::HashSet;

use crate::ai::{Analyst, ClaudeClient, Summarizer, TagExtractor};
use crate::config::Config;
use crate::db::Repository;
use crate::error::{AppError, Result};
use crate::models::{Article, NewArticle};
use crate::services::{ContentFetcher, SearchClient};

const NO_ARTICLES_MESSAGE: &str = "No relevant articles found to generate a report.";

/// The finished report plus the articles it was built from, so callers can
/// dump the supporting material separately.
pub struct GeneratedReport {
    pub text: String,
    pub articles: Vec<Article>,
}

/// Coordinates one report request: tag extraction, the store lookup, the
/// sufficiency gate, conditional supplementation, and synthesis. Every step
/// runs in sequence; the only branch is the gate.
pub struct ReportAgent {
    repository: Repository,
    tag_extractor: TagExtractor,
    summarizer: Summarizer,
    analyst: Analyst,
    fetcher: ContentFetcher,
    search: Option<SearchClient>,
    min_article_threshold: usize,
    search_result_count: usize,
}

impl ReportAgent {
    pub async fn new(config: &Config) -> Result<Self> {
        let repository = Repository::new(&config.database_url).await?;

        let claude_api_key = config.claude_api_key.clone().ok_or_else(|| {
            AppError::Config("claude_api_key is required (config file or CLAUDE_API_KEY)".to_string())
        })?;
        let claude = ClaudeClient::new(claude_api_key);

        let search = config
            .brave_api_key
            .as_ref()
            .map(|key| SearchClient::new(key.clone(), config.excluded_domains.clone()));

        Ok(Self {
            repository,
            tag_extractor: TagExtractor::new(claude.clone()),
            summarizer: Summarizer::new(claude.clone()),
            analyst: Analyst::new(claude),
            fetcher: ContentFetcher::new(config.jina_api_key.clone()),
            search,
            min_article_threshold: config.min_article_threshold,
            search_result_count: config.search_result_count,
        })
    }

    pub async fn generate_report(&self, query: &str) -> Result<GeneratedReport> {
        let tags = self.tag_extractor.extract(query).await?;
        tracing::info!("Extracted tags: {}", tags.join(", "));

        let stored = self.repository.find_by_tags(&tags).await?;
        tracing::info!(
            "Found {} articles in the database with matching tags",
            stored.len()
        );

        let articles = if is_sufficient(stored.len(), self.min_article_threshold) {
            stored
        } else {
            tracing::info!("Not enough articles in the database, supplementing...");
            self.supplement(query, &tags, &stored).await?;
            // The store owns article state; read the final set back out
            // instead of merging in memory.
            self.repository.find_by_tags(&tags).await?
        };

        if articles.is_empty() {
            tracing::warn!("No articles available for query: {}", query);
            return Ok(GeneratedReport {
                text: NO_ARTICLES_MESSAGE.to_string(),
                articles,
            });
        }

        let context = collate_summaries(&articles);

        let instructions = self.analyst.generate_instructions(query).await;

        tracing::info!("Generating analysis report from {} articles", articles.len());
        let text = self
            .analyst
            .generate_report(&context, query, &instructions)
            .await?;

        Ok(GeneratedReport { text, articles })
    }

    /// Fetch, summarize, and store additional articles for the query.
    /// Candidate URLs that fail to fetch are skipped with a warning; every
    /// other failure aborts the request.
    async fn supplement(&self, query: &str, tags: &[String], existing: &[Article]) -> Result<()> {
        let search = self.search.as_ref().ok_or_else(|| {
            AppError::Config(
                "brave_api_key is required to supplement articles (config file or BRAVE_API_KEY)"
                    .to_string(),
            )
        })?;

        let urls = search.search(query, self.search_result_count).await?;

        let existing_urls: HashSet<&str> = existing.iter().map(|a| a.url.as_str()).collect();
        let candidates = filter_candidates(urls, &existing_urls);

        let mut new_articles = Vec::new();
        for url in candidates {
            tracing::info!("Fetching {}", url);
            let content = match self.fetcher.fetch(&url).await {
                Ok(content) => content,
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", url, e);
                    continue;
                }
            };

            let summary = self.summarizer.summarize(&url, &content).await?;

            new_articles.push(NewArticle {
                url,
                summary,
                query: query.to_string(),
                tags: tags.to_vec(),
            });
        }

        if new_articles.is_empty() {
            tracing::warn!("Supplementation produced no new articles");
            return Ok(());
        }

        let inserted = self.repository.insert_articles(&new_articles).await?;
        tracing::info!("Appended {} supplemental articles to the database", inserted);

        Ok(())
    }
}

/// The sufficiency gate: supplementation runs only below the threshold.
fn is_sufficient(article_count: usize, threshold: usize) -> bool {
    article_count >= threshold
}

/// Drop candidate URLs that are not http(s), already stored, or repeated
/// within the batch.
fn filter_candidates(urls: Vec<String>, existing_urls: &HashSet<&str>) -> Vec<String> {
    let mut seen = HashSet::new();
    urls.into_iter()
        .filter(|url| url.starts_with("http"))
        .filter(|url| !existing_urls.contains(url.as_str()))
        .filter(|url| seen.insert(url.clone()))
        .collect()
}

/// Concatenate article summaries into the model context, each prefixed by
/// its position and source URL.
fn collate_summaries(articles: &[Article]) -> String {
    let mut collated = String::new();
    for (i, article) in articles.iter().enumerate() {
        if article.summary.is_empty() {
            continue;
        }
        collated.push_str(&format!(
            "Article {} (URL: {}):\n{}\n\n",
            i + 1,
            article.url,
            article.summary
        ));
    }
    collated
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn article(url: &str, summary: &str) -> Article {
        Article {
            id: 0,
            url: url.to_string(),
            summary: summary.to_string(),
            query: "test query".to_string(),
            tags: vec!["test".to_string()],
            retrieval_timestamp: Utc::now(),
        }
    }

    #[test]
    fn gate_triggers_below_threshold_only() {
        assert!(!is_sufficient(0, 7));
        assert!(!is_sufficient(6, 7));
        assert!(is_sufficient(7, 7));
        assert!(is_sufficient(20, 7));
    }

    #[test]
    fn collated_context_contains_every_url() {
        let articles = vec![
            article("https://a.example/1", "First summary."),
            article("https://b.example/2", "Second summary."),
            article("https://c.example/3", "Third summary."),
        ];
        let context = collate_summaries(&articles);
        for a in &articles {
            assert!(context.contains(&a.url));
            assert!(context.contains(&a.summary));
        }
    }

    #[test]
    fn collation_numbers_articles_and_skips_empty_summaries() {
        let articles = vec![
            article("https://a.example/1", "Something."),
            article("https://b.example/2", ""),
        ];
        let context = collate_summaries(&articles);
        assert!(context.starts_with("Article 1 (URL: https://a.example/1):"));
        assert!(!context.contains("https://b.example/2"));
    }

    #[test]
    fn candidate_filter_drops_non_http_known_and_duplicate_urls() {
        let existing: HashSet<&str> = ["https://known.example/x"].into_iter().collect();
        let urls = vec![
            "https://fresh.example/a".to_string(),
            "ftp://fresh.example/b".to_string(),
            "https://known.example/x".to_string(),
            "https://fresh.example/a".to_string(),
        ];
        let candidates = filter_candidates(urls, &existing);
        assert_eq!(candidates, vec!["https://fresh.example/a".to_string()]);
    }
}
