use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::error::{AppError, Result};

const BRAVE_API_URL: &str = "https://api.search.brave.com/res/v1/web/search";

// Brave caps the per-request result count
const MAX_API_COUNT: usize = 20;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    web: Option<WebResults>,
}

#[derive(Debug, Deserialize)]
struct WebResults {
    results: Vec<WebResult>,
}

#[derive(Debug, Deserialize)]
struct WebResult {
    url: String,
}

pub struct SearchClient {
    client: Client,
    api_key: String,
    excluded_domains: Vec<String>,
}

impl SearchClient {
    pub fn new(api_key: String, excluded_domains: Vec<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");
        Self {
            client,
            api_key,
            excluded_domains,
        }
    }

    /// Search the web for the query and return up to `num_results` URLs.
    /// Requests twice the wanted count ahead of the excluded-domain filter.
    pub async fn search(&self, query: &str, num_results: usize) -> Result<Vec<String>> {
        let count = (num_results * 2).min(MAX_API_COUNT).to_string();

        let response = self
            .client
            .get(BRAVE_API_URL)
            .query(&[("q", query), ("count", count.as_str())])
            .header("X-Subscription-Token", &self.api_key)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(AppError::SearchApi(format!("API error: {}", error_text)));
        }

        let search_response: SearchResponse = response.json().await?;

        let urls = search_response
            .web
            .map(|web| web.results)
            .unwrap_or_default()
            .into_iter()
            .map(|result| result.url)
            .filter(|url| !is_excluded(url, &self.excluded_domains))
            .take(num_results)
            .collect();

        Ok(urls)
    }
}

/// True when the URL's host is one of the excluded domains or a subdomain
/// of one.
fn is_excluded(url: &str, excluded_domains: &[String]) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return true;
    };
    let Some(host) = parsed.host_str() else {
        return true;
    };

    excluded_domains
        .iter()
        .any(|domain| host == domain || host.ends_with(&format!(".{}", domain)))
}
