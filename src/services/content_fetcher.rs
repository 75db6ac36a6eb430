use std::time::Duration;

use regex::Regex;
use reqwest::Client;

use crate::error::{AppError, Result};

const READER_API_URL: &str = "https://r.jina.ai";

/// Fetches page content as markdown through the Jina Reader API and cleans
/// it up for summarization.
pub struct ContentFetcher {
    client: Client,
    api_key: Option<String>,
}

impl ContentFetcher {
    pub fn new(api_key: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");
        Self { client, api_key }
    }

    /// Fetch the readable content of a page. Returns cleaned plain text.
    pub async fn fetch(&self, article_url: &str) -> Result<String> {
        let endpoint = format!(
            "{}/{}",
            READER_API_URL,
            urlencoding::encode(article_url)
        );

        let mut request = self.client.get(&endpoint);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ReaderApi(format!(
                "API error: {} - {}",
                status, error_text
            )));
        }

        let markdown = response.text().await?;

        Ok(clean_content(&markdown))
    }
}

impl Default for ContentFetcher {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Strip markdown structure from reader output so the summarizer sees
/// running prose: images and links go, headers lose their markers, and
/// newlines collapse into sentence breaks.
pub fn clean_content(text: &str) -> String {
    let image_re = Regex::new(r"!\[[^\]]*\]\([^)]*\)").expect("invalid image regex");
    let link_re = Regex::new(r"\[([^\]]*)\]\([^)]*\)").expect("invalid link regex");
    let header_re = Regex::new(r"(?m)^#{1,6}\s*").expect("invalid header regex");
    let newline_re = Regex::new(r"\n+").expect("invalid newline regex");
    let space_re = Regex::new(r"\s+").expect("invalid space regex");

    let text = image_re.replace_all(text, "");
    let text = link_re.replace_all(&text, "$1");
    let text = header_re.replace_all(&text, "");
    let text = newline_re.replace_all(&text, ". ");
    let text = space_re.replace_all(&text, " ");

    text.trim().to_string()
}
