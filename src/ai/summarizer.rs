use crate::error::Result;

use super::claude::ClaudeClient;

/// Content longer than this is cut before summarization.
const MAX_CONTENT_CHARS: usize = 10_000;

/// Content shorter than this is returned without a model call.
const MIN_CONTENT_CHARS: usize = 50;

pub struct Summarizer {
    claude: ClaudeClient,
}

impl Summarizer {
    pub fn new(claude: ClaudeClient) -> Self {
        Self { claude }
    }

    pub async fn summarize(&self, url: &str, content: &str) -> Result<String> {
        if content.len() < MIN_CONTENT_CHARS {
            return Ok(content.to_string());
        }

        let system_prompt = r#"You are a helpful assistant that summarizes web articles.
Provide a concise, informative summary in 2-3 paragraphs.
Focus on the key facts, main arguments, and important conclusions.
Use clear, accessible language."#;

        let content = truncate_to_char_boundary(content, MAX_CONTENT_CHARS);

        let user_message = format!(
            "Please summarize the following article:\n\nSource: {}\n\nContent:\n{}",
            url, content
        );

        let summary = self.claude.complete(system_prompt, &user_message, 1024).await?;

        Ok(summary)
    }

    pub fn model_version(&self) -> &'static str {
        self.claude.model_version()
    }
}

fn truncate_to_char_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
