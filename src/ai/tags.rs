use crate::error::Result;

use super::claude::ClaudeClient;

const MAX_TAGS: usize = 5;

/// Maps a free-text query to a short list of single-word keywords used as
/// database search keys.
pub struct TagExtractor {
    claude: ClaudeClient,
}

impl TagExtractor {
    pub fn new(claude: ClaudeClient) -> Self {
        Self { claude }
    }

    pub async fn extract(&self, query: &str) -> Result<Vec<String>> {
        let system_prompt = r#"You are a keyword extraction engine.
Given a query, respond with the most relevant single-word keywords, ordered
by relevance, comma-separated, with no other text. Do not include stop words.
Return at most 5 keywords."#;

        let response = self.claude.complete(system_prompt, query, 128).await?;

        Ok(parse_tags(&response))
    }
}

/// Parse a comma- or newline-separated keyword list out of the model's
/// reply, tolerating list bullets and stray whitespace.
fn parse_tags(response: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for raw in response.split(|c| c == ',' || c == '\n') {
        let tag = raw
            .trim()
            .trim_start_matches(['-', '*', '•'])
            .trim()
            .to_string();
        if tag.is_empty() || tag.contains(' ') {
            continue;
        }
        if !tags.iter().any(|t| t.eq_ignore_ascii_case(&tag)) {
            tags.push(tag);
        }
        if tags.len() >= MAX_TAGS {
            break;
        }
    }
    tags
}
