use crate::error::Result;

use super::claude::ClaudeClient;

const FALLBACK_INSTRUCTIONS: &str = "Please provide a detailed analysis focused on the \
technical and contextual aspects of the query. Include relevant background information \
and actionable insights.";

/// Produces the final analysis report, plus the query-specific prompt
/// instructions that steer it.
pub struct Analyst {
    claude: ClaudeClient,
}

impl Analyst {
    pub fn new(claude: ClaudeClient) -> Self {
        Self { claude }
    }

    /// Ask the model for additional, query-specific prompt instructions.
    /// Falls back to a generic instruction string if the call fails, so a
    /// hiccup here never aborts the report.
    pub async fn generate_instructions(&self, query: &str) -> String {
        let system_prompt = "You are a professional data analyst specialized in \
generating research-oriented report guidelines.";

        let user_message = format!(
            "Analyze the following query and generate additional prompt instructions \
for a detailed, research-oriented report. The instructions should focus on the core \
aspects of the topic, outline key areas of analysis, and specify any domain-specific \
guidelines that would help generate a comprehensive report. Query: '{}'",
            query
        );

        match self.claude.complete(system_prompt, &user_message, 300).await {
            Ok(instructions) => {
                tracing::info!("Dynamic instructions generated");
                instructions
            }
            Err(e) => {
                tracing::warn!("Failed to generate dynamic instructions: {}", e);
                FALLBACK_INSTRUCTIONS.to_string()
            }
        }
    }

    /// Generate the four-section analysis report from the collated context.
    /// Section structure is requested in the prompt; the model's compliance
    /// is not validated.
    pub async fn generate_report(
        &self,
        context: &str,
        query: &str,
        extra_instructions: &str,
    ) -> Result<String> {
        let system_prompt = "You are a professional data analyst.";

        let base_prompt = format!(
            r#"You are an expert data analyst. Based on the following information extracted from various reputable sources:
{context}

Generate a comprehensive and deeply researched report addressing the query: "{query}". Your report should:
1. **Executive Summary:** Present a concise overview of the key findings.
2. **Detailed Analysis:** Provide an in-depth analysis that synthesizes the information, identifies underlying trends, and explains the significance of the data.
3. **Supplementary Insights:** Offer additional insights such as comparisons with historical data, contextual factors influencing the trends, and potential implications for future decisions.
4. **Conclusion:** Summarize the overall insights and propose actionable recommendations or considerations.

Ensure that the report is clear, logically organized, and written in a tone appropriate for strategic decision-making rather than journalistic reporting.
Ensure that the report includes all sections as described and do not shorten the output to only a final summary."#
        );

        let prompt = if extra_instructions.is_empty() {
            base_prompt
        } else {
            format!("{}\n{}", base_prompt, extra_instructions)
        };

        let report = self.claude.complete(system_prompt, &prompt, 1600).await?;

        Ok(report.trim().to_string())
    }
}
