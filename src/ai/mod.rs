mod analyst;
mod claude;
mod summarizer;
mod tags;

pub use analyst::Analyst;
pub use claude::ClaudeClient;
pub use summarizer::Summarizer;
pub use tags::TagExtractor;
