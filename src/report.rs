use std::path::Path;

use crate::error::Result;
use crate::models::Article;

/// Render the supporting articles as a plain-text dump: each record is the
/// source URL followed by its summary, separated by rules.
pub fn format_structured_output(articles: &[Article]) -> String {
    let mut out = String::new();
    for article in articles {
        out.push_str(&format!("URL: {}\n", article.url));
        out.push_str(&"-".repeat(50));
        out.push('\n');
        out.push_str("Summary:\n");
        out.push_str(&article.summary);
        out.push('\n');
        out.push_str(&"=".repeat(80));
        out.push_str("\n\n");
    }
    out
}

pub fn write_structured_output(path: &Path, articles: &[Article]) -> Result<()> {
    std::fs::write(path, format_structured_output(articles))?;
    Ok(())
}
