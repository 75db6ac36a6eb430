use std::path::PathBuf;

use agentic_reporter::report::write_structured_output;
use agentic_reporter::{Config, ReportAgent, Result};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging; the pipeline narrates its steps at INFO
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse command line arguments
    let mut args = std::env::args().skip(1);
    let mut output_path: Option<PathBuf> = None;
    let mut query_words: Vec<String> = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--output" => match args.next() {
                Some(path) => output_path = Some(PathBuf::from(path)),
                None => {
                    eprintln!("--output requires a file path");
                    std::process::exit(2);
                }
            },
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            _ => query_words.push(arg),
        }
    }

    let query = query_words.join(" ").trim().to_string();
    if query.is_empty() {
        print_usage();
        std::process::exit(2);
    }

    // Load configuration
    let config = Config::load()?;

    let agent = ReportAgent::new(&config).await?;

    tracing::info!("Generating report for query: {}", query);
    let report = agent.generate_report(&query).await?;

    println!("{}", report.text);

    if let Some(path) = output_path {
        write_structured_output(&path, &report.articles)?;
        tracing::info!("Supporting articles written to {:?}", path);
    }

    Ok(())
}

fn print_usage() {
    eprintln!("Usage: report-agent [--output <file>] <query>");
    eprintln!();
    eprintln!("Generates a research report for the query from stored and");
    eprintln!("freshly gathered articles. With --output, the supporting");
    eprintln!("article summaries are also written to the given file.");
}
