mod archiver;
mod config;
mod error;
mod fetcher;
mod models;
mod parser;
mod pipeline;
mod selectors;
#[cfg(test)]
mod test_support;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use crate::config::{
    DEFAULT_OUTPUT, DEFAULT_URL, DEFAULT_USER_AGENT, ScrapeConfig, parse_header,
    timestamped_dump_path,
};
use crate::pipeline::RunOutcome;
use crate::selectors::SelectorProfile;

/// Scrape one search-results page into a CSV of in-stock products.
#[derive(Parser)]
#[command(name = "search_page_scraper", version)]
struct Cli {
    /// Search-results page to fetch.
    #[arg(default_value = DEFAULT_URL)]
    url: String,

    /// CSV file to (over)write.
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Extra request header, e.g. -H 'Accept-Language: en-US'. Repeatable.
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    headers: Vec<(String, String)>,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,

    /// JSON selector profile replacing the built-in page template.
    #[arg(long)]
    selectors: Option<PathBuf>,

    /// Save the fetched HTML; without a path a timestamped name is used.
    #[arg(long, num_args = 0..=1)]
    dump_html: Option<Option<PathBuf>>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = build_config(cli)?;
    if let RunOutcome::Written(count) = pipeline::run(&config)? {
        tracing::info!(count, "scrape finished");
    }
    Ok(())
}

fn build_config(cli: Cli) -> Result<ScrapeConfig> {
    let mut config = ScrapeConfig::new(&cli.url);
    config.output = cli.output;
    config.user_agent = cli.user_agent;
    config.headers = cli.headers.into_iter().collect();
    config.timeout = Duration::from_secs(cli.timeout);
    config.dump_html = cli
        .dump_html
        .map(|path| path.unwrap_or_else(timestamped_dump_path));
    if let Some(path) = &cli.selectors {
        config.selectors = SelectorProfile::from_json_file(path)?;
    }
    Ok(config)
}
