use std::fs;

use anyhow::{Context, Result};
use tracing::info;

use crate::archiver;
use crate::config::ScrapeConfig;
use crate::fetcher;
use crate::parser;

#[derive(Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// Nothing was extracted; the output file was left alone.
    NoProducts,
    Written(usize),
}

/// Fetch, extract, and write one search page.
pub fn run(config: &ScrapeConfig) -> Result<RunOutcome> {
    let profile = config
        .selectors
        .compile()
        .context("selector profile is unusable")?;

    println!("Scraping data...");
    let html = fetcher::fetch_html(config)
        .with_context(|| format!("failed to fetch {}", config.url))?;

    let products = match html {
        Some(html) => {
            if let Some(path) = &config.dump_html {
                fs::write(path, &html)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!(path = %path.display(), "saved raw page");
            }
            parser::parse_products(&html, &profile)
        }
        None => Vec::new(),
    };

    if products.is_empty() {
        println!("No products found.");
        return Ok(RunOutcome::NoProducts);
    }

    archiver::save_to_csv(&products, &config.output)
        .with_context(|| format!("failed to write {}", config.output.display()))?;
    println!("Data has been written to {}", config.output.display());
    Ok(RunOutcome::Written(products.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::off_runtime;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PAGE: &str = r#"<html><body>
        <div data-asin="A1"><span class="a-text-normal">Umbrella</span><span class="a-price-whole">499</span></div>
        <div data-asin="A2"><span class="a-text-normal">Raincoat</span><span class="a-declarative">Out of stock</span></div>
        <div data-asin="A3"><span class="a-size-small">No name here</span></div>
    </body></html>"#;

    async fn serve(status: u16, body: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .expect(1)
            .mount(&server)
            .await;
        server
    }

    fn config_for(url: &str, dir: &tempfile::TempDir) -> ScrapeConfig {
        let mut config = ScrapeConfig::new(url);
        config.output = dir.path().join("out.csv");
        config
    }

    async fn run_blocking(config: &ScrapeConfig) -> Result<RunOutcome> {
        let config = config.clone();
        off_runtime(move || run(&config)).await
    }

    #[tokio::test]
    async fn end_to_end_writes_in_stock_products() {
        let dir = tempfile::tempdir().unwrap();
        let server = serve(200, PAGE).await;
        let mut config = config_for(&format!("{}/s", server.uri()), &dir);
        config.dump_html = Some(dir.path().join("page.html"));

        assert_eq!(run_blocking(&config).await.unwrap(), RunOutcome::Written(1));

        let text = fs::read_to_string(&config.output).unwrap();
        assert_eq!(
            text,
            "Product Name,Price,Rating,Seller Name\r\nUmbrella,499,Not Rated,Not Available\r\n"
        );
        assert_eq!(fs::read_to_string(dir.path().join("page.html")).unwrap(), PAGE);
    }

    #[tokio::test]
    async fn failed_status_skips_the_write() {
        let dir = tempfile::tempdir().unwrap();
        let server = serve(404, PAGE).await;
        let config = config_for(&format!("{}/s", server.uri()), &dir);
        fs::write(&config.output, "previous run\n").unwrap();

        assert_eq!(run_blocking(&config).await.unwrap(), RunOutcome::NoProducts);

        assert_eq!(fs::read_to_string(&config.output).unwrap(), "previous run\n");
    }

    #[tokio::test]
    async fn page_without_products_creates_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let server = serve(200, "<html><body>No results</body></html>").await;
        let config = config_for(&format!("{}/s", server.uri()), &dir);

        assert_eq!(run_blocking(&config).await.unwrap(), RunOutcome::NoProducts);

        assert!(!config.output.exists());
    }

    #[tokio::test]
    async fn bad_selectors_fail_before_fetching() {
        let dir = tempfile::tempdir().unwrap();
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
            .expect(0)
            .mount(&server)
            .await;
        let mut config = config_for(&format!("{}/s", server.uri()), &dir);
        config.selectors.container = "div[".to_string();

        let err = run_blocking(&config).await.unwrap_err();
        assert!(err.to_string().contains("selector profile"));
        assert!(!config.output.exists());
    }
}
