use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::selectors::SelectorProfile;

pub const DEFAULT_URL: &str = "https://www.amazon.in/s?rh=n%3A6612025031&fs=true&ref=lp_6612025031_sar";
pub const DEFAULT_OUTPUT: &str = "amazon_products.csv";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.36";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything one run needs; nothing is read from globals.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub url: String,
    pub output: PathBuf,
    pub user_agent: String,
    /// Sent in addition to `User-Agent`.
    pub headers: BTreeMap<String, String>,
    pub timeout: Duration,
    /// Where to keep a copy of the fetched page, if anywhere.
    pub dump_html: Option<PathBuf>,
    pub selectors: SelectorProfile,
}

impl ScrapeConfig {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            headers: BTreeMap::new(),
            timeout: DEFAULT_TIMEOUT,
            dump_html: None,
            selectors: SelectorProfile::default(),
        }
    }
}

/// Splits a `Name: value` header argument.
pub fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected `Name: value`, got `{raw}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty header name in `{raw}`"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

/// Default file name for `--dump-html` without a path.
pub fn timestamped_dump_path() -> PathBuf {
    PathBuf::from(format!(
        "search_page_{}.html",
        chrono::Utc::now().format("%Y%m%dT%H%M%SZ")
    ))
}
