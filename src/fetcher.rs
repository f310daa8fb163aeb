use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::redirect;
use tracing::{debug, warn};

use crate::config::ScrapeConfig;
use crate::error::ScrapeError;

const MAX_REDIRECTS: usize = 10;

/// Fetches the search page body.
///
/// A non-success status is not an error: it is logged and reported as `None`,
/// which callers treat as "no products". Transport failures are returned.
pub fn fetch_html(config: &ScrapeConfig) -> Result<Option<String>, ScrapeError> {
    let client = build_client(config)?;

    debug!(url = %config.url, "sending request");
    let resp = client.get(&config.url).headers(request_headers(config)).send()?;

    let status = resp.status();
    if !status.is_success() {
        warn!(status = status.as_u16(), url = %config.url, "failed to retrieve the page");
        return Ok(None);
    }

    let body = resp.text()?;
    debug!(bytes = body.len(), "received page");
    Ok(Some(body))
}

fn build_client(config: &ScrapeConfig) -> Result<Client, ScrapeError> {
    let redirect_policy = redirect::Policy::custom(|attempt| {
        if attempt.previous().len() > MAX_REDIRECTS {
            attempt.error(format!("Too many redirects (>{MAX_REDIRECTS})"))
        } else {
            attempt.follow()
        }
    });

    Ok(Client::builder()
        .redirect(redirect_policy)
        .timeout(config.timeout)
        .build()?)
}

fn request_headers(config: &ScrapeConfig) -> HeaderMap {
    let mut headers = HeaderMap::new();
    match HeaderValue::from_str(&config.user_agent) {
        Ok(value) => {
            headers.insert(USER_AGENT, value);
        }
        Err(_) => warn!(user_agent = %config.user_agent, "ignoring unusable User-Agent"),
    }

    for (name, value) in &config.headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => warn!(header = %name, "ignoring unusable header"),
        }
    }
    headers
}
