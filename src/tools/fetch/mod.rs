//! Navigator capability: URL in, rendered HTML out.

mod client;
mod headers;
mod tests;
mod utils;

pub mod types;

pub use types::*;

use crate::error::{Result, ScrapeError};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::{Duration, Instant};

/// Turns a URL into the HTML of the rendered page.
///
/// Implementations wait `settle` after the page loads so late content is
/// present. A headless browser driver plugs in here; [`HttpNavigator`] is
/// the plain-HTTP implementation shipped with the crate.
#[async_trait]
pub trait Navigator: Send + Sync {
    fn name(&self) -> &'static str;

    async fn render(&self, url: &str, settle: Duration) -> Result<String>;
}

/// Navigator over plain HTTP. Pages are not executed, so it is always headless.
#[derive(Debug, Clone)]
pub struct HttpNavigator {
    client: Client,
    config: FetchConfig,
}

impl HttpNavigator {
    pub fn new(config: FetchConfig) -> Result<Self> {
        if !config.headless {
            tracing::info!("http navigator has no visible session; running headless");
        }
        let client = client::build_client(&config)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

#[async_trait]
impl Navigator for HttpNavigator {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn render(&self, url: &str, settle: Duration) -> Result<String> {
        let start = Instant::now();

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScrapeError::navigation(url, e.to_string()))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .text()
            .await
            .map_err(|e| ScrapeError::navigation(url, e.to_string()))?;

        utils::validate_response(status, content_type.as_deref(), &body)
            .map_err(|reason| ScrapeError::navigation(url, reason))?;

        tracing::debug!(
            url,
            bytes = body.len(),
            "fetch succeeded in {}ms",
            start.elapsed().as_millis()
        );

        if !settle.is_zero() {
            tokio::time::sleep(settle).await;
        }
        Ok(body)
    }
}
