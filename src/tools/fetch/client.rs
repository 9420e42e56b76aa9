use super::headers::browser_headers;
use super::types::FetchConfig;
use crate::error::Result;
use reqwest::{redirect, Client};
use std::time::Duration;

const POOL_IDLE_TIMEOUT_SEC: u64 = 90;

/// Build a reqwest client for page rendering.
pub(super) fn build_client(config: &FetchConfig) -> Result<Client> {
    let client = Client::builder()
        .default_headers(browser_headers(&config.user_agent))
        .cookie_store(true)
        .redirect(redirect::Policy::limited(config.redirect_limit))
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .timeout(config.timeout())
        .pool_idle_timeout(Duration::from_secs(POOL_IDLE_TIMEOUT_SEC))
        .build()?;
    Ok(client)
}
