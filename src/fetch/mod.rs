// src/fetch/mod.rs

pub mod urls;

pub use urls::{race_result_url, race_slug, season_url};

use anyhow::{Context, Result};
use reqwest::Client;
use std::{future::Future, time::Duration};
use tracing::debug;
use url::Url;

/// HTTP client used for every page of a run.
pub fn build_client(user_agent: &str, timeout: Duration) -> Result<Client> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
        .context("building HTTP client")
}

/// Single GET returning the body as text. Non-2xx statuses are errors; nothing is retried.
pub async fn get_text(client: &Client, url: &Url) -> Result<String> {
    debug!("Fetching text from {}", url);
    client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("GET {} failed", url))?
        .error_for_status()
        .with_context(|| format!("Non-success status {}", url))?
        .text()
        .await
        .with_context(|| format!("Reading text from {}", url))
}

/// Where result pages come from. Implemented for `reqwest::Client`; tests serve canned HTML.
pub trait PageSource {
    fn fetch_page(&self, url: &Url) -> impl Future<Output = Result<String>>;
}

impl PageSource for Client {
    fn fetch_page(&self, url: &Url) -> impl Future<Output = Result<String>> {
        get_text(self, url)
    }
}
