use anyhow::Context;
use log::info;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_ENCODING, USER_AGENT},
    Client,
};
use url::Url;

use crate::error::Result;

pub struct FeedClient {
    client: Client,
}

impl FeedClient {
    pub fn new() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "application/rss+xml,application/xml;q=0.9,text/xml;q=0.8,*/*;q=0.5",
            ),
        );
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip, deflate"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/90.0.4430.212 Safari/537.36"),
        );
        Self {
            client: reqwest::Client::builder()
                .default_headers(headers)
                .build()
                .expect("to build the client"),
        }
    }

    /// Fetch the raw feed text. One request, no retries: a caller that wants
    /// to re-prompt for another URL does so around this.
    pub async fn fetch_feed(&self, url: &Url) -> Result<String> {
        info!("Fetching feed from {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;

        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read feed body from {}", url))?;

        info!("Fetched {} bytes", body.len());
        Ok(body)
    }
}

impl Default for FeedClient {
    fn default() -> Self {
        Self::new()
    }
}
