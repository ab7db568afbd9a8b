use std::time::Duration;

use axum::body::Bytes;
use reqwest::{Client, StatusCode};
use serde::de::IgnoredAny;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::UpstreamConfig;
use crate::news::NewsItem;

#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Transport failure. The request URL carries the API token, so it is
    /// stripped before the error is stored.
    #[error("upstream request failed: {0}")]
    Request(reqwest::Error),

    #[error("upstream returned {status}")]
    Status { status: StatusCode },

    #[error("upstream returned malformed JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        UpstreamError::Request(err.without_url())
    }
}

/// Client for the provider's news endpoint.
pub struct NewsClient {
    client: Client,
    base_url: String,
    category: String,
    token: String,
}

impl NewsClient {
    pub fn new(config: &UpstreamConfig, token: String) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("TrendBoard/1.0 (News Dashboard)")
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            category: config.category.clone(),
            token,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/news", self.base_url)
    }

    /// Fetch the news feed and return the body exactly as received, after
    /// checking that it is well-formed JSON.
    pub async fn fetch_raw(&self) -> Result<Bytes, UpstreamError> {
        info!("Fetching {} news from {}", self.category, self.endpoint());

        let response = self
            .client
            .get(self.endpoint())
            .query(&[("category", self.category.as_str()), ("token", self.token.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Upstream news request failed with {}", status);
            return Err(UpstreamError::Status { status });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice::<IgnoredAny>(&bytes)?;
        Ok(bytes)
    }

    /// Fetch the news feed as typed items.
    pub async fn fetch_items(&self) -> Result<Vec<NewsItem>, UpstreamError> {
        let bytes = self.fetch_raw().await?;
        let items: Vec<NewsItem> = serde_json::from_slice(&bytes)?;
        info!("Received {} news items", items.len());
        Ok(items)
    }
}
