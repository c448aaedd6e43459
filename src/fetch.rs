//! Page fetching over HTTP

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::Config;
use crate::errors::Result;

/// What a single page request produced. Transport failures are `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Fetched(String),
    Unavailable { status: u16 },
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchOutcome>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.http.user_agent)
            .timeout(config.http_timeout())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutcome> {
        debug!("Fetching page: {}", url);

        let response = self
            .client
            .get(url)
            .header("Accept", "text/html,*/*")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            debug!("HTTP {} for URL: {}", status, url);
            return Ok(FetchOutcome::Unavailable {
                status: status.as_u16(),
            });
        }

        Ok(FetchOutcome::Fetched(response.text().await?))
    }
}
