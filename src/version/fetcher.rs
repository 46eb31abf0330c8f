//! Page fetcher for retrieving a mirror's directory listing

use std::time::Duration;

#[cfg(test)]
use mockall::automock;
use tracing::{debug, warn};

use crate::config::{DEFAULT_USER_AGENT, FETCH_TIMEOUT_MS};
use crate::version::error::RegistryError;

/// Trait for fetching the raw text of a mirror page
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches the body of `url`
    ///
    /// The URL is normalized to end with `/` before the request is sent.
    /// Any status other than 200 is returned as an error.
    async fn fetch(&self, url: &str) -> Result<String, RegistryError>;
}

/// Appends a trailing slash to the mirror URL if it is missing
pub fn normalize_mirror_url(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{}/", url)
    }
}

/// PageFetcher backed by a reqwest client
pub struct HttpPageFetcher {
    client: reqwest::Client,
}

impl HttpPageFetcher {
    /// Creates a fetcher whose requests give up after `timeout`
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, RegistryError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    /// Creates a fetcher with the default timeout and user agent
    pub fn with_defaults() -> Result<Self, RegistryError> {
        Self::new(
            Duration::from_millis(FETCH_TIMEOUT_MS),
            DEFAULT_USER_AGENT,
        )
    }
}

#[async_trait::async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, RegistryError> {
        let url = normalize_mirror_url(url);
        debug!("Fetching version listing from {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            warn!("Mirror returned status {}: {}", status, url);
            return Err(RegistryError::UnexpectedStatus { url, status });
        }

        response.text().await.map_err(|e| {
            warn!("Failed to read mirror response: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })
    }
}
