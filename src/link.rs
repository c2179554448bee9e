//! Demo link liveness probe

use crate::config::LinkCheckConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::StatusCode;

/// Decides whether a demo URL can still be downloaded
#[async_trait]
pub trait LinkChecker: Send + Sync {
    /// `true` if the URL is no longer retrievable
    ///
    /// Unreachable and expired are deliberately the same answer: this never
    /// fails, it only reports `true`.
    async fn is_expired(&self, url: &str) -> bool;
}

/// [`LinkChecker`] that issues a `HEAD` request
///
/// Anything other than `200 OK` counts as expired, and so does every
/// transport failure (DNS, refused connection, timeout, malformed URL).
#[derive(Debug, Clone)]
pub struct HttpLinkChecker {
    client: reqwest::Client,
}

impl HttpLinkChecker {
    /// Build a checker with the configured timeout and user agent
    pub fn new(config: &LinkCheckConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| Error::Config {
                message: format!("failed to build HTTP client: {e}"),
                key: Some("link_check".to_string()),
            })?;
        Ok(Self { client })
    }

    /// Use an existing HTTP client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LinkChecker for HttpLinkChecker {
    async fn is_expired(&self, url: &str) -> bool {
        if url.trim().is_empty() {
            return true;
        }

        match self.client.head(url).send().await {
            Ok(response) if response.status() == StatusCode::OK => false,
            Ok(response) => {
                tracing::debug!(url = %url, status = %response.status(), "demo link probe rejected");
                true
            }
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "demo link probe failed");
                true
            }
        }
    }
}
