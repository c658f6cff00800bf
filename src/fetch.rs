//! HTTP transport for page fetching
//!
//! One GET per URL with a bounded timeout. Pacing delay and TLS
//! verification are deployment policy, configured here and kept out of
//! the extraction logic.

use std::time::Duration;

use thiserror::Error;

/// Browser-like UA; some publishers refuse requests without one.
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:61.0) Gecko/20100101 Firefox/61.0";

/// Error fetching a single URL. Recovered at the per-URL level; never
/// fatal to a batch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Non-2xx response
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },
    /// DNS failure, connection error, timeout, TLS failure
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
}

/// Fetch policy
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Timeout per request in milliseconds
    pub timeout_ms: u64,
    /// Pause between consecutive requests in milliseconds
    pub delay_ms: u64,
    /// Skip TLS certificate verification
    pub insecure: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 15_000,
            delay_ms: 0,
            insecure: false,
        }
    }
}

/// HTTP client wrapper for sequential page fetching
pub struct Fetcher {
    client: reqwest::Client,
    delay_ms: u64,
}

impl Fetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_millis(config.timeout_ms))
            .danger_accept_invalid_certs(config.insecure)
            .build()?;

        Ok(Self {
            client,
            delay_ms: config.delay_ms,
        })
    }

    /// GET a URL and return the raw markup text
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }

    /// Inter-request pacing delay (network etiquette)
    pub async fn pace(&self) {
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
    }
}
