//! KEGG REST API client
//!
//! Three operations against `https://rest.kegg.jp`:
//! - `get/<entry>`: fetch a single flat record
//! - `find/<db>/<query>`: keyword search, tab-separated hits
//! - `link/<target_db>/<source>`: cross-reference lookup, tab-separated pairs
//!
//! All three return newline-delimited text. Requests are rate limited;
//! KEGG asks clients to stay well under 3 requests per second.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::Mutex;

const KEGG_BASE_URL: &str = "https://rest.kegg.jp";
const USER_AGENT: &str = "MEXS/0.1.0 (https://github.com/mexs/mexs)";
const RATE_LIMIT_MS: u64 = 350;
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// KEGG client errors
#[derive(Debug, Error)]
pub enum KeggError {
    /// Network communication error (includes request timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Entry does not exist in KEGG
    #[error("Entry not found in KEGG: {0}")]
    NotFound(String),

    /// KEGG returned a non-success status
    #[error("KEGG API error {status} for {entry}")]
    Api { status: u16, entry: String },
}

/// Abstract knowledge-base operations
///
/// The pipeline services depend on this trait rather than on the HTTP
/// client, so they can be exercised against fixture text in tests.
#[async_trait]
pub trait KnowledgeBase: Send + Sync {
    /// Fetch a single flat record
    async fn get(&self, entry: &str) -> Result<String, KeggError>;

    /// Keyword search within a database; empty text means zero hits
    async fn find(&self, database: &str, query: &str) -> Result<String, KeggError>;

    /// Cross-reference lookup; empty text means no links
    async fn link(&self, target_db: &str, source: &str) -> Result<String, KeggError>;
}

/// Rate limiter enforcing a minimum interval between requests
struct RateLimiter {
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval_ms: u64) -> Self {
        Self {
            last_request: Mutex::new(None),
            min_interval: Duration::from_millis(min_interval_ms),
        }
    }

    /// Wait if necessary to comply with the rate limit
    async fn wait(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                tracing::debug!("Rate limiting: waiting {:?}", wait_time);
                tokio::time::sleep(wait_time).await;
            }
        }

        *last = Some(Instant::now());
    }
}

/// KEGG REST client settings
#[derive(Debug, Clone)]
pub struct KeggSettings {
    pub base_url: String,
    pub timeout_secs: u64,
    pub rate_limit_ms: u64,
}

impl Default for KeggSettings {
    fn default() -> Self {
        Self {
            base_url: KEGG_BASE_URL.to_string(),
            timeout_secs: REQUEST_TIMEOUT_SECS,
            rate_limit_ms: RATE_LIMIT_MS,
        }
    }
}

/// KEGG REST API client
pub struct KeggClient {
    http_client: reqwest::Client,
    rate_limiter: Arc<RateLimiter>,
    base_url: String,
}

impl KeggClient {
    /// Create a client with default settings
    pub fn new() -> Result<Self, KeggError> {
        Self::with_settings(KeggSettings::default())
    }

    /// Create a client with explicit settings
    pub fn with_settings(settings: KeggSettings) -> Result<Self, KeggError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| KeggError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            rate_limiter: Arc::new(RateLimiter::new(settings.rate_limit_ms)),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_text(&self, url: &str, entry: &str) -> Result<String, KeggError> {
        self.rate_limiter.wait().await;

        tracing::debug!(entry = %entry, url = %url, "Querying KEGG API");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| KeggError::Network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(KeggError::NotFound(entry.to_string()));
        }

        if !status.is_success() {
            return Err(KeggError::Api {
                status: status.as_u16(),
                entry: entry.to_string(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| KeggError::Network(e.to_string()))
    }
}

#[async_trait]
impl KnowledgeBase for KeggClient {
    async fn get(&self, entry: &str) -> Result<String, KeggError> {
        let url = format!("{}/get/{}", self.base_url, entry);
        self.fetch_text(&url, entry).await
    }

    async fn find(&self, database: &str, query: &str) -> Result<String, KeggError> {
        let url = format!("{}/find/{}/{}", self.base_url, database, query);
        self.fetch_text(&url, query).await
    }

    async fn link(&self, target_db: &str, source: &str) -> Result<String, KeggError> {
        let url = format!("{}/link/{}/{}", self.base_url, target_db, source);
        self.fetch_text(&url, source).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation_succeeds() {
        assert!(KeggClient::new().is_ok());
    }

    #[test]
    fn trailing_slash_is_stripped_from_base_url() {
        let client = KeggClient::with_settings(KeggSettings {
            base_url: "http://localhost:9000/".to_string(),
            ..KeggSettings::default()
        })
        .unwrap();
        assert_eq!(client.base_url, "http://localhost:9000");
    }

    #[tokio::test]
    async fn rate_limiter_enforces_interval() {
        let limiter = RateLimiter::new(100);

        let start = Instant::now();
        limiter.wait().await; // first request is immediate
        let first_elapsed = start.elapsed();

        limiter.wait().await; // second request waits ~100ms
        let second_elapsed = start.elapsed();

        assert!(first_elapsed.as_millis() < 50);
        assert!(second_elapsed.as_millis() >= 100);
    }
}
