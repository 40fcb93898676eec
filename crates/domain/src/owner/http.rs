//! Owner directory backed by the user service's HTTP API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use super::{OwnerDirectory, OwnerLookupError};
use crate::OwnerId;

/// Retry schedule for lookups that fail without a definitive answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. Zero is treated as one.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles on every further attempt.
    pub base_backoff: Duration,
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            base_backoff: Duration::ZERO,
        }
    }

    /// Returns the delay to wait after the given (1-based) failed attempt.
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.base_backoff.saturating_mul(1 << exponent)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_backoff: Duration::from_millis(100),
        }
    }
}

/// Checks owners with `GET {base_url}/users/{owner_id}`.
///
/// - 2xx: the owner exists
/// - 404 and any other 4xx: the owner does not exist (never retried)
/// - 5xx, timeouts and connection errors: retried per [`RetryPolicy`],
///   then reported as [`OwnerLookupError::Unavailable`]
#[derive(Debug, Clone)]
pub struct HttpOwnerDirectory {
    client: Client,
    base_url: Url,
    retry: RetryPolicy,
}

impl HttpOwnerDirectory {
    /// Creates a directory client with a per-attempt `timeout`.
    pub fn new(
        base_url: &str,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self, OwnerLookupError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| OwnerLookupError::Setup(format!("invalid base URL {base_url:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(OwnerLookupError::Setup(format!(
                "base URL {base_url} cannot carry a path"
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OwnerLookupError::Setup(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            retry,
        })
    }

    /// Returns the URL queried for `owner_id`.
    pub fn owner_url(&self, owner_id: &OwnerId) -> Result<Url, OwnerLookupError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| OwnerLookupError::Setup(format!("base URL {} cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(["users", owner_id.as_str()]);
        Ok(url)
    }

    async fn attempt(&self, url: &Url) -> Result<bool, String> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if status.is_success() {
            Ok(true)
        } else if status.is_server_error() {
            Err(format!("owner service responded {status}"))
        } else {
            if status != StatusCode::NOT_FOUND {
                tracing::warn!(%url, %status, "unexpected owner service response, treating as not found");
            }
            Ok(false)
        }
    }
}

#[async_trait]
impl OwnerDirectory for HttpOwnerDirectory {
    #[tracing::instrument(skip(self))]
    async fn exists(&self, owner_id: &OwnerId) -> Result<bool, OwnerLookupError> {
        let url = self.owner_url(owner_id)?;
        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            metrics::counter!("owner_lookups_total").increment(1);
            let reason = match self.attempt(&url).await {
                Ok(found) => return Ok(found),
                Err(reason) => reason,
            };

            if attempt >= max_attempts {
                tracing::warn!(%owner_id, attempt, %reason, "owner lookup attempts exhausted");
                return Err(OwnerLookupError::Unavailable(reason));
            }

            let delay = self.retry.backoff_for(attempt);
            tracing::warn!(%owner_id, attempt, ?delay, %reason, "owner lookup failed, retrying");
            metrics::counter!("owner_lookup_retries_total").increment(1);
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}
