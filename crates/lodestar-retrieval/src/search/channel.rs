//! Deadline and retry wrapper for collaborator calls.

use std::future::Future;
use std::time::Duration;

use lodestar_core::config::{RerankConfig, RetrievalConfig};
use lodestar_core::constants::MAX_RETRY_ATTEMPTS;
use lodestar_core::errors::{BackendError, Channel, LodestarResult};
use tracing::debug;

/// Deadline and retry budget for one collaborator.
#[derive(Debug, Clone, Copy)]
pub struct CallPolicy {
    /// Covers every attempt and backoff together.
    pub timeout: Duration,
    pub max_retries: u32,
    pub backoff: Duration,
}

impl CallPolicy {
    pub fn for_channels(config: &RetrievalConfig) -> Self {
        Self {
            timeout: config.channel_timeout(),
            max_retries: config.max_retries.min(MAX_RETRY_ATTEMPTS),
            backoff: config.retry_backoff(),
        }
    }

    pub fn for_reranker(config: &RerankConfig) -> Self {
        Self {
            timeout: config.timeout(),
            max_retries: config.max_retries.min(MAX_RETRY_ATTEMPTS),
            backoff: config.retry_backoff(),
        }
    }
}

/// Run `op` under `policy`.
///
/// Transient failures are retried with exponential backoff while the deadline
/// allows. Expiry yields [`BackendError::Timeout`] for `channel`. Dropping the
/// returned future cancels the in-flight attempt.
pub async fn call<T, F, Fut>(channel: Channel, policy: CallPolicy, mut op: F) -> LodestarResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = LodestarResult<T>>,
{
    let attempts = async {
        let mut attempt = 0u32;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() && attempt < policy.max_retries => {
                    let backoff = policy.backoff * 2u32.pow(attempt);
                    debug!(
                        channel = %channel,
                        attempt = attempt + 1,
                        backoff_ms = backoff.as_millis() as u64,
                        error = %e,
                        "retrying transient failure"
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    };

    match tokio::time::timeout(policy.timeout, attempts).await {
        Ok(result) => result,
        Err(_) => Err(BackendError::Timeout {
            channel,
            after_ms: policy.timeout.as_millis() as u64,
        }
        .into()),
    }
}
