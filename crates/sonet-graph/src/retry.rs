//! Bounded retry with exponential backoff.

use std::future::Future;
use std::time::Duration;

use backoff::{backoff::Backoff, ExponentialBackoff};
use tracing::{debug, warn};

use crate::error::{GraphError, GraphResult};

/// Retry budget for operations against a transiently unavailable store.
///
/// Bounded on both attempt count and total elapsed time; once either runs
/// out the operation fails with [`GraphError::Connectivity`] instead of
/// blocking indefinitely.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts, the first try included.
    pub max_attempts: u32,

    /// Total elapsed time allowed across all attempts.
    pub max_elapsed: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            max_elapsed: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Run `op` until it succeeds or the budget is exhausted.
    ///
    /// Every failure is retried, so this must only wrap idempotent
    /// operations (MERGE, DELETE, reads, pings).
    pub async fn run<T, F, Fut>(&self, op_name: &str, mut op: F) -> GraphResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, neo4rs::Error>>,
    {
        let mut backoff = ExponentialBackoff {
            max_elapsed_time: Some(self.max_elapsed),
            ..Default::default()
        };

        let mut attempts = 0;

        loop {
            attempts += 1;
            debug!(op = op_name, attempt = attempts, "Running store operation");

            match op().await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    if attempts >= self.max_attempts {
                        return Err(GraphError::connectivity(op_name, attempts, e));
                    }

                    match backoff.next_backoff() {
                        Some(duration) => {
                            warn!(
                                op = op_name,
                                error = %e,
                                retry_in_ms = duration.as_millis() as u64,
                                "Store operation failed, retrying"
                            );
                            tokio::time::sleep(duration).await;
                        }
                        None => {
                            return Err(GraphError::connectivity(op_name, attempts, e));
                        }
                    }
                }
            }
        }
    }
}
