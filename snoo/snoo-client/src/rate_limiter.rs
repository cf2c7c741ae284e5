use crate::error::{Error, Result};
use futures::lock::Mutex;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Spaces outbound requests at least `interval` apart. Callers queue on the
/// lock, so concurrent callers depart one at a time.
#[derive(Debug)]
pub struct RateLimiter {
    interval: Duration,
    next_request: Mutex<Instant>,
}

impl RateLimiter {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_request: Mutex::new(Instant::now()),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Waits for the next free slot and reserves the one after it. The caller
    /// must dispatch its request right after this returns.
    pub async fn wait(&self, cancel: &CancellationToken) -> Result<()> {
        let mut next_request = tokio::select! {
            guard = self.next_request.lock() => guard,
            _ = cancel.cancelled() => return Err(Error::Cancelled),
        };

        let now = Instant::now();
        if *next_request > now {
            let diff = *next_request - now;
            tracing::debug!(
                "Waiting {} seconds to keep the request rate steady.",
                diff.as_secs_f64()
            );
            tokio::select! {
                _ = tokio::time::sleep_until(*next_request) => {}
                _ = cancel.cancelled() => return Err(Error::Cancelled),
            }
        }

        *next_request = Instant::now() + self.interval;
        Ok(())
    }
}
