//! Request-scoped deadline and the sub-deadlines derived from it.

use std::future::Future;
use std::time::Duration;

use tokio::time::{error::Elapsed, Instant};

const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// Absolute point in time by which a request must be answered.
///
/// Each leg of the request (upstream call, database insert) asks for a
/// sub-deadline with [`Deadline::leg`], which never outlives the parent.
#[derive(Clone, Copy, Debug)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    /// Timeouts too large to represent are clamped to roughly thirty years.
    pub fn after(timeout: Duration) -> Self {
        let now = Instant::now();
        Self {
            at: now.checked_add(timeout).unwrap_or_else(|| now + FAR_FUTURE),
        }
    }

    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }

    /// Timeout for a leg capped at `limit`, or `None` once the deadline has passed.
    pub fn leg(&self, limit: Duration) -> Option<Duration> {
        let remaining = self.remaining();
        if remaining.is_zero() {
            None
        } else {
            Some(remaining.min(limit))
        }
    }

    /// Runs `fut` to completion or until the deadline, whichever comes first.
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output, Elapsed> {
        tokio::time::timeout_at(self.at, fut).await
    }
}
