use std::future::Future;
use std::time::Duration;

/// Bounded fixed-delay retry: at most `max_attempts` probes, sleeping
/// `delay` between consecutive ones (never after the last).
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

/// Typed result of running a policy to completion.
#[derive(Debug)]
pub enum RetryOutcome<T> {
    Ready(T),
    Exhausted,
}

impl<T> RetryOutcome<T> {
    pub fn ready(self) -> Option<T> {
        match self {
            RetryOutcome::Ready(value) => Some(value),
            RetryOutcome::Exhausted => None,
        }
    }
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Probes until the first success or until the attempt budget runs out.
    pub async fn run<T, F, Fut>(&self, what: &str, mut probe: F) -> RetryOutcome<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = anyhow::Result<T>>,
    {
        for attempt in 1..=self.max_attempts {
            match probe().await {
                Ok(value) => {
                    tracing::info!("{} ready after {} attempt(s)", what, attempt);
                    return RetryOutcome::Ready(value);
                }
                Err(e) => {
                    tracing::warn!(
                        "{} not ready (attempt {}/{}): {}",
                        what,
                        attempt,
                        self.max_attempts,
                        e
                    );
                    if attempt < self.max_attempts {
                        tokio::time::sleep(self.delay).await;
                    }
                }
            }
        }

        RetryOutcome::Exhausted
    }
}
