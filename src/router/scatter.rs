//! Scatter-Gather Primitive
//!
//! Launches N independent tasks, each bounded by its own timeout, and
//! collects a per-task outcome. One task's failure or timeout never cancels
//! its siblings, and outcomes come back in dispatch order so callers can
//! rely on a stable merge order.

use std::future::Future;
use std::time::Duration;

/// Terminal state of one scattered task.
#[derive(Debug)]
pub enum Outcome<T> {
    Success(T),
    Failure(String),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

/// Runs every labeled task concurrently with an independent timeout.
///
/// Tasks are spawned onto the runtime so they make progress even while
/// siblings block; a panicking task is reported as a `Failure`, not
/// propagated.
pub async fn scatter<T, Fut>(
    tasks: Vec<(String, Fut)>,
    per_task_timeout: Duration,
) -> Vec<(String, Outcome<T>)>
where
    Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
    T: Send + 'static,
{
    let mut labels = Vec::with_capacity(tasks.len());
    let mut handles = Vec::with_capacity(tasks.len());

    for (label, task) in tasks {
        labels.push(label);
        handles.push(tokio::spawn(tokio::time::timeout(per_task_timeout, task)));
    }

    let joined = futures::future::join_all(handles).await;

    labels
        .into_iter()
        .zip(joined)
        .map(|(label, joined)| {
            let outcome = match joined {
                Ok(Ok(Ok(value))) => Outcome::Success(value),
                Ok(Ok(Err(e))) => Outcome::Failure(format!("request failed: {e}")),
                Ok(Err(_)) => Outcome::Failure("request timed out".to_string()),
                Err(e) => Outcome::Failure(format!("task panicked: {e}")),
            };
            (label, outcome)
        })
        .collect()
}
