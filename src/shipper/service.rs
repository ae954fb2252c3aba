use super::retry::{RetryOutcome, RetryPolicy};
use super::store::AuditStore;
use crate::audit::AuditLogRecord;
use crate::registry::client::RegistryClient;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Startup probe against the node's local store.
pub const STORE_STARTUP_RETRY: RetryPolicy = RetryPolicy::new(10, Duration::from_secs(2));
/// Startup probe against the registry for the collector's address.
pub const DISCOVERY_RETRY: RetryPolicy = RetryPolicy::new(20, Duration::from_secs(3));
/// Cadence of the steady-state replication sweep.
pub const SHIP_INTERVAL: Duration = Duration::from_secs(5);

/// Seam between the shipper and the collector, so sweeps are testable
/// without a network.
#[async_trait]
pub trait LogDelivery: Send + Sync {
    async fn deliver(&self, record: &AuditLogRecord) -> Result<()>;
}

/// Tally of one replication sweep.
#[derive(Debug, Default, PartialEq)]
pub struct SweepReport {
    pub delivered: usize,
    pub failed: usize,
}

/// The per-node replication worker.
///
/// Fully serialized: one in-flight record at a time, in id order, so the
/// collector sees each node's records in audit order (for the ones that
/// succeed). The cursor is an in-memory hint, reset to 0 on restart; the
/// store's `replicated` flag stays authoritative.
pub struct LogShipper {
    store: Arc<dyn AuditStore>,
    delivery: Arc<dyn LogDelivery>,
    cursor: u64,
}

impl LogShipper {
    pub fn new(store: Arc<dyn AuditStore>, delivery: Arc<dyn LogDelivery>) -> Self {
        Self {
            store,
            delivery,
            cursor: 0,
        }
    }

    /// Resumes from a known cursor position. The cursor is a hint; starting
    /// from 0 is always correct, just more work for the store.
    pub fn with_cursor(
        store: Arc<dyn AuditStore>,
        delivery: Arc<dyn LogDelivery>,
        cursor: u64,
    ) -> Self {
        Self {
            store,
            delivery,
            cursor,
        }
    }

    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    /// One sweep: fetch everything pending past the cursor and deliver it
    /// record by record.
    ///
    /// The cursor only advances across the prefix of the sweep that
    /// delivered cleanly. Once a delivery fails, later successes are still
    /// marked replicated but the cursor stays put, so the failed record is
    /// fetched again next sweep instead of being silently skipped.
    pub async fn ship_once(&mut self) -> Result<SweepReport> {
        let pending = self.store.fetch_pending(self.cursor).await?;
        let mut report = SweepReport::default();
        let mut advance_cursor = true;

        for record in pending {
            match self.delivery.deliver(&record).await {
                Ok(()) => {
                    self.store.mark_replicated(record.id).await?;
                    if advance_cursor {
                        self.cursor = record.id;
                    }
                    report.delivered += 1;
                    tracing::debug!("replicated audit record {}", record.id);
                }
                Err(e) => {
                    advance_cursor = false;
                    report.failed += 1;
                    tracing::warn!(
                        "delivery of audit record {} failed, will retry next sweep: {}",
                        record.id,
                        e
                    );
                }
            }
        }

        Ok(report)
    }

    /// Steady-state loop: one sweep every `SHIP_INTERVAL`, forever.
    /// Sweep-level errors (store unreachable mid-run) are logged and the
    /// next tick tries again.
    pub async fn run(mut self) {
        let mut interval = tokio::time::interval(SHIP_INTERVAL);

        loop {
            interval.tick().await;
            match self.ship_once().await {
                Ok(report) if report.delivered > 0 || report.failed > 0 => {
                    tracing::info!(
                        "sweep finished: {} delivered, {} failed",
                        report.delivered,
                        report.failed
                    );
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("sweep aborted: {}", e);
                }
            }
        }
    }
}

/// Startup protocol: wait for the local store, then resolve the collector
/// by name. Exhausting either retry budget is fatal for the process.
pub async fn discover_collector(
    store: &Arc<dyn AuditStore>,
    registry: &RegistryClient,
    collector_name: &str,
) -> Result<String> {
    let store_ready = STORE_STARTUP_RETRY
        .run("local audit store", || {
            let store = store.clone();
            async move { store.ping().await }
        })
        .await;
    if matches!(store_ready, RetryOutcome::Exhausted) {
        return Err(anyhow::anyhow!(
            "local audit store unreachable after {} attempts",
            STORE_STARTUP_RETRY.max_attempts
        ));
    }

    let resolved = DISCOVERY_RETRY
        .run("collector discovery", || async {
            match registry.lookup(collector_name).await? {
                Some(address) => Ok(address),
                None => Err(anyhow::anyhow!(
                    "'{}' not registered yet",
                    collector_name
                )),
            }
        })
        .await;

    match resolved {
        RetryOutcome::Ready(address) => Ok(address),
        RetryOutcome::Exhausted => Err(anyhow::anyhow!(
            "collector '{}' not discoverable after {} attempts",
            collector_name,
            DISCOVERY_RETRY.max_attempts
        )),
    }
}
