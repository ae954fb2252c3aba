//! Log Shipper Tests
//!
//! Validates the bounded-retry policy, the replicated-flag contract (only
//! set after a real acknowledgment), and the cursor rule that keeps failed
//! records visible to later sweeps.

#[cfg(test)]
mod tests {
    use crate::audit::AuditLogRecord;
    use crate::shipper::retry::{RetryOutcome, RetryPolicy};
    use crate::shipper::service::{LogDelivery, LogShipper};
    use crate::shipper::store::{AuditStore, MemoryAuditStore};
    use anyhow::Result;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Mutex;

    fn record(id: u64) -> AuditLogRecord {
        AuditLogRecord {
            id,
            query_start_time: Utc::now(),
            query_end_time: Utc::now(),
            query_string: format!("/search?title=casa&n={id}"),
            parameters: HashMap::from([("titulo".to_string(), "casa".to_string())]),
            client_address: Some("127.0.0.1".to_string()),
            result_document_ids: Some(vec![1, 2]),
            result_count: 2,
            processing_time_ms: 12.5,
            age_range_filter: None,
            top_titles: vec!["La Casa Roja".to_string()],
            replicated: false,
        }
    }

    /// Collector stand-in that rejects a configurable set of record ids.
    #[derive(Default)]
    struct FakeCollector {
        rejected_ids: Vec<u64>,
        received: Mutex<Vec<u64>>,
    }

    #[async_trait]
    impl LogDelivery for FakeCollector {
        async fn deliver(&self, record: &AuditLogRecord) -> Result<()> {
            if self.rejected_ids.contains(&record.id) {
                return Err(anyhow::anyhow!("simulated ack failure"));
            }
            self.received.lock().await.push(record.id);
            Ok(())
        }
    }

    // ============================================================
    // RETRY POLICY
    // ============================================================

    #[tokio::test]
    async fn retry_exhausts_after_exactly_max_attempts() {
        let attempts = AtomicU32::new(0);
        let policy = RetryPolicy::new(20, Duration::ZERO);

        let outcome: RetryOutcome<()> = policy
            .run("never-ready probe", || {
                attempts.fetch_add(1, Ordering::SeqCst);
                async { Err(anyhow::anyhow!("still down")) }
            })
            .await;

        assert!(matches!(outcome, RetryOutcome::Exhausted));
        assert_eq!(attempts.load(Ordering::SeqCst), 20);
    }

    #[tokio::test]
    async fn retry_stops_probing_on_first_success() {
        let attempts = AtomicU32::new(0);
        let policy = RetryPolicy::new(10, Duration::ZERO);

        let outcome = policy
            .run("flaky probe", || {
                let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    if n < 3 {
                        Err(anyhow::anyhow!("not yet"))
                    } else {
                        Ok(n)
                    }
                }
            })
            .await;

        assert_eq!(outcome.ready(), Some(3));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    // ============================================================
    // SWEEP / REPLICATED FLAG
    // ============================================================

    #[tokio::test]
    async fn successful_sweep_marks_records_and_advances_cursor() {
        let store = Arc::new(MemoryAuditStore::new());
        for id in 1..=3 {
            store.insert(record(id));
        }
        let collector = Arc::new(FakeCollector::default());
        let mut shipper = LogShipper::new(store.clone(), collector.clone());

        let report = shipper.ship_once().await.unwrap();

        assert_eq!(report.delivered, 3);
        assert_eq!(report.failed, 0);
        assert_eq!(shipper.cursor(), 3);
        assert_eq!(*collector.received.lock().await, vec![1, 2, 3]);
        for id in 1..=3 {
            assert!(store.get(id).unwrap().replicated);
        }
    }

    #[tokio::test]
    async fn flag_stays_false_when_the_ack_fails() {
        let store = Arc::new(MemoryAuditStore::new());
        store.insert(record(1));
        let collector = Arc::new(FakeCollector {
            rejected_ids: vec![1],
            ..Default::default()
        });
        let mut shipper = LogShipper::new(store.clone(), collector);

        let report = shipper.ship_once().await.unwrap();

        assert_eq!(report.delivered, 0);
        assert_eq!(report.failed, 1);
        assert!(!store.get(1).unwrap().replicated);
        assert_eq!(shipper.cursor(), 0);
    }

    #[tokio::test]
    async fn failed_record_is_refetched_on_the_next_sweep() {
        let store = Arc::new(MemoryAuditStore::new());
        for id in 1..=3 {
            store.insert(record(id));
        }
        // Record 2 fails once; 1 and 3 go through.
        let flaky = Arc::new(FakeCollector {
            rejected_ids: vec![2],
            ..Default::default()
        });
        let mut shipper = LogShipper::new(store.clone(), flaky.clone());

        let report = shipper.ship_once().await.unwrap();
        assert_eq!(report.delivered, 2);
        assert_eq!(report.failed, 1);

        // Cursor froze before the failed id, so record 2 is still in reach.
        assert_eq!(shipper.cursor(), 1);
        assert!(store.get(3).unwrap().replicated);
        assert!(!store.get(2).unwrap().replicated);

        // Next sweep with a healthy collector picks up exactly record 2.
        let healthy = Arc::new(FakeCollector::default());
        let mut shipper = LogShipper::with_cursor(store.clone(), healthy.clone(), shipper.cursor());
        let report = shipper.ship_once().await.unwrap();

        assert_eq!(report.delivered, 1);
        assert_eq!(*healthy.received.lock().await, vec![2]);
        assert!(store.get(2).unwrap().replicated);
    }

    #[tokio::test]
    async fn restart_does_not_reship_already_replicated_records() {
        let store = Arc::new(MemoryAuditStore::new());
        for id in 1..=2 {
            store.insert(record(id));
        }
        let collector = Arc::new(FakeCollector::default());
        let mut shipper = LogShipper::new(store.clone(), collector);
        shipper.ship_once().await.unwrap();

        // Fresh shipper, cursor back at 0: the replicated flag is the
        // authoritative filter.
        let collector = Arc::new(FakeCollector::default());
        let mut restarted = LogShipper::new(store.clone(), collector.clone());
        let report = restarted.ship_once().await.unwrap();

        assert_eq!(report.delivered, 0);
        assert!(collector.received.lock().await.is_empty());
    }

    // ============================================================
    // STORE CONTRACT
    // ============================================================

    #[tokio::test]
    async fn fetch_pending_filters_and_orders_by_id() {
        let store = MemoryAuditStore::new();
        let mut replicated = record(2);
        replicated.replicated = true;
        store.insert(record(5));
        store.insert(replicated);
        store.insert(record(1));
        store.insert(record(9));

        let pending = store.fetch_pending(1).await.unwrap();
        let ids: Vec<u64> = pending.iter().map(|r| r.id).collect();

        // id 1 is behind the cursor, id 2 is already replicated.
        assert_eq!(ids, vec![5, 9]);
    }

    #[tokio::test]
    async fn record_survives_a_json_round_trip() {
        let original = record(42);
        let json = serde_json::to_string(&original).unwrap();
        let restored: AuditLogRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.id, 42);
        assert_eq!(restored.result_document_ids, Some(vec![1, 2]));
        assert_eq!(restored.top_titles, vec!["La Casa Roja"]);
        assert!(!restored.replicated);
    }
}
