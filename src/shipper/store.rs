use crate::audit::AuditLogRecord;
use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::time::Duration;

/// Contract of a search node's local audit store.
///
/// `fetch_pending` is the authoritative "needs shipping" filter: records
/// with `replicated = false` and `id` greater than the caller's cursor,
/// ordered by `id` ascending. `mark_replicated` is the only mutation this
/// subsystem performs, and it never runs before the collector has
/// acknowledged the record.
#[async_trait]
pub trait AuditStore: Send + Sync {
    async fn ping(&self) -> Result<()>;
    async fn fetch_pending(&self, after_id: u64) -> Result<Vec<AuditLogRecord>>;
    async fn mark_replicated(&self, id: u64) -> Result<()>;
}

/// Audit store reached over the owning node's internal HTTP surface.
pub struct HttpAuditStore {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpAuditStore {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl AuditStore for HttpAuditStore {
    async fn ping(&self) -> Result<()> {
        let response = self
            .http_client
            .get(format!("{}/health", self.base_url))
            .timeout(Duration::from_secs(5))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "store health probe returned status {}",
                response.status()
            ));
        }
        Ok(())
    }

    async fn fetch_pending(&self, after_id: u64) -> Result<Vec<AuditLogRecord>> {
        let response = self
            .http_client
            .get(format!("{}/internal/audit/pending", self.base_url))
            .query(&[("after", after_id)])
            .timeout(Duration::from_secs(10))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "pending fetch returned status {}",
                response.status()
            ));
        }
        Ok(response.json().await?)
    }

    async fn mark_replicated(&self, id: u64) -> Result<()> {
        let response = self
            .http_client
            .post(format!("{}/internal/audit/replicated/{}", self.base_url, id))
            .timeout(Duration::from_secs(10))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "mark replicated returned status {}",
                response.status()
            ));
        }
        Ok(())
    }
}

/// In-memory audit store, used by tests and demo setups.
#[derive(Default)]
pub struct MemoryAuditStore {
    records: DashMap<u64, AuditLogRecord>,
}

impl MemoryAuditStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, record: AuditLogRecord) {
        self.records.insert(record.id, record);
    }

    pub fn get(&self, id: u64) -> Option<AuditLogRecord> {
        self.records.get(&id).map(|entry| entry.value().clone())
    }
}

#[async_trait]
impl AuditStore for MemoryAuditStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn fetch_pending(&self, after_id: u64) -> Result<Vec<AuditLogRecord>> {
        let mut pending: Vec<AuditLogRecord> = self
            .records
            .iter()
            .filter(|entry| entry.value().id > after_id && !entry.value().replicated)
            .map(|entry| entry.value().clone())
            .collect();
        pending.sort_by_key(|record| record.id);
        Ok(pending)
    }

    async fn mark_replicated(&self, id: u64) -> Result<()> {
        match self.records.get_mut(&id) {
            Some(mut entry) => {
                entry.value_mut().replicated = true;
                Ok(())
            }
            None => Err(anyhow::anyhow!("no audit record with id {}", id)),
        }
    }
}
