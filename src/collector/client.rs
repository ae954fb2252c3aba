use super::handlers::{ENDPOINT_RECEIVE_LOG, ReceiveLogAck};
use crate::audit::AuditLogRecord;
use crate::shipper::service::LogDelivery;
use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Delivery client used by shippers once discovery has resolved the
/// collector's address. One synchronous round trip per record.
pub struct CollectorClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl CollectorClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl LogDelivery for CollectorClient {
    async fn deliver(&self, record: &AuditLogRecord) -> Result<()> {
        let response = self
            .http_client
            .post(format!("{}{}", self.base_url, ENDPOINT_RECEIVE_LOG))
            .json(record)
            .timeout(Duration::from_secs(10))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "collector answered status {}",
                response.status()
            ));
        }

        let ack: ReceiveLogAck = response.json().await?;
        tracing::debug!("record {} acknowledged: {}", record.id, ack.status);
        Ok(())
    }
}
