use crate::router::types::AgeRange;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One entry describing a single query served by a search node.
///
/// `id` is monotonically increasing within the owning node's store; it is
/// not unique across nodes. Only the owning store and its shipper mutate a
/// record, and `replicated` only ever transitions false → true.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogRecord {
    pub id: u64,
    pub query_start_time: DateTime<Utc>,
    pub query_end_time: DateTime<Utc>,
    pub query_string: String,
    #[serde(default)]
    pub parameters: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_document_ids: Option<Vec<u64>>,
    pub result_count: u64,
    pub processing_time_ms: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_range_filter: Option<AgeRange>,
    /// At most three titles from the top of the result list.
    #[serde(default)]
    pub top_titles: Vec<String>,
    pub replicated: bool,
}
