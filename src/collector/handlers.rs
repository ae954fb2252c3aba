use super::sink::CsvLogSink;
use crate::audit::AuditLogRecord;
use axum::extract::Extension;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Endpoint shippers deliver records to.
pub const ENDPOINT_RECEIVE_LOG: &str = "/log";

#[derive(Debug, Serialize, Deserialize)]
pub struct ReceiveLogAck {
    pub status: String,
}

/// `POST /log` — appends one audit record to the sink.
///
/// No deduplication: a redelivered record is appended again. Losing a
/// record would be a bug; a duplicate row is not.
pub async fn handle_receive_log(
    Extension(sink): Extension<Arc<CsvLogSink>>,
    Json(record): Json<AuditLogRecord>,
) -> (StatusCode, Json<ReceiveLogAck>) {
    match sink.append(&record).await {
        Ok(()) => {
            tracing::debug!(
                "stored audit record {} from {:?}",
                record.id,
                record.client_address
            );
            (
                StatusCode::OK,
                Json(ReceiveLogAck {
                    status: "stored".to_string(),
                }),
            )
        }
        Err(e) => {
            tracing::error!("failed to append audit record {}: {}", record.id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ReceiveLogAck {
                    status: "append failed".to_string(),
                }),
            )
        }
    }
}
