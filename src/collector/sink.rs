use crate::audit::AuditLogRecord;
use anyhow::Result;
use std::path::Path;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Column order of the sink, fixed by the downstream analytics contract.
pub const SINK_COLUMNS: [&str; 10] = [
    "timestamp_ini",
    "timestamp_fin",
    "query_busqueda",
    "score_obtenido",
    "rango_etario",
    "resultados",
    "parametros",
    "ip_cliente",
    "tiempo_procesamiento",
    "cantidad_resultados",
];

/// Durable append-only CSV sink.
///
/// The file handle lives behind a mutex: concurrent `receive_log` calls may
/// deserialize in parallel, but the append itself is a single-writer
/// critical section so no two rows ever interleave.
pub struct CsvLogSink {
    file: Mutex<File>,
}

impl CsvLogSink {
    /// Opens (or creates) the sink file, writing the header row only when
    /// the file is new.
    pub async fn open(path: &Path) -> Result<Self> {
        let is_new = tokio::fs::metadata(path).await.is_err();

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;

        if is_new {
            let header = format!("{}\n", SINK_COLUMNS.join(","));
            file.write_all(header.as_bytes()).await?;
            file.flush().await?;
        }

        Ok(Self {
            file: Mutex::new(file),
        })
    }

    pub async fn append(&self, record: &AuditLogRecord) -> Result<()> {
        let row = render_row(record)?;

        let mut file = self.file.lock().await;
        file.write_all(row.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

fn render_row(record: &AuditLogRecord) -> Result<String> {
    let resultados = match &record.result_document_ids {
        Some(ids) => serde_json::to_string(ids)?,
        None => String::new(),
    };
    let parametros = serde_json::to_string(&record.parameters)?;
    let rango_etario = record
        .age_range_filter
        .map(|r| r.as_str().to_string())
        .unwrap_or_default();

    let fields = [
        record.query_start_time.to_rfc3339(),
        record.query_end_time.to_rfc3339(),
        record.query_string.clone(),
        // No aggregate score is recorded per query; the column is kept for
        // sink-format compatibility.
        String::new(),
        rango_etario,
        resultados,
        parametros,
        record.client_address.clone().unwrap_or_default(),
        format!("{}", record.processing_time_ms),
        record.result_count.to_string(),
    ];

    let mut row = fields
        .iter()
        .map(|f| csv_field(f))
        .collect::<Vec<_>>()
        .join(",");
    row.push('\n');
    Ok(row)
}

/// Quotes a field when it contains a delimiter, quote, or newline;
/// inner quotes are doubled.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
