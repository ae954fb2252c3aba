use super::protocol::{LookupResponse, RegisterRequest, RegisterResponse};
use super::RegistryTable;
use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;

pub async fn handle_register(
    Extension(table): Extension<Arc<RegistryTable>>,
    Json(req): Json<RegisterRequest>,
) -> (StatusCode, Json<RegisterResponse>) {
    tracing::info!("registering '{}' at {}", req.name, req.address);
    table.insert(req.name, req.address);
    (StatusCode::OK, Json(RegisterResponse { registered: true }))
}

pub async fn handle_lookup(
    Extension(table): Extension<Arc<RegistryTable>>,
    Path(name): Path<String>,
) -> Result<Json<LookupResponse>, StatusCode> {
    match table.get(&name) {
        Some(entry) => Ok(Json(LookupResponse {
            address: entry.value().clone(),
        })),
        None => Err(StatusCode::NOT_FOUND),
    }
}
