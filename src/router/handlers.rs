use super::client::NodeSet;
use super::engine::{route_by_title, route_by_type};
use super::types::{AgeRange, QueryError, ScoredDocument};
use axum::extract::{Extension, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct TitleQueryParams {
    pub titulo: String,
    pub rango_etario: Option<AgeRange>,
}

#[derive(Deserialize)]
pub struct TypeQueryParams {
    pub tipo_doc: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

/// `GET /query/title?titulo=<text>&rango_etario=<age>`
pub async fn handle_title_query(
    Query(params): Query<TitleQueryParams>,
    Extension(nodes): Extension<Arc<NodeSet>>,
) -> Result<Json<Vec<ScoredDocument>>, QueryError> {
    let results = route_by_title(&nodes, &params.titulo, params.rango_etario).await?;
    tracing::debug!(
        "title query '{}' resolved to {} documents",
        params.titulo,
        results.len()
    );
    Ok(Json(results))
}

/// `GET /query/tipo?tipo_doc=<comma-list>`
pub async fn handle_type_query(
    Query(params): Query<TypeQueryParams>,
    Extension(nodes): Extension<Arc<NodeSet>>,
) -> Result<Json<Vec<ScoredDocument>>, QueryError> {
    let kinds: Vec<String> = params
        .tipo_doc
        .split(',')
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect();

    let results = route_by_type(&nodes, &kinds).await?;
    Ok(Json(results))
}
