use super::client::{NodeSet, SearchNode};
use super::scatter::{Outcome, scatter};
use super::scoring::{score_document, tokenize_query};
use super::types::{AgeRange, Document, QueryError, ScoredDocument};
use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;

/// Per-node budget for one query; the slowest surviving node bounds the
/// overall request latency.
pub const NODE_QUERY_TIMEOUT: Duration = Duration::from_secs(30);

/// Fans a title query out to every configured node, scores whatever the
/// live nodes returned, and merges into one ranked list.
///
/// A node that errors, times out, or answers non-2xx is logged and excluded;
/// the query itself still succeeds with the surviving subset.
pub async fn route_by_title(
    nodes: &NodeSet,
    query: &str,
    age_filter: Option<AgeRange>,
) -> Result<Vec<ScoredDocument>, QueryError> {
    if query.trim().is_empty() {
        return Err(QueryError::BlankQuery);
    }

    let terms = tokenize_query(query);
    let gathered = dispatch(nodes.all(), Some(query.to_string())).await;

    let mut results: Vec<ScoredDocument> = Vec::new();
    for (kind, outcome) in gathered {
        match outcome {
            Outcome::Success(documents) => {
                for document in documents {
                    let score = score_document(&document, &terms, age_filter);
                    results.push(ScoredDocument {
                        document,
                        source_type: kind.clone(),
                        score: Some(score),
                    });
                }
            }
            Outcome::Failure(reason) => {
                tracing::warn!("excluding node '{}' from results: {}", kind, reason);
            }
        }
    }

    // Stable sort: ties keep dispatch order, then in-node order.
    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
    });

    Ok(results)
}

/// Returns the union of the requested catalogs, unscored.
///
/// Unknown kinds are dropped rather than rejected; only an empty filtered
/// set is an input error.
pub async fn route_by_type(
    nodes: &NodeSet,
    kinds: &[String],
) -> Result<Vec<ScoredDocument>, QueryError> {
    let selected = nodes.select(kinds);
    if selected.is_empty() {
        return Err(QueryError::NoMatchingTypes);
    }

    let gathered = dispatch(selected, None).await;

    let mut results: Vec<ScoredDocument> = Vec::new();
    for (kind, outcome) in gathered {
        match outcome {
            Outcome::Success(documents) => {
                for document in documents {
                    results.push(ScoredDocument {
                        document,
                        source_type: kind.clone(),
                        score: None,
                    });
                }
            }
            Outcome::Failure(reason) => {
                tracing::warn!("excluding node '{}' from results: {}", kind, reason);
            }
        }
    }

    Ok(results)
}

async fn dispatch(
    targets: Vec<(String, Arc<dyn SearchNode>)>,
    title: Option<String>,
) -> Vec<(String, Outcome<Vec<Document>>)> {
    let tasks = targets
        .into_iter()
        .map(|(kind, node)| {
            let title = title.clone();
            let task = async move { node.search(title.as_deref()).await };
            (kind, task)
        })
        .collect();

    scatter(tasks, NODE_QUERY_TIMEOUT).await
}
