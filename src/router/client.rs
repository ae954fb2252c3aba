use super::types::Document;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Contract of a single-catalog search node.
///
/// A node queried without a title filter returns its full catalog. The node
/// itself records one audit entry per `search` call; the router never sees
/// that side of it.
#[async_trait]
pub trait SearchNode: Send + Sync {
    async fn search(&self, title: Option<&str>) -> Result<Vec<Document>>;
    async fn health(&self) -> Result<()>;
}

/// HTTP implementation of the node contract (`GET /search?title=`).
pub struct HttpSearchNode {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpSearchNode {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl SearchNode for HttpSearchNode {
    async fn search(&self, title: Option<&str>) -> Result<Vec<Document>> {
        let mut request = self
            .http_client
            .get(format!("{}/search", self.base_url));
        if let Some(title) = title {
            request = request.query(&[("title", title)]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "search returned status {}",
                response.status()
            ));
        }

        Ok(response.json().await?)
    }

    async fn health(&self) -> Result<()> {
        let response = self
            .http_client
            .get(format!("{}/health", self.base_url))
            .timeout(Duration::from_secs(5))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "health probe returned status {}",
                response.status()
            ));
        }
        Ok(())
    }
}

/// The configured federation, in dispatch order.
///
/// Order matters: tie-breaking in the merged ranking follows it.
pub struct NodeSet {
    nodes: Vec<(String, Arc<dyn SearchNode>)>,
}

impl NodeSet {
    pub fn new(nodes: Vec<(String, Arc<dyn SearchNode>)>) -> Self {
        Self { nodes }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn all(&self) -> Vec<(String, Arc<dyn SearchNode>)> {
        self.nodes.clone()
    }

    /// Keeps only the requested kinds, preserving dispatch order.
    /// Unknown kinds are dropped silently.
    pub fn select(&self, kinds: &[String]) -> Vec<(String, Arc<dyn SearchNode>)> {
        self.nodes
            .iter()
            .filter(|(kind, _)| kinds.iter().any(|k| k == kind))
            .cloned()
            .collect()
    }
}
