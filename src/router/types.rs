use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reader age bracket carried by every document and usable as a query filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeRange {
    Child,
    Young,
    Adult,
}

impl AgeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeRange::Child => "child",
            AgeRange::Young => "young",
            AgeRange::Adult => "adult",
        }
    }
}

/// Catalog-specific payload attached to a document.
///
/// Each catalog kind contributes its own typed variant instead of an
/// open-ended field map; nodes for catalogs this crate does not know about
/// simply omit the payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogDetails {
    Book {
        publisher: Option<String>,
        page_count: Option<u32>,
    },
    Recipe {
        ingredients: Vec<String>,
        prep_minutes: Option<u32>,
    },
}

/// A single catalog entry as returned by a search node.
///
/// Immutable from the router's perspective; `id` is unique only within the
/// owning catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: u64,
    pub title: String,
    pub authors: Vec<String>,
    pub publication_date: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub language: String,
    pub age_range: AgeRange,
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<CatalogDetails>,
}

/// A document annotated with the catalog it came from and, for title
/// queries, its relevance score. Created transiently per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredDocument {
    #[serde(flatten)]
    pub document: Document,
    pub source_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// Caller-facing query errors. Everything here maps to a 4xx response;
/// node failures are never surfaced through this type.
#[derive(Debug, Error, PartialEq)]
pub enum QueryError {
    #[error("title query must not be blank")]
    BlankQuery,
    #[error("no configured catalog matches the requested types")]
    NoMatchingTypes,
}
