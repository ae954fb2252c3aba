use super::types::{AgeRange, Document};

pub const TITLE_WEIGHT: f64 = 3.0;
pub const KEYWORD_WEIGHT: f64 = 2.0;
pub const DESCRIPTION_WEIGHT: f64 = 1.0;
pub const AGE_RANGE_BONUS: f64 = 2.0;

/// Splits a raw query into lowercase terms on whitespace.
pub fn tokenize_query(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .map(|term| term.to_lowercase())
        .collect()
}

/// Relevance of one document against an already-tokenized query.
///
/// Title and description hits count terms found as case-insensitive
/// substrings; a keyword hit is a term that substring-matches any keyword.
/// Matching the caller's age-range filter adds a flat bonus.
pub fn score_document(doc: &Document, terms: &[String], age_filter: Option<AgeRange>) -> f64 {
    let title = doc.title.to_lowercase();
    let description = doc.description.to_lowercase();
    let keywords: Vec<String> = doc.keywords.iter().map(|k| k.to_lowercase()).collect();

    let title_hits = terms.iter().filter(|t| title.contains(t.as_str())).count();
    let description_hits = terms
        .iter()
        .filter(|t| description.contains(t.as_str()))
        .count();
    let keyword_hits = terms
        .iter()
        .filter(|t| keywords.iter().any(|k| k.contains(t.as_str())))
        .count();

    let mut score = TITLE_WEIGHT * title_hits as f64
        + KEYWORD_WEIGHT * keyword_hits as f64
        + DESCRIPTION_WEIGHT * description_hits as f64;

    if age_filter == Some(doc.age_range) {
        score += AGE_RANGE_BONUS;
    }

    score
}
