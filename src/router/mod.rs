//! Query Router Module
//!
//! The caller-facing aggregator of the federation. On each query it
//! dispatches one request per configured search node **concurrently**,
//! tolerates per-node failures, scores the documents that did arrive, and
//! returns a single ranked list.
//!
//! ## Responsibilities
//! - **Scatter-gather**: Launching independent, individually timed-out
//!   sub-requests and collecting per-task outcomes without letting one
//!   failure cancel its siblings.
//! - **Scoring**: Ranking documents by case-insensitive term matches against
//!   title, keywords, and description, with an age-range bonus.
//! - **Merging**: Stable descending sort by score; ties keep arrival order
//!   (node dispatch order, then in-node result order).
//! - **API**: Exposing the query endpoints via the Axum web server.
//!
//! ## Submodules
//! - **`client`**: The search-node client contract and its HTTP implementation.
//! - **`engine`**: The route-by-title / route-by-type core logic.
//! - **`handlers`**: HTTP request handlers.
//! - **`scatter`**: The concurrent fan-out primitive.
//! - **`scoring`**: Tokenization and the relevance formula.
//! - **`types`**: Document schema and API DTOs.

pub mod client;
pub mod engine;
pub mod handlers;
pub mod scatter;
pub mod scoring;
pub mod types;
