//! Federated Title Search Library
//!
//! This library crate defines the core modules of a federated search system
//! with centralized audit-log replication. It is the foundation for the
//! binary executable (`main.rs`), which can run any of the system's roles.
//!
//! ## Architecture Modules
//! The system is composed of five loosely coupled subsystems:
//!
//! - **`router`**: The caller-facing query aggregator. Fans a title query out
//!   to every configured search node concurrently, scores and merges the
//!   surviving results, and returns one ranked list.
//! - **`audit`**: The shared audit-record schema. One record describes one
//!   query served by a search node, including its replication flag.
//! - **`shipper`**: The per-node export worker. Incrementally reads
//!   not-yet-replicated audit records from a node's local store and delivers
//!   them to the central collector, marking them replicated on ack.
//! - **`collector`**: The central durable sink. Accepts audit records from
//!   every shipper and appends them to a fixed-column CSV stream.
//! - **`registry`**: The name-based discovery layer. Maps logical service
//!   names to network addresses so shippers can locate the collector.

pub mod audit;
pub mod collector;
pub mod registry;
pub mod router;
pub mod shipper;
