//! Log Shipper Module
//!
//! One shipper runs next to each search node. It polls the node's local
//! store for audit records that have not yet been replicated, delivers them
//! to the central collector one at a time in id order, and marks each one
//! replicated only after the collector's acknowledgment.
//!
//! Startup is two bounded-retry phases: wait for the local store, then
//! resolve the collector through the registry. Exhausting either phase is a
//! fatal, operator-visible exit. The steady-state loop, by contrast, retries
//! failed deliveries forever on a fixed cadence.
//!
//! ## Submodules
//! - **`retry`**: The bounded-retry policy shared by both startup phases.
//! - **`service`**: Bootstrap and the replication sweep loop.
//! - **`store`**: The local audit-store contract and its implementations.

pub mod retry;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;
