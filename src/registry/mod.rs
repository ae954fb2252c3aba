//! Service Registry Module
//!
//! Name-based discovery: maps a logical service name to a reachable network
//! address. The collector registers itself here at startup; every shipper
//! looks the collector up by its well-known name, retrying while the
//! collector is still coming up.
//!
//! ## Submodules
//! - **`client`**: HTTP client used by the collector and the shippers.
//! - **`handlers`**: HTTP request handlers backing the registry server.
//! - **`protocol`**: Wire DTOs.

pub mod client;
pub mod handlers;
pub mod protocol;

#[cfg(test)]
mod tests;

use dashmap::DashMap;

/// The registry's whole state: one name → address table.
/// Registration is last-write-wins.
pub type RegistryTable = DashMap<String, String>;
