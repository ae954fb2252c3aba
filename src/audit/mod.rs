//! Audit Record Schema
//!
//! Shared definition of the per-query audit entry that search nodes write
//! locally and shippers replicate to the central collector.

pub mod types;

pub use types::AuditLogRecord;
