//! Log Collector Module
//!
//! The singleton sink for audit records from every shipper. Appends each
//! received record to a fixed-column CSV stream in arrival order, performs
//! no deduplication (at-least-once delivery means redelivered records show
//! up twice), and publishes its own address in the service registry under a
//! well-known name for the process lifetime.
//!
//! ## Submodules
//! - **`client`**: Delivery client used by shippers.
//! - **`handlers`**: HTTP request handler for `receive_log`.
//! - **`sink`**: The durable append-only CSV sink.

pub mod client;
pub mod handlers;
pub mod sink;


/// Logical name the collector registers under and shippers resolve.
pub const COLLECTOR_SERVICE_NAME: &str = "log-collector";
