use serde::{Deserialize, Serialize};

/// Endpoint for publishing a service address under a logical name.
pub const ENDPOINT_REGISTER: &str = "/register";
/// Endpoint for resolving a logical name, keyed by path segment.
pub const ENDPOINT_LOOKUP: &str = "/lookup";

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub address: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub registered: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LookupResponse {
    pub address: String,
}
