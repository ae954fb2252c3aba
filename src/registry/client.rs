use super::protocol::{
    ENDPOINT_LOOKUP, ENDPOINT_REGISTER, LookupResponse, RegisterRequest,
};
use anyhow::Result;
use std::time::Duration;

/// Client side of the registry contract.
///
/// `lookup` distinguishes "name not registered yet" (`Ok(None)`) from a
/// registry that cannot be reached (`Err`); callers retry both, but the
/// distinction keeps the logs honest.
#[derive(Clone)]
pub struct RegistryClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl RegistryClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    pub async fn register(&self, name: &str, address: &str) -> Result<()> {
        let payload = RegisterRequest {
            name: name.to_string(),
            address: address.to_string(),
        };
        let response = self
            .http_client
            .post(format!("{}{}", self.base_url, ENDPOINT_REGISTER))
            .json(&payload)
            .timeout(Duration::from_secs(5))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "register failed with status {}",
                response.status()
            ));
        }
        Ok(())
    }

    pub async fn lookup(&self, name: &str) -> Result<Option<String>> {
        let response = self
            .http_client
            .get(format!("{}{}/{}", self.base_url, ENDPOINT_LOOKUP, name))
            .timeout(Duration::from_secs(5))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "lookup failed with status {}",
                response.status()
            ));
        }

        let body: LookupResponse = response.json().await?;
        Ok(Some(body.address))
    }
}
