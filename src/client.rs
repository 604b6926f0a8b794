// src/client.rs

//! Blocking HTTP client for the ARM compute catalog
//!
//! Implements `ComputeCatalog` against the Azure Resource Manager REST
//! API. The bearer token is supplied by the caller; this client never
//! acquires or refreshes credentials, and it never retries. Any
//! provider fault is surfaced to the caller as a `CatalogError`.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::catalog::{CatalogError, ComputeCatalog, ImageMetadata, Region};
use crate::error::{Error, Result};

/// Default ARM management endpoint
pub const MANAGEMENT_ENDPOINT: &str = "https://management.azure.com";

/// Timeout for catalog requests (30 seconds)
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// API version of the compute image endpoints
const COMPUTE_API_VERSION: &str = "2016-03-30";

/// API version of the subscription locations endpoint
const LOCATIONS_API_VERSION: &str = "2016-06-01";

/// ARM compute catalog client
pub struct ArmComputeClient {
    client: Client,
    endpoint: String,
    subscription_id: String,
    token: String,
}

impl ArmComputeClient {
    /// Create a client against the default management endpoint
    pub fn new(subscription_id: &str, token: &str) -> Result<Self> {
        Self::with_endpoint(subscription_id, token, MANAGEMENT_ENDPOINT)
    }

    /// Create a client against a specific management endpoint
    pub fn with_endpoint(subscription_id: &str, token: &str, endpoint: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::Init(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            subscription_id: subscription_id.to_string(),
            token: token.to_string(),
        })
    }

    fn get_json(&self, path: &str, api_version: &str) -> std::result::Result<Value, CatalogError> {
        let url = format!("{}{}?api-version={}", self.endpoint, path, api_version);
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .map_err(|e| CatalogError::new(None, format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<Value>().unwrap_or(Value::Null);
            return Err(decode_error(status, &body));
        }
        response
            .json()
            .map_err(|e| CatalogError::new(None, format!("invalid JSON from {url}: {e}")))
    }

    fn vmimage_path(&self, region: &str, publisher: &str, offer: &str, sku: &str) -> String {
        format!(
            "/subscriptions/{}/providers/Microsoft.Compute/locations/{}/publishers/{}/artifacttypes/vmimage/offers/{}/skus/{}",
            self.subscription_id, region, publisher, offer, sku
        )
    }
}

/// Map a failed ARM response to a catalog error
///
/// ARM error bodies are either `{"error": {"code", "message"}}` or a
/// bare `{"code", "message"}`. A 404 without a code still has to be
/// distinguishable as not-found.
fn decode_error(status: StatusCode, body: &Value) -> CatalogError {
    let detail = body.get("error").unwrap_or(body);
    let code = detail
        .get("code")
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| (status == StatusCode::NOT_FOUND).then(|| "NotFound".to_string()));
    let message = detail
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {status}"));
    CatalogError::new(code, message)
}

#[derive(Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Deserialize)]
struct ResourceList<T> {
    value: Vec<T>,
}

impl ComputeCatalog for ArmComputeClient {
    fn get_image(
        &self,
        region: &str,
        publisher: &str,
        offer: &str,
        sku: &str,
        version: &str,
    ) -> std::result::Result<ImageMetadata, CatalogError> {
        let path = format!(
            "{}/versions/{}",
            self.vmimage_path(region, publisher, offer, sku),
            version
        );
        let body = self.get_json(&path, COMPUTE_API_VERSION)?;
        serde_json::from_value(body)
            .map_err(|e| CatalogError::new(None, format!("invalid image metadata: {e}")))
    }

    fn list_image_versions(
        &self,
        region: &str,
        publisher: &str,
        offer: &str,
        sku: &str,
    ) -> std::result::Result<Vec<String>, CatalogError> {
        let path = format!("{}/versions", self.vmimage_path(region, publisher, offer, sku));
        let body = self.get_json(&path, COMPUTE_API_VERSION)?;
        let versions: Vec<NamedResource> = serde_json::from_value(body)
            .map_err(|e| CatalogError::new(None, format!("invalid version listing: {e}")))?;
        Ok(versions.into_iter().map(|version| version.name).collect())
    }

    fn list_regions(&self) -> std::result::Result<Vec<Region>, CatalogError> {
        let path = format!("/subscriptions/{}/locations", self.subscription_id);
        let body = self.get_json(&path, LOCATIONS_API_VERSION)?;
        let regions: ResourceList<Region> = serde_json::from_value(body)
            .map_err(|e| CatalogError::new(None, format!("invalid region listing: {e}")))?;
        Ok(regions.value)
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
