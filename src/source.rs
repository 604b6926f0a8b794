// src/source.rs

//! Upstream simplestreams item source
//!
//! The upstream publisher exposes its catalog as a JSON index nested
//! product -> version -> item. `items_from_index` flattens that nesting
//! into `StreamItem` values, folding product- and version-level string
//! attributes into each item's data mapping (item-level values win).

use std::time::Duration;

use serde_json::Value;
use tracing::info;
use url::Url;

use crate::error::{Error, Result};
use crate::item::StreamItem;

/// Index of the released Azure stream published by cloud-images
pub const DEFAULT_STREAM_URL: &str =
    "https://cloud-images.ubuntu.com/releases/streams/v1/com.ubuntu.cloud:released:azure.json";

/// Timeout for index fetches (30 seconds)
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Source of upstream stream items
pub trait ItemSource {
    /// Fetch the source's current item list
    fn items(&self) -> Result<Vec<StreamItem>>;
}

/// Item source backed by a simplestreams index URL
pub struct StreamSource {
    url: Url,
    client: reqwest::blocking::Client,
}

impl StreamSource {
    /// Create a source for the given index URL
    pub fn new(url: &str) -> Result<Self> {
        let url = Url::parse(url).map_err(|e| Error::Source(format!("invalid URL {url}: {e}")))?;
        let client = reqwest::blocking::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::Init(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { url, client })
    }
}

impl ItemSource for StreamSource {
    fn items(&self) -> Result<Vec<StreamItem>> {
        info!("fetching stream index from {}", self.url);
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .map_err(|e| Error::Source(format!("failed to fetch {}: {e}", self.url)))?;
        if !response.status().is_success() {
            return Err(Error::Source(format!(
                "HTTP {} from {}",
                response.status(),
                self.url
            )));
        }
        let index: Value = response
            .json()
            .map_err(|e| Error::Source(format!("failed to parse index JSON: {e}")))?;
        items_from_index(&index)
    }
}

fn scalar_fields(object: &serde_json::Map<String, Value>) -> impl Iterator<Item = (&str, &str)> {
    object
        .iter()
        .filter_map(|(key, value)| value.as_str().map(|value| (key.as_str(), value)))
}

/// Flatten a simplestreams index document into stream items
///
/// Product- and version-level string attributes are inherited by every
/// item beneath them; an item-level value overrides both.
pub fn items_from_index(index: &Value) -> Result<Vec<StreamItem>> {
    let content_id = index
        .get("content_id")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::Source("index has no content_id".to_string()))?;

    let mut items = Vec::new();
    let Some(products) = index.get("products").and_then(Value::as_object) else {
        return Ok(items);
    };
    for (product_name, product) in products {
        let Some(product) = product.as_object() else {
            continue;
        };
        let Some(versions) = product.get("versions").and_then(Value::as_object) else {
            continue;
        };
        for (version_name, version) in versions {
            let Some(version) = version.as_object() else {
                continue;
            };
            let Some(entries) = version.get("items").and_then(Value::as_object) else {
                continue;
            };
            for (item_name, entry) in entries {
                let Some(entry) = entry.as_object() else {
                    continue;
                };
                let mut data = std::collections::BTreeMap::new();
                for (key, value) in scalar_fields(product)
                    .chain(scalar_fields(version))
                    .chain(scalar_fields(entry))
                {
                    data.insert(key.to_string(), value.to_string());
                }
                items.push(StreamItem::new(
                    content_id,
                    product_name.clone(),
                    version_name.clone(),
                    item_name.clone(),
                    data,
                ));
            }
        }
    }
    Ok(items)
}
