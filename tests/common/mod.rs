// tests/common/mod.rs

//! Shared test collaborators for integration tests.

use std::cell::RefCell;
use std::collections::BTreeMap;

use azure_image_streams::{
    CatalogError, ComputeCatalog, ImageMetadata, ItemSource, Region, Result, StreamItem,
};

/// A current-form upstream identifier for Ubuntu 12.04.5 LTS
pub const CURRENT_ID: &str = "b39f27a8b8c64d52b05eac6a62ebad85__Ubuntu-12_04_5-LTS-amd64-\
                              server-20140924.4-en-us-30GB";

/// In-memory catalog with canned regions and versions.
///
/// Records every image lookup and version listing so tests can assert
/// call ordering and counts.
pub struct FakeCatalog {
    pub regions: Vec<Region>,
    pub versions: Vec<String>,
    pub endpoint: String,
    pub get_error: Option<CatalogError>,
    pub get_calls: RefCell<Vec<Vec<String>>>,
    pub list_calls: RefCell<Vec<Vec<String>>>,
}

impl FakeCatalog {
    pub fn new(endpoint: &str, regions: Vec<Region>, versions: Vec<String>) -> Self {
        Self {
            regions,
            versions,
            endpoint: endpoint.to_string(),
            get_error: None,
            get_calls: RefCell::new(Vec::new()),
            list_calls: RefCell::new(Vec::new()),
        }
    }
}

impl ComputeCatalog for FakeCatalog {
    fn get_image(
        &self,
        region: &str,
        publisher: &str,
        offer: &str,
        sku: &str,
        version: &str,
    ) -> std::result::Result<ImageMetadata, CatalogError> {
        self.get_calls.borrow_mut().push(vec![
            region.to_string(),
            publisher.to_string(),
            offer.to_string(),
            sku.to_string(),
            version.to_string(),
        ]);
        if let Some(err) = &self.get_error {
            return Err(err.clone());
        }
        serde_json::from_value(serde_json::json!({
            "name": version,
            "location": region,
        }))
        .map_err(|e| CatalogError::new(None, e.to_string()))
    }

    fn list_image_versions(
        &self,
        region: &str,
        publisher: &str,
        offer: &str,
        sku: &str,
    ) -> std::result::Result<Vec<String>, CatalogError> {
        self.list_calls.borrow_mut().push(vec![
            region.to_string(),
            publisher.to_string(),
            offer.to_string(),
            sku.to_string(),
        ]);
        Ok(self.versions.clone())
    }

    fn list_regions(&self) -> std::result::Result<Vec<Region>, CatalogError> {
        Ok(self.regions.clone())
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Item source serving a fixed list.
pub struct FakeSource {
    pub items: Vec<StreamItem>,
}

impl ItemSource for FakeSource {
    fn items(&self) -> Result<Vec<StreamItem>> {
        Ok(self.items.clone())
    }
}

/// An upstream-shaped item as the cloud-images stream would publish it.
pub fn make_old_item(item_id: &str, region: &str) -> StreamItem {
    let mut data = BTreeMap::new();
    data.insert("id".to_string(), item_id.to_string());
    data.insert("foo".to_string(), "bar".to_string());
    data.insert("endpoint".to_string(), "http://example.com/old".to_string());
    data.insert("region".to_string(), region.to_string());
    StreamItem::new("aa", "bb", "cc", "99", data)
}
