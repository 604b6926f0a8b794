// src/convert.rs

//! Conversion of upstream cloud-images items into ARM items
//!
//! `convert_item_to_arm` rewrites one item's identity fields.
//! `convert_cloud_images_items` runs the whole upstream batch: region
//! resolution, identifier parsing, catalog verification, and rewrite.
//! Unknown regions are accumulated and reported as data; a claimed
//! image the catalog does not have aborts the batch.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::catalog::{arm_image_exists, ComputeCatalog, ImageCoordinates, Region};
use crate::error::{Error, Result};
use crate::id::{is_current_form, parse_id};
use crate::item::{StreamItem, CANONICAL, UBUNTU_SERVER};

/// Legacy region-restriction marker, dropped on conversion
const DISCARDED_KEY: &str = "crsn";

/// Rewrite one item's identity for the ARM catalog
///
/// The returned item carries the new composite id and endpoint, loses
/// the deprecated `crsn` key, and keeps every other field untouched.
pub fn convert_item_to_arm(item: &StreamItem, urn: &str, endpoint: &str) -> StreamItem {
    let mut data = item.data.clone();
    data.insert("id".to_string(), urn.to_string());
    data.insert("endpoint".to_string(), endpoint.to_string());
    data.remove(DISCARDED_KEY);
    StreamItem {
        content_id: item.content_id.clone(),
        product_name: item.product_name.clone(),
        version_name: item.version_name.clone(),
        item_name: item.item_name.clone(),
        data,
    }
}

fn item_field<'a>(item: &'a StreamItem, key: &str) -> Result<&'a str> {
    item.data
        .get(key)
        .map(String::as_str)
        .ok_or_else(|| Error::Source(format!("item {} has no '{}' field", item.item_name, key)))
}

/// Convert a batch of upstream items, verifying each against the catalog
///
/// Items whose region display name is not in `regions` are skipped and
/// reported in the returned set. Items that parse but are not in the
/// current publishable form raise `UnexpectedImage` before the catalog
/// is probed; items the catalog does not have raise `MissingImage`.
pub fn convert_cloud_images_items<C: ComputeCatalog + ?Sized>(
    catalog: &C,
    regions: &[Region],
    items: &[StreamItem],
) -> Result<(Vec<StreamItem>, BTreeSet<String>)> {
    let directory: BTreeMap<&str, &str> = regions
        .iter()
        .map(|region| (region.display_name.as_str(), region.name.as_str()))
        .collect();

    let mut converted = Vec::new();
    let mut unknown_regions = BTreeSet::new();
    for item in items {
        let display_name = item_field(item, "region")?;
        let Some(region_name) = directory.get(display_name) else {
            unknown_regions.insert(display_name.to_string());
            continue;
        };

        let item_id = item_field(item, "id")?;
        let (sku, version) = parse_id(item_id)?;
        if !is_current_form(item_id) {
            return Err(Error::UnexpectedImage(item_id.to_string()));
        }

        let image = ImageCoordinates::new(CANONICAL, UBUNTU_SERVER, sku, version);
        let urn = image.urn();
        if !arm_image_exists(catalog, region_name, &image)? {
            return Err(Error::MissingImage(format!("{urn} not in {display_name}")));
        }

        debug!("converted {} -> {}", item_id, urn);
        converted.push(convert_item_to_arm(item, &urn, catalog.endpoint()));
    }
    Ok((converted, unknown_regions))
}
