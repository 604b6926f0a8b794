// src/synth.rs

//! Synthesis of stream items for fixed image specs
//!
//! For one `ImageSpec` the provider catalog is asked once for the
//! published version labels, then every (region, version) pair gets a
//! region-scoped lookup to confirm the image is addressable there
//! before an item is emitted. The sequence is lazy and restartable:
//! every fresh `make_spec_items` call re-queries the catalog.

use std::collections::BTreeMap;

use tracing::warn;

use crate::catalog::{ComputeCatalog, Region};
use crate::error::Result;
use crate::item::{ImageSpec, StreamItem};

/// Content id of the released Azure stream
pub const CONTENT_ID: &str = "com.ubuntu.cloud:released:azure";

/// Architecture of every published image
pub const ARCH: &str = "amd64";

/// The provider's native hypervisor
pub const HYPER_V: &str = "Hyper-V";

// "Canada East" -> "caee": first two letters of the first word, first
// letter of each later word doubled.
fn compress_region_name(display_name: &str) -> String {
    let mut compressed = String::new();
    for (index, word) in display_name.to_lowercase().split_whitespace().enumerate() {
        if index == 0 {
            compressed.extend(word.chars().take(2));
        } else if let Some(first) = word.chars().next() {
            compressed.push(first);
            compressed.push(first);
        }
    }
    compressed
}

/// Build one stream item for a spec'd image in one region
///
/// `version_index` orders the item within the stream; `version_label`
/// is the provider's version string and becomes the last URN segment.
/// CentOS offers file under the `server` product family, everything
/// else under `windows`, matching the upstream catalog convention.
pub fn make_item(
    version_index: &str,
    version_label: &str,
    spec: &ImageSpec,
    region_display_name: &str,
    endpoint: &str,
) -> StreamItem {
    let family = if spec.offer == "CentOS" {
        "server"
    } else {
        "windows"
    };
    let urn = [spec.publisher, spec.offer, spec.sku, version_label].join(":");
    let item_name = format!(
        "{}{}i3",
        compress_region_name(region_display_name),
        version_index
    );

    let mut data = BTreeMap::new();
    data.insert("arch".to_string(), ARCH.to_string());
    data.insert("virt".to_string(), HYPER_V.to_string());
    data.insert("region".to_string(), region_display_name.to_string());
    data.insert("id".to_string(), urn);
    data.insert("label".to_string(), "release".to_string());
    data.insert("endpoint".to_string(), endpoint.to_string());
    data.insert("release".to_string(), spec.release.to_string());

    StreamItem::new(
        CONTENT_ID,
        format!("com.ubuntu.cloud:{}:{}:amd64", family, spec.release),
        version_index,
        item_name,
        data,
    )
}

/// Lazily enumerate the items for one spec across all regions
///
/// Regions iterate in the given order, versions in the catalog's
/// listing order. The version listing is issued against the first
/// region; an empty region list yields an empty sequence.
pub fn make_spec_items<'a, C: ComputeCatalog + ?Sized>(
    catalog: &'a C,
    spec: ImageSpec,
    regions: &'a [Region],
) -> SpecItems<'a, C> {
    SpecItems {
        catalog,
        spec,
        regions,
        versions: None,
        region_index: 0,
        version_index: 0,
        done: false,
    }
}

/// Iterator returned by [`make_spec_items`]
pub struct SpecItems<'a, C: ComputeCatalog + ?Sized> {
    catalog: &'a C,
    spec: ImageSpec,
    regions: &'a [Region],
    versions: Option<Vec<String>>,
    region_index: usize,
    version_index: usize,
    done: bool,
}

impl<'a, C: ComputeCatalog + ?Sized> Iterator for SpecItems<'a, C> {
    type Item = Result<StreamItem>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if self.versions.is_none() {
            let Some(first_region) = self.regions.first() else {
                self.done = true;
                return None;
            };
            match self.catalog.list_image_versions(
                &first_region.name,
                self.spec.publisher,
                self.spec.offer,
                self.spec.sku,
            ) {
                Ok(versions) => self.versions = Some(versions),
                Err(err) => {
                    self.done = true;
                    return Some(Err(err.into()));
                }
            }
        }

        loop {
            let Some(region) = self.regions.get(self.region_index) else {
                self.done = true;
                return None;
            };
            let versions = self.versions.as_ref().unwrap();
            let Some(version) = versions.get(self.version_index).cloned() else {
                self.region_index += 1;
                self.version_index = 0;
                continue;
            };
            let version_index = self.version_index;
            self.version_index += 1;

            match self.catalog.get_image(
                &region.name,
                self.spec.publisher,
                self.spec.offer,
                self.spec.sku,
                &version,
            ) {
                Ok(_) => {
                    return Some(Ok(make_item(
                        &version_index.to_string(),
                        &version,
                        &self.spec,
                        &region.display_name,
                        self.catalog.endpoint(),
                    )));
                }
                Err(err) if err.is_not_found() => {
                    warn!(
                        "{}:{}:{}:{} not addressable in {}, skipping",
                        self.spec.publisher, self.spec.offer, self.spec.sku, version, region.name
                    );
                    continue;
                }
                Err(err) => {
                    self.done = true;
                    return Some(Err(err.into()));
                }
            }
        }
    }
}
