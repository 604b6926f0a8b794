// src/item.rs

//! Stream item model and the fixed image spec table
//!
//! A `StreamItem` is one entry of a simplestreams-style catalog: the
//! identity tuple addressing it within the stream plus an open string
//! mapping of per-image attributes (`id`, `endpoint`, `region`, ...).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Publisher of the canonical Ubuntu images on Azure
pub const CANONICAL: &str = "Canonical";

/// Offer name of the canonical Ubuntu Server images
pub const UBUNTU_SERVER: &str = "UbuntuServer";

/// Publisher of the Visual Studio Windows images
pub const MS_VSTUDIO: &str = "MicrosoftVisualStudio";

/// Publisher of the Windows Server images
pub const MS_SERVER: &str = "MicrosoftWindowsServer";

/// Publisher of the CentOS images
pub const CENTOS: &str = "OpenLogic";

/// One entry of a simplestreams catalog
///
/// `data["id"]` is the provider-addressable composite key for the image.
/// The data mapping is ordered so serialized streams are deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamItem {
    pub content_id: String,
    pub product_name: String,
    pub version_name: String,
    pub item_name: String,
    pub data: BTreeMap<String, String>,
}

impl StreamItem {
    /// Create a new stream item
    pub fn new(
        content_id: impl Into<String>,
        product_name: impl Into<String>,
        version_name: impl Into<String>,
        item_name: impl Into<String>,
        data: BTreeMap<String, String>,
    ) -> Self {
        Self {
            content_id: content_id.into(),
            product_name: product_name.into(),
            version_name: version_name.into(),
            item_name: item_name.into(),
            data,
        }
    }
}

/// A family of provider images whose versions vary only by build
///
/// `(publisher, offer, sku)` addresses the family in the provider
/// catalog; `release` is the stream-side codename the synthesized items
/// are filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSpec {
    pub release: &'static str,
    pub publisher: &'static str,
    pub offer: &'static str,
    pub sku: &'static str,
}

impl ImageSpec {
    pub const fn new(
        release: &'static str,
        publisher: &'static str,
        offer: &'static str,
        sku: &'static str,
    ) -> Self {
        Self {
            release,
            publisher,
            offer,
            sku,
        }
    }
}

/// The hand-maintained table of non-Ubuntu image families to synthesize
pub const IMAGE_SPEC: [ImageSpec; 5] = [
    ImageSpec::new("win81", MS_VSTUDIO, "Windows", "Win8.1-Ent-N"),
    ImageSpec::new("win10", MS_VSTUDIO, "Windows", "Win10-Ent-N"),
    ImageSpec::new("win2012", MS_SERVER, "WindowsServer", "2012-Datacenter"),
    ImageSpec::new("win2012r2", MS_SERVER, "WindowsServer", "2012-R2-Datacenter"),
    ImageSpec::new("centos7", CENTOS, "CentOS", "7.1"),
];
