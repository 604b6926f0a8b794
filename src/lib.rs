// src/lib.rs

//! Azure Image Streams
//!
//! Converts Ubuntu cloud-images simplestreams entries into Azure ARM
//! image streams, verifying every converted entry against the live ARM
//! catalog, and synthesizes per-version items for a fixed table of
//! third-party image specs.
//!
//! # Architecture
//!
//! - Identifier parsing: legacy composite image ids -> `(sku, version)`
//! - Item conversion: identity/endpoint rewrite, verified per item
//! - Catalog seam: `ComputeCatalog` trait, blocking calls, no retries
//! - Spec synthesis: lazy region x version enumeration per image spec
//! - Assembly: one pass, batch items first, then spec items

pub mod assemble;
pub mod catalog;
pub mod client;
pub mod convert;
mod error;
pub mod id;
pub mod item;
pub mod source;
pub mod synth;

pub use assemble::{
    get_azure_credentials, make_azure_items, AzureCredentials, CloudCredentials, CredentialsFile,
};
pub use catalog::{
    arm_image_exists, CatalogError, ComputeCatalog, ImageCoordinates, ImageMetadata, Region,
};
pub use client::{ArmComputeClient, MANAGEMENT_ENDPOINT};
pub use convert::{convert_cloud_images_items, convert_item_to_arm};
pub use error::{Error, Result};
pub use id::parse_id;
pub use item::{
    ImageSpec, StreamItem, CANONICAL, CENTOS, IMAGE_SPEC, MS_SERVER, MS_VSTUDIO, UBUNTU_SERVER,
};
pub use source::{items_from_index, ItemSource, StreamSource, DEFAULT_STREAM_URL};
pub use synth::{make_item, make_spec_items, SpecItems};
