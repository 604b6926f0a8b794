// src/catalog.rs

//! Provider catalog interface and the image existence check
//!
//! `ComputeCatalog` is the seam between the conversion pipeline and the
//! provider: image lookup, version listing and region listing, each a
//! blocking call. `arm_image_exists` wraps the lookup and turns exactly
//! one failure mode ("the image is not there") into data; every other
//! catalog fault stays an error.

use serde::Deserialize;
use thiserror::Error;

use crate::error::Result;

/// A provider region as `(name, display_name)`
///
/// The upstream stream addresses regions by display name ("Canada
/// East"); the provider API addresses them by name ("canadaeast").
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub name: String,
    pub display_name: String,
}

impl Region {
    pub fn new(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
        }
    }
}

/// Metadata returned by a successful image lookup
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMetadata {
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// Fully-qualified ARM coordinates of one image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCoordinates {
    pub publisher: String,
    pub offer: String,
    pub sku: String,
    pub version: String,
}

impl ImageCoordinates {
    pub fn new(
        publisher: impl Into<String>,
        offer: impl Into<String>,
        sku: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            publisher: publisher.into(),
            offer: offer.into(),
            sku: sku.into(),
            version: version.into(),
        }
    }

    /// The colon-joined URN addressing this image
    pub fn urn(&self) -> String {
        [
            self.publisher.as_str(),
            self.offer.as_str(),
            self.sku.as_str(),
            self.version.as_str(),
        ]
        .join(":")
    }
}

/// Error reported by a provider catalog call
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct CatalogError {
    /// Provider error code, when the response carried one
    pub code: Option<String>,
    pub message: String,
}

impl CatalogError {
    pub fn new(code: Option<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Whether this error means the requested artifact does not exist
    ///
    /// Matches the provider's "was not found" message wording and the
    /// `NotFound` code family. Everything else is a real fault.
    pub fn is_not_found(&self) -> bool {
        if self.message.contains("was not found") {
            return true;
        }
        matches!(self.code.as_deref(), Some("NotFound") | Some("ResourceNotFound"))
    }
}

/// Blocking interface to the provider's image catalog
pub trait ComputeCatalog {
    /// Look up one image by region and full coordinates
    fn get_image(
        &self,
        region: &str,
        publisher: &str,
        offer: &str,
        sku: &str,
        version: &str,
    ) -> std::result::Result<ImageMetadata, CatalogError>;

    /// List the published version labels for `(publisher, offer, sku)`
    ///
    /// The listing is scoped to a region by the API, but the version set
    /// is the same in every region the family is published to.
    fn list_image_versions(
        &self,
        region: &str,
        publisher: &str,
        offer: &str,
        sku: &str,
    ) -> std::result::Result<Vec<String>, CatalogError>;

    /// List the regions available to the subscription
    fn list_regions(&self) -> std::result::Result<Vec<Region>, CatalogError>;

    /// The configured base endpoint URL
    fn endpoint(&self) -> &str;
}

/// Check whether an image exists in the provider catalog
///
/// A not-found catalog error is the expected negative answer and maps to
/// `Ok(false)`; any other catalog error propagates unchanged.
pub fn arm_image_exists<C: ComputeCatalog + ?Sized>(
    catalog: &C,
    region: &str,
    image: &ImageCoordinates,
) -> Result<bool> {
    match catalog.get_image(
        region,
        &image.publisher,
        &image.offer,
        &image.sku,
        &image.version,
    ) {
        Ok(_) => Ok(true),
        Err(err) if err.is_not_found() => Ok(false),
        Err(err) => Err(err.into()),
    }
}
