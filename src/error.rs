// src/error.rs

//! Error types for stream conversion and catalog verification

use thiserror::Error;

use crate::catalog::CatalogError;

/// Result type for stream conversion operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building Azure image streams
#[derive(Error, Debug)]
pub enum Error {
    /// Vendor image identifier did not match the expected grammar
    #[error("unable to parse image id: {0}")]
    ParseId(String),

    /// Upstream claims an image the provider catalog does not have
    #[error("image not found in catalog: {0}")]
    MissingImage(String),

    /// Upstream listed an image this converter has no rule for
    #[error("unexpected source image: {0}")]
    UnexpectedImage(String),

    /// Required credential field missing from the credentials file
    #[error("missing credential field: {0}")]
    Credentials(String),

    /// Provider catalog call failed (other than "not found")
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Upstream stream index could not be fetched or decoded
    #[error("stream source error: {0}")]
    Source(String),

    /// HTTP client could not be constructed
    #[error("init error: {0}")]
    Init(String),

    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error while reading the credentials file
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
