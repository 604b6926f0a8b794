// src/assemble.rs

//! Full catalog assembly
//!
//! Pulls the pieces together for one run: validate credentials, list
//! regions, convert the upstream batch, synthesize the fixed spec
//! table, and concatenate everything into the final item list.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::catalog::ComputeCatalog;
use crate::convert::convert_cloud_images_items;
use crate::error::{Error, Result};
use crate::item::{StreamItem, IMAGE_SPEC};
use crate::source::ItemSource;
use crate::synth::make_spec_items;

/// Credentials file: one sub-mapping per cloud
///
/// ```yaml
/// azure:
///   credentials:
///     application-id: ...
///     application-password: ...
///     subscription-id: ...
///     tenant-id: ...
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsFile {
    #[serde(flatten)]
    pub clouds: BTreeMap<String, CloudCredentials>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CloudCredentials {
    #[serde(default)]
    pub credentials: BTreeMap<String, String>,
}

impl CredentialsFile {
    /// Load and parse a credentials YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&text)?)
    }
}

/// The service-principal fields required for the Azure cloud
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AzureCredentials {
    pub application_id: String,
    pub application_password: String,
    pub subscription_id: String,
    pub tenant_id: String,
}

fn required_field(credentials: &BTreeMap<String, String>, key: &str) -> Result<String> {
    credentials
        .get(key)
        .cloned()
        .ok_or_else(|| Error::Credentials(key.to_string()))
}

/// Extract and validate the Azure credentials from a credentials file
///
/// Returns the subscription id alongside the full credential set.
/// Fails before any network activity when a required field is absent.
pub fn get_azure_credentials(all_credentials: &CredentialsFile) -> Result<(String, AzureCredentials)> {
    let cloud = all_credentials
        .clouds
        .get("azure")
        .ok_or_else(|| Error::Credentials("azure".to_string()))?;
    let credentials = AzureCredentials {
        application_id: required_field(&cloud.credentials, "application-id")?,
        application_password: required_field(&cloud.credentials, "application-password")?,
        subscription_id: required_field(&cloud.credentials, "subscription-id")?,
        tenant_id: required_field(&cloud.credentials, "tenant-id")?,
    };
    Ok((credentials.subscription_id.clone(), credentials))
}

/// Assemble the complete item list for one run
///
/// Upstream items come first, then the synthesized items for each entry
/// of the fixed spec table, each sub-phase keeping its internal order.
/// Unknown upstream regions are reported and skipped, never fatal.
pub fn make_azure_items<C, S>(catalog: &C, source: &S) -> Result<Vec<StreamItem>>
where
    C: ComputeCatalog + ?Sized,
    S: ItemSource + ?Sized,
{
    let regions = catalog.list_regions().map_err(Error::from)?;
    info!("{} regions listed", regions.len());

    let upstream_items = source.items()?;
    info!("{} upstream items fetched", upstream_items.len());

    let (mut items, unknown_regions) =
        convert_cloud_images_items(catalog, &regions, &upstream_items)?;
    for display_name in &unknown_regions {
        warn!("unknown region: {}", display_name);
    }
    info!("{} upstream items converted", items.len());

    for spec in IMAGE_SPEC {
        for item in make_spec_items(catalog, spec, &regions) {
            items.push(item?);
        }
    }
    Ok(items)
}
