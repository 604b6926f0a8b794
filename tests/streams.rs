// tests/streams.rs
//! End-to-end assembly over in-memory collaborators
//!
//! Drives `make_azure_items` the way the CLI does, checking the final
//! item list ordering, unknown-region reporting, and fault propagation
//! between the batch and synthesis phases.

use azure_image_streams::{
    convert_item_to_arm, make_azure_items, make_item, parse_id, CatalogError, Error,
    ImageCoordinates, Region, StreamItem, CANONICAL, IMAGE_SPEC, UBUNTU_SERVER,
};

mod common;
use common::{make_old_item, FakeCatalog, FakeSource, CURRENT_ID};

const ENDPOINT: &str = "http://example.com/arm";

fn canada_east_catalog(versions: &[&str]) -> FakeCatalog {
    FakeCatalog::new(
        ENDPOINT,
        vec![Region::new("canadaeast", "Canada East")],
        versions.iter().map(|v| v.to_string()).collect(),
    )
}

fn expected_ubuntu_item(old_item: &StreamItem) -> StreamItem {
    let (sku, version) = parse_id(&old_item.data["id"]).unwrap();
    let urn = ImageCoordinates::new(CANONICAL, UBUNTU_SERVER, sku, version).urn();
    convert_item_to_arm(old_item, &urn, ENDPOINT)
}

fn expected_spec_items(versions: &[&str]) -> Vec<StreamItem> {
    let mut items = Vec::new();
    for spec in &IMAGE_SPEC {
        for (num, version) in versions.iter().copied().enumerate() {
            items.push(make_item(
                &num.to_string(),
                version,
                spec,
                "Canada East",
                ENDPOINT,
            ));
        }
    }
    items
}

#[test]
fn test_make_azure_items() {
    let catalog = canada_east_catalog(&["3"]);
    let old_item = make_old_item(CURRENT_ID, "Canada East");
    let source = FakeSource {
        items: vec![old_item.clone()],
    };

    let items = make_azure_items(&catalog, &source).unwrap();

    let mut expected = vec![expected_ubuntu_item(&old_item)];
    expected.extend(expected_spec_items(&["3"]));
    assert_eq!(items, expected);

    // One version listing per spec, all scoped to the first region
    let list_calls = catalog.list_calls.borrow();
    assert_eq!(list_calls.len(), IMAGE_SPEC.len());
    assert!(list_calls.iter().all(|call| call[0] == "canadaeast"));
}

#[test]
fn test_make_azure_items_no_ubuntu() {
    let catalog = canada_east_catalog(&["3"]);
    let source = FakeSource { items: vec![] };

    let items = make_azure_items(&catalog, &source).unwrap();
    assert_eq!(items, expected_spec_items(&["3"]));
}

#[test]
fn test_make_azure_items_unknown_region() {
    let catalog = canada_east_catalog(&["3"]);
    let source = FakeSource {
        items: vec![make_old_item(CURRENT_ID, "Westeros")],
    };

    let items = make_azure_items(&catalog, &source).unwrap();
    // The stranger is reported, not converted; spec items still come out
    assert_eq!(items, expected_spec_items(&["3"]));
}

#[test]
fn test_make_azure_items_missing_image() {
    let mut catalog = canada_east_catalog(&["3"]);
    catalog.get_error = Some(CatalogError::new(
        None,
        "Artifact: VMImage was not found.",
    ));
    let source = FakeSource {
        items: vec![make_old_item(CURRENT_ID, "Canada East")],
    };

    let err = make_azure_items(&catalog, &source).unwrap_err();
    assert!(matches!(err, Error::MissingImage(_)));
}

#[test]
fn test_make_azure_items_catalog_fault() {
    let mut catalog = canada_east_catalog(&["3"]);
    catalog.get_error = Some(CatalogError::new(
        Some("AuthorizationFailed".to_string()),
        "The client does not have authorization",
    ));
    let source = FakeSource {
        items: vec![make_old_item(CURRENT_ID, "Canada East")],
    };

    let err = make_azure_items(&catalog, &source).unwrap_err();
    assert!(matches!(err, Error::Catalog(_)));
}

#[test]
fn test_two_versions_two_regions_ordering() {
    let catalog = FakeCatalog::new(
        ENDPOINT,
        vec![
            Region::new("canadaeast", "Canada East"),
            Region::new("canadacentral", "Canada Central"),
        ],
        vec!["1".to_string(), "2".to_string()],
    );
    let source = FakeSource { items: vec![] };

    let items = make_azure_items(&catalog, &source).unwrap();
    // 5 specs x 2 regions x 2 versions
    assert_eq!(items.len(), 20);

    // Within one spec: regions outer, versions inner
    let first_spec: Vec<(&str, &str)> = items[..4]
        .iter()
        .map(|item| (item.data["region"].as_str(), item.version_name.as_str()))
        .collect();
    assert_eq!(
        first_spec,
        vec![
            ("Canada East", "0"),
            ("Canada East", "1"),
            ("Canada Central", "0"),
            ("Canada Central", "1"),
        ]
    );
}
