// src/id.rs

//! Parser for legacy cloud-images Azure identifiers
//!
//! The classic Azure registration for an Ubuntu image packs release,
//! patch level, LTS/beta markers and the build date into one string:
//!
//! `b39f27a8b8c64d52b05eac6a62ebad85__Ubuntu-12_04_5-LTS-amd64-server-20140924.4-en-us-30GB`
//!
//! `parse_id` splits such an identifier into the ARM `(sku, version)`
//! pair. The SKU carries the marketing markers (patch level, LTS, beta);
//! the version identifies the immutable build and is always
//! `major.minor.<date><build>`.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

static ID_MATCH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^b39f27a8b8c64d52b05eac6a62ebad85__Ubuntu-(\d+)_(\d+)(?:_(\d+))?(-LTS)?-amd64-server-(\d{8})(?:\.(\d+))?(?:-beta(\d+))?-en-us-30GB$",
    )
    .unwrap()
});

// Same grammar with the build-number suffix mandatory. Ids without it
// predate the current publishing convention and are not convertible.
static CURRENT_ID_MATCH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^b39f27a8b8c64d52b05eac6a62ebad85__Ubuntu-(\d+)_(\d+)(?:_(\d+))?(-LTS)?-amd64-server-(\d{8})\.(\d+)(?:-beta(\d+))?-en-us-30GB$",
    )
    .unwrap()
});

/// Parse a vendor image identifier into an ARM `(sku, version)` pair
///
/// The patch level defaults to 0 and only appears in the SKU when it is
/// explicit or an LTS marker forces it. A beta marker turns the LTS
/// suffix into `-beta` and keeps the patch level only when explicit; a
/// beta marker without LTS leaves the SKU untouched. The version string
/// never carries any of the markers.
pub fn parse_id(item_id: &str) -> Result<(String, String)> {
    let caps = ID_MATCH
        .captures(item_id)
        .ok_or_else(|| Error::ParseId(item_id.to_string()))?;

    let major = caps.get(1).unwrap().as_str();
    let minor = caps.get(2).unwrap().as_str();
    let patch = caps.get(3).map(|m| m.as_str());
    let lts = caps.get(4).is_some();
    let date = caps.get(5).unwrap().as_str();
    let build = caps.get(6).map_or("0", |m| m.as_str());
    let beta = caps.get(7).is_some();

    let release = format!("{major}.{minor}");
    let sku = if beta && lts {
        match patch {
            Some(patch) => format!("{release}.{patch}-beta"),
            None => format!("{release}-beta"),
        }
    } else if patch.is_none() && !lts {
        release.clone()
    } else {
        let suffix = if lts { "-LTS" } else { "" };
        format!("{}.{}{}", release, patch.unwrap_or("0"), suffix)
    };
    let version = format!("{release}.{date}{build}");

    Ok((sku, version))
}

/// Whether an identifier is in the current publishable form
///
/// Legacy registrations omit the `.N` build-number suffix; they still
/// parse, but the batch converter refuses to probe the catalog for them.
pub(crate) fn is_current_form(item_id: &str) -> bool {
    CURRENT_ID_MATCH.is_match(item_id)
}
