//! Hardware identifier normalization
//!
//! Windows reports the same chip under many identifiers
//! (`PCI\VEN_8086&DEV_2723&SUBSYS_00848086&REV_1A`, `PCI\VEN_8086&DEV_2723`, ...).
//! Normalization collapses them to `VEN_xxxx&DEV_yyyy` so subsystem and revision
//! variants compare equal.

/// Bus prefixes removed before comparison
const BUS_PREFIXES: &[&str] = &["PCI\\", "USB\\", "ACPI\\", "HDAUDIO\\"];

const VENDOR_TOKEN: &str = "VEN_";
const DEVICE_TOKEN: &str = "DEV_";

/// Canonicalize a raw hardware identifier into a comparison key
///
/// Surrounding whitespace is trimmed first, since probe output and hand-edited
/// manifests often carry it. Never fails: input without both a `VEN_` and a
/// `DEV_` token is returned uppercased with its bus prefix removed. The result is stable under repeated
/// application.
pub fn normalize(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    let stripped = strip_bus_prefixes(&upper);

    match (
        token_value(stripped, VENDOR_TOKEN),
        token_value(stripped, DEVICE_TOKEN),
    ) {
        (Some(vendor), Some(device)) => format!("{VENDOR_TOKEN}{vendor}&{DEVICE_TOKEN}{device}"),
        _ => stripped.to_string(),
    }
}

fn strip_bus_prefixes(mut id: &str) -> &str {
    // Nested prefixes (`USB\HDAUDIO\...`) are all removed so the result is a fixed point
    while let Some(rest) = BUS_PREFIXES.iter().find_map(|p| id.strip_prefix(p)) {
        id = rest;
    }
    id
}

/// Text following `token` up to the next `&` or the end of the string
fn token_value<'a>(id: &'a str, token: &str) -> Option<&'a str> {
    let start = id.find(token)? + token.len();
    let rest = &id[start..];
    Some(rest.split('&').next().unwrap_or(rest))
}
