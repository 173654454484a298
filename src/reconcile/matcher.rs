//! Driver matching
//!
//! Decides which installed driver, if any, satisfies a manifest entry. Two
//! strategies exist: equal normalized hardware identifiers, and an overlap of at
//! least two whitespace-separated name words. The name strategy is deliberately
//! loose to survive vendor naming drift ("Intel Wi-Fi 6" vs
//! "Intel(R) Wi-Fi 6 AX201") and can produce false positives on generic words.
//!
//! Tie-break: every installed driver is checked for an identifier match before any
//! name match is considered, and within each strategy the probe order decides. An
//! identifier match anywhere in the list therefore always wins over a name match
//! earlier in the list.

use std::collections::HashSet;

use crate::domain::{InstalledDriver, ManifestEntry};

use super::normalize::normalize;

/// Minimum number of shared name words for a name match
const MIN_SHARED_NAME_WORDS: usize = 2;

/// How an installed driver was matched to a manifest entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Identifier,
    Name,
}

/// Find the installed driver satisfying `entry`
pub fn find_match<'a>(
    entry: &ManifestEntry,
    installed: &'a [InstalledDriver],
) -> Option<&'a InstalledDriver> {
    find_match_with_kind(entry, installed).map(|(driver, _)| driver)
}

/// Like [`find_match`], also reporting which strategy matched
pub fn find_match_with_kind<'a>(
    entry: &ManifestEntry,
    installed: &'a [InstalledDriver],
) -> Option<(&'a InstalledDriver, MatchKind)> {
    let wanted_id = normalize(entry.device_id_str());
    if !wanted_id.is_empty() {
        if let Some(driver) = installed
            .iter()
            .find(|d| identifier_matches(&wanted_id, &d.device_id))
        {
            return Some((driver, MatchKind::Identifier));
        }
    }

    let wanted_name = entry.name.to_lowercase();
    let wanted_words = name_words(&wanted_name);
    if wanted_words.len() < MIN_SHARED_NAME_WORDS {
        return None;
    }

    installed
        .iter()
        .find(|d| name_matches(&wanted_words, &d.name))
        .map(|driver| (driver, MatchKind::Name))
}

fn identifier_matches(wanted: &str, raw_installed: &str) -> bool {
    let candidate = normalize(raw_installed);
    !candidate.is_empty() && candidate == wanted
}

fn name_matches(wanted_words: &HashSet<&str>, installed_name: &str) -> bool {
    let installed_name = installed_name.to_lowercase();
    let shared = name_words(&installed_name)
        .intersection(wanted_words)
        .count();
    shared >= MIN_SHARED_NAME_WORDS
}

fn name_words(lowercase_name: &str) -> HashSet<&str> {
    lowercase_name.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, device_id: Option<&str>) -> ManifestEntry {
        let mut entry = ManifestEntry::named(name);
        entry.device_id = device_id.map(str::to_string);
        entry
    }

    #[test]
    fn test_identifier_match_ignores_names() {
        let installed = vec![InstalledDriver::new(
            "Completely Different",
            "1.0",
            "PCI\\VEN_8086&DEV_2723&SUBSYS_1234",
        )];
        let wanted = entry("Intel Wi-Fi 6", Some("PCI\\VEN_8086&DEV_2723"));
        let (driver, kind) = find_match_with_kind(&wanted, &installed).unwrap();
        assert_eq!(driver.name, "Completely Different");
        assert_eq!(kind, MatchKind::Identifier);
    }

    #[test]
    fn test_name_overlap_of_two_words() {
        let installed = vec![InstalledDriver::new("Intel(R) Wi-Fi 6 AX201", "1.0", "")];
        let wanted = entry("Intel Wi-Fi 6", None);
        let (_, kind) = find_match_with_kind(&wanted, &installed).unwrap();
        assert_eq!(kind, MatchKind::Name);
    }

    #[test]
    fn test_single_shared_word_is_not_a_match() {
        let installed = vec![InstalledDriver::new("Realtek Audio", "1.0", "")];
        let wanted = entry("Intel Audio", None);
        assert!(find_match(&wanted, &installed).is_none());
    }

    #[test]
    fn test_no_match() {
        let installed = vec![
            InstalledDriver::new("e1000e", "3.2.6-k", "pci:v00008086d000015B8sv*"),
            InstalledDriver::new("snd_hda_intel", "", ""),
        ];
        let wanted = entry("NVIDIA GeForce Driver", Some("PCI\\VEN_10DE&DEV_2484"));
        assert!(find_match(&wanted, &installed).is_none());
    }

    #[test]
    fn test_empty_identifiers_never_match() {
        let installed = vec![InstalledDriver::new("x", "1.0", "")];
        let wanted = entry("y", Some(""));
        assert!(find_match(&wanted, &installed).is_none());
    }

    #[test]
    fn test_name_match_is_case_insensitive() {
        let installed = vec![InstalledDriver::new("REALTEK HIGH DEFINITION AUDIO", "6.0", "")];
        let wanted = entry("Realtek High Definition Audio Driver", None);
        assert!(find_match(&wanted, &installed).is_some());
    }

    #[test]
    fn test_identifier_match_beats_earlier_name_match() {
        let installed = vec![
            InstalledDriver::new("Intel Wi-Fi 6 Legacy", "1.0", ""),
            InstalledDriver::new("Other", "2.0", "PCI\\VEN_8086&DEV_2723&REV_1A"),
        ];
        let wanted = entry("Intel Wi-Fi 6", Some("PCI\\VEN_8086&DEV_2723"));
        let driver = find_match(&wanted, &installed).unwrap();
        assert_eq!(driver.name, "Other");
    }

    #[test]
    fn test_first_name_match_in_probe_order_wins() {
        let installed = vec![
            InstalledDriver::new("Intel Network Adapter", "1.0", ""),
            InstalledDriver::new("Intel Network Connection", "2.0", ""),
        ];
        let wanted = entry("Intel Network Driver", None);
        assert_eq!(find_match(&wanted, &installed).unwrap().version, "1.0");
    }
}
