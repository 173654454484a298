//! Driver version ordering
//!
//! Driver vendors use dotted numeric versions (`22.190.0.4`, `31.0.101.4502`) but
//! also tack on qualifiers (`1.2.0-beta`, `r535`). Numeric components are compared
//! as numbers; when a side has no numeric component at all the raw strings are
//! compared lexically instead.

use std::cmp::Ordering;

/// Order two version strings
///
/// An empty side compares equal to anything. This is the "unknown" answer, not a
/// claim that the versions match.
pub fn compare(a: &str, b: &str) -> Ordering {
    if a.is_empty() || b.is_empty() {
        return Ordering::Equal;
    }

    let left = numeric_components(a);
    let right = numeric_components(b);

    if left.is_empty() || right.is_empty() {
        return a.cmp(b);
    }

    let len = left.len().max(right.len());
    (0..len)
        .map(|i| {
            let l = left.get(i).copied().unwrap_or("0");
            let r = right.get(i).copied().unwrap_or("0");
            compare_digits(l, r)
        })
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Dot-separated components that consist only of ASCII digits
fn numeric_components(version: &str) -> Vec<&str> {
    version
        .split('.')
        .filter(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
        .collect()
}

/// Compare two digit strings numerically without parsing, so arbitrarily long
/// components cannot overflow
fn compare_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
