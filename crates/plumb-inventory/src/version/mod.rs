//! Ordering for version directory names.
//!
//! Versions compare component by component after splitting on `.`. Components
//! made only of ASCII digits compare numerically, whatever their length.
//! Anything else is compared lexically and sorts after a numeric component in
//! the same position, so malformed names such as `latest` still land in a
//! deterministic place instead of being dropped. A version that is a strict
//! prefix of another sorts first, and remaining ties fall back to comparing
//! the raw strings, which keeps the order total.

use std::cmp::Ordering;

/// Compares two version strings.
///
/// # Example
///
/// ```
/// use plumb_inventory::version::compare_versions;
/// use std::cmp::Ordering;
///
/// assert_eq!(compare_versions("2.0.0", "10.0.0"), Ordering::Less);
/// assert_eq!(compare_versions("1.2.3", "1.2"), Ordering::Greater);
/// ```
#[must_use]
pub fn compare_versions(left: &str, right: &str) -> Ordering {
    let mut lhs = left.split('.');
    let mut rhs = right.split('.');
    loop {
        match (lhs.next(), rhs.next()) {
            (Some(a), Some(b)) => match compare_component(a, b) {
                Ordering::Equal => {}
                unequal => return unequal,
            },
            (Some(_), None) => return Ordering::Greater,
            (None, Some(_)) => return Ordering::Less,
            (None, None) => return left.cmp(right),
        }
    }
}

/// Sorts versions ascending in place.
pub fn sort_versions(versions: &mut [String]) {
    versions.sort_by(|a, b| compare_versions(a, b));
}

/// Returns the highest version, if any.
#[must_use]
pub fn latest_version<'a, I>(versions: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    versions.into_iter().max_by(|a, b| compare_versions(a, b))
}

fn compare_component(a: &str, b: &str) -> Ordering {
    match (is_numeric(a), is_numeric(b)) {
        (true, true) => compare_numeric(a, b),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.cmp(b),
    }
}

fn is_numeric(component: &str) -> bool {
    !component.is_empty() && component.bytes().all(|b| b.is_ascii_digit())
}

// Digit strings of any length: strip leading zeros, then longer is larger.
fn compare_numeric(a: &str, b: &str) -> Ordering {
    let lhs = a.trim_start_matches('0');
    let rhs = b.trim_start_matches('0');
    lhs.len().cmp(&rhs.len()).then_with(|| lhs.cmp(rhs))
}
