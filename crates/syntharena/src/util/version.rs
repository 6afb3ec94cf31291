//! Model version ordering
//!
//! Model runs carry free-form version strings such as `v1.2.10`,
//! `2.0-beta` or `0.9.1+cuda`. Segments compare numerically where both
//! are numbers, so `1.10` sorts after `1.9`.

use std::cmp::Ordering;

#[derive(Debug, PartialEq, Eq)]
enum Segment<'a> {
    Number(u64),
    Text(&'a str),
}

impl Ord for Segment<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Segment::Number(a), Segment::Number(b)) => a.cmp(b),
            (Segment::Text(a), Segment::Text(b)) => a.cmp(b),
            (Segment::Number(_), Segment::Text(_)) => Ordering::Greater,
            (Segment::Text(_), Segment::Number(_)) => Ordering::Less,
        }
    }
}

impl PartialOrd for Segment<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn segments(version: &str) -> Vec<Segment<'_>> {
    let trimmed = version.trim();
    let trimmed = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);

    trimmed
        .split(['.', '-', '_', '+'])
        .filter(|part| !part.is_empty())
        .map(|part| match part.parse::<u64>() {
            Ok(number) => Segment::Number(number),
            Err(_) => Segment::Text(part),
        })
        .collect()
}

/// Compare two version strings
///
/// A missing segment compares as `0`, so `1.2` equals `1.2.0`. A numeric
/// segment sorts after an alphanumeric one, so `1.0.1` is newer than
/// `1.0-rc1`.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let left = segments(a);
    let right = segments(b);
    let zero = Segment::Number(0);

    for i in 0..left.len().max(right.len()) {
        let l = left.get(i).unwrap_or(&zero);
        let r = right.get(i).unwrap_or(&zero);
        match l.cmp(r) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// Sort versions newest first
pub fn sort_versions<S: AsRef<str>>(versions: &mut [S]) {
    versions.sort_by(|a, b| compare_versions(b.as_ref(), a.as_ref()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_segments() {
        assert_eq!(compare_versions("1.10", "1.9"), Ordering::Greater);
        assert_eq!(compare_versions("1.2.3", "1.2.3"), Ordering::Equal);
        assert_eq!(compare_versions("0.9", "1.0"), Ordering::Less);
    }

    #[test]
    fn test_prefix_and_padding() {
        assert_eq!(compare_versions("v1.2", "1.2.0"), Ordering::Equal);
        assert_eq!(compare_versions("V2", "v1.99"), Ordering::Greater);
    }

    #[test]
    fn test_text_segments() {
        assert_eq!(compare_versions("1.0-beta", "1.0-alpha"), Ordering::Greater);
        assert_eq!(compare_versions("1.0.1", "1.0-rc1"), Ordering::Greater);
    }

    #[test]
    fn test_sort_newest_first() {
        let mut versions = vec!["v1.2", "v1.10", "v0.3", "v1.9.1"];
        sort_versions(&mut versions);
        assert_eq!(versions, vec!["v1.10", "v1.9.1", "v1.2", "v0.3"]);
    }
}
